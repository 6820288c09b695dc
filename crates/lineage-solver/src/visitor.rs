//! Structural traversal over interned type expressions.
//!
//! `Application` and `Composite` are the only variants with members. Every
//! recursive operation in the solver goes through `for_each_member` (read) or
//! `map_members` (rebuild), so adding a composite kind never requires touching
//! substitution or classification.

use crate::intern::{TypeInterner, TypeListBuffer};
use crate::types::{ClassId, TypeData, TypeId};
use std::sync::Arc;

/// Call `f` on each direct member of `type_id`, in order.
pub fn for_each_member<F>(types: &TypeInterner, type_id: TypeId, mut f: F)
where
    F: FnMut(TypeId),
{
    let members = match types.lookup(type_id) {
        Some(TypeData::Application { args, .. }) => types.type_list(args),
        Some(TypeData::Composite { members, .. }) => types.type_list(members),
        _ => return,
    };
    for &member in members.iter() {
        f(member);
    }
}

/// Rebuild `type_id` with each direct member replaced by `f(member)`.
///
/// The result keeps the origin class (for applications) or composite kind.
/// Types without members are returned unchanged and `f` is not called.
pub fn map_members<F, E>(types: &TypeInterner, type_id: TypeId, mut f: F) -> Result<TypeId, E>
where
    F: FnMut(TypeId) -> Result<TypeId, E>,
{
    match types.lookup(type_id) {
        Some(TypeData::Application { origin, args }) => {
            let mapped = map_list(&types.type_list(args), &mut f)?;
            Ok(types.application(origin, &mapped))
        }
        Some(TypeData::Composite { kind, members }) => {
            let mapped = map_list(&types.type_list(members), &mut f)?;
            Ok(types.composite(kind, &mapped))
        }
        _ => Ok(type_id),
    }
}

fn map_list<F, E>(list: &[TypeId], f: &mut F) -> Result<TypeListBuffer, E>
where
    F: FnMut(TypeId) -> Result<TypeId, E>,
{
    list.iter().map(|&member| f(member)).collect()
}

/// Whether any `Param` occurs anywhere inside `type_id`.
pub fn contains_type_parameters(types: &TypeInterner, type_id: TypeId) -> bool {
    match types.lookup(type_id) {
        Some(TypeData::Param(_)) => true,
        Some(TypeData::Application { .. } | TypeData::Composite { .. }) => {
            let mut found = false;
            for_each_member(types, type_id, |member| {
                found = found || contains_type_parameters(types, member);
            });
            found
        }
        _ => false,
    }
}

/// Origin class and arguments of an application type.
pub fn application_parts(types: &TypeInterner, type_id: TypeId) -> Option<(ClassId, Arc<[TypeId]>)> {
    match types.lookup(type_id)? {
        TypeData::Application { origin, args } => Some((origin, types.type_list(args))),
        _ => None,
    }
}

/// The class a base entry refers to: itself for `Class`, the origin for
/// `Application`, `None` for anything else.
pub fn base_class_of(types: &TypeInterner, type_id: TypeId) -> Option<ClassId> {
    match types.lookup(type_id)? {
        TypeData::Class(class) => Some(class),
        TypeData::Application { origin, .. } => Some(origin),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/visitor_tests.rs"]
mod tests;
