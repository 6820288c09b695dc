//! Type parameter substitution.
//!
//! A `TypeSubstitution` binds the declared parameters of one class to the
//! arguments of a specialization edge. `instantiate_type` applies it to an
//! arbitrary type expression, rebuilding composites through
//! `visitor::map_members`.

use crate::diagnostics::LineageError;
use crate::intern::TypeInterner;
use crate::types::{TypeData, TypeId, TypeParamId};
use crate::visitor::{contains_type_parameters, map_members};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Mapping from type parameters to the types bound to them.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<TypeParamId, TypeId>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        TypeSubstitution {
            map: FxHashMap::default(),
        }
    }

    /// Bind `params[i]` to `args[i]`.
    ///
    /// Extra parameters or arguments are ignored; a parameter left without an
    /// argument surfaces later as `UnboundTypeVariable` if it is looked up.
    pub fn from_args(params: &[TypeParamId], args: &[TypeId]) -> Self {
        if params.len() != args.len() {
            trace!(
                params = params.len(),
                args = args.len(),
                "substitution arity differs"
            );
        }
        let map = params.iter().copied().zip(args.iter().copied()).collect();
        TypeSubstitution { map }
    }

    pub fn insert(&mut self, param: TypeParamId, type_id: TypeId) {
        self.map.insert(param, type_id);
    }

    pub fn get(&self, param: TypeParamId) -> Option<TypeId> {
        self.map.get(&param).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}

/// Replace every parameter occurring in `type_id` according to `subst`.
///
/// - A bare parameter is replaced by its binding.
/// - Applications and composites are rebuilt with substituted members.
/// - Types that contain no parameter are returned as-is.
///
/// Every parameter reached must be bound: a missing binding is reported as
/// `UnboundTypeVariable` rather than left free.
pub fn instantiate_type(
    types: &TypeInterner,
    type_id: TypeId,
    subst: &TypeSubstitution,
) -> Result<TypeId, LineageError> {
    match types.lookup(type_id) {
        Some(TypeData::Param(param)) => subst
            .get(param)
            .ok_or(LineageError::UnboundTypeVariable { param }),
        Some(TypeData::Application { .. } | TypeData::Composite { .. }) => {
            if !contains_type_parameters(types, type_id) {
                return Ok(type_id);
            }
            map_members(types, type_id, |member| instantiate_type(types, member, subst))
        }
        _ => Ok(type_id),
    }
}

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod tests;
