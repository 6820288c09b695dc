//! Type variable resolution.
//!
//! Given an ancestor class and a descendant, computes what each of the
//! ancestor's type parameters is bound to as seen from the descendant, by
//! composing the substitutions of every specialization edge on the
//! inheritance path.
//!
//! ```text
//! A1[T, S]
//! B1[T](A1[Iterable[T], Union[T, str]])
//! C(B1[Optional[int]])
//!
//! resolve(A1, C) = { T: Iterable[Optional[int]], S: Union[Optional[int], str] }
//! ```
//!
//! The path is walked from the ancestor end back to the descendant. Bindings
//! start as the identity on the ancestor's parameters; each application
//! `Origin[args]` rewrites every current value by substituting the origin's
//! parameters with `args`. Plain class nodes carry no arguments and leave the
//! bindings untouched.

use crate::db::ClassDatabase;
use crate::diagnostics::LineageError;
use crate::inheritance_path::find_path;
use crate::instantiate::{TypeSubstitution, instantiate_type};
use crate::types::{BindingKind, ClassId, PathNode, TypeData, TypeId, TypeParamId};
use crate::visitor::{application_parts, contains_type_parameters};
use indexmap::IndexMap;
use tracing::{Level, debug, span, trace};

/// Resolved bindings for the parameters of one ancestor class, in the
/// ancestor's declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeVarBindings {
    map: IndexMap<TypeParamId, TypeId>,
}

impl TypeVarBindings {
    fn identity(db: &dyn ClassDatabase, params: &[TypeParamId]) -> Self {
        let types = db.types();
        let map = params
            .iter()
            .map(|&param| (param, types.param(param)))
            .collect();
        TypeVarBindings { map }
    }

    pub fn get(&self, param: TypeParamId) -> Option<TypeId> {
        self.map.get(&param).copied()
    }

    /// Bindings in the ancestor's parameter order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeParamId, TypeId)> + '_ {
        self.map.iter().map(|(&param, &type_id)| (param, type_id))
    }

    pub fn params(&self) -> impl Iterator<Item = TypeParamId> + '_ {
        self.map.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// How concrete the binding for `param` is.
    pub fn classify(&self, db: &dyn ClassDatabase, param: TypeParamId) -> Option<BindingKind> {
        let type_id = self.get(param)?;
        let types = db.types();
        let kind = match types.lookup(type_id) {
            Some(TypeData::Param(_)) => BindingKind::Free,
            _ if contains_type_parameters(types, type_id) => BindingKind::Partial,
            _ => BindingKind::Concrete,
        };
        Some(kind)
    }

    fn substitute(
        &mut self,
        db: &dyn ClassDatabase,
        subst: &TypeSubstitution,
    ) -> Result<(), LineageError> {
        let types = db.types();
        for value in self.map.values_mut() {
            *value = instantiate_type(types, *value, subst)?;
        }
        Ok(())
    }
}

/// Resolver bound to one class database.
pub struct TypeVarResolver<'a> {
    db: &'a dyn ClassDatabase,
}

impl<'a> TypeVarResolver<'a> {
    pub fn new(db: &'a dyn ClassDatabase) -> Self {
        Self { db }
    }

    /// Resolve the parameters of `ancestor` as seen from `descendant`.
    ///
    /// `ancestor` must be a plain class type; an application or composite is
    /// rejected with `InvalidAncestor`. The subclass relation is checked
    /// before anything else, so a non-generic ancestor that `descendant` does
    /// not derive from still fails with `NotSubclass`.
    pub fn resolve(
        &self,
        ancestor: TypeId,
        descendant: ClassId,
    ) -> Result<TypeVarBindings, LineageError> {
        let Some(TypeData::Class(ancestor_class)) = self.db.types().lookup(ancestor) else {
            return Err(LineageError::InvalidAncestor { ancestor });
        };
        self.resolve_class(ancestor_class, descendant)
    }

    pub fn resolve_class(
        &self,
        ancestor: ClassId,
        descendant: ClassId,
    ) -> Result<TypeVarBindings, LineageError> {
        let _span = span!(
            Level::TRACE,
            "resolve_type_vars",
            ancestor = ancestor.0,
            descendant = descendant.0
        )
        .entered();

        if !self.db.is_subclass(descendant, ancestor) {
            return Err(LineageError::NotSubclass {
                descendant,
                ancestor,
            });
        }

        let params = self.db.type_params(ancestor);
        let mut bindings = TypeVarBindings::identity(self.db, params);
        if bindings.is_empty() {
            return Ok(bindings);
        }

        let path = find_path(self.db, descendant, ancestor, true)?;
        let edges = &path.nodes()[..path.len() - 1];
        let types = self.db.types();

        for &node in edges.iter().rev() {
            let PathNode::Application(application) = node else {
                continue;
            };
            let Some((origin, args)) = application_parts(types, application) else {
                continue;
            };
            let subst = TypeSubstitution::from_args(self.db.type_params(origin), &args);
            bindings.substitute(self.db, &subst)?;
            trace!(origin = origin.0, "applied specialization");

            // Arguments free of parameters leave nothing further down the path
            // to substitute.
            if !args
                .iter()
                .any(|&arg| contains_type_parameters(types, arg))
            {
                break;
            }
        }

        debug!(bindings = bindings.len(), path = path.len(), "resolved type variables");
        Ok(bindings)
    }
}

/// Resolve the parameters of `ancestor` as seen from `descendant`. See
/// [`TypeVarResolver::resolve`].
pub fn resolve_type_vars(
    db: &dyn ClassDatabase,
    ancestor: TypeId,
    descendant: ClassId,
) -> Result<TypeVarBindings, LineageError> {
    TypeVarResolver::new(db).resolve(ancestor, descendant)
}

#[cfg(test)]
#[path = "../tests/type_var_resolver_tests.rs"]
mod tests;
