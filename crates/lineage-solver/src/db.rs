//! Class metadata facility.
//!
//! The solver never owns class definitions. It reads them through
//! `ClassDatabase`, which a host implements over whatever reflection data it
//! has. `ClassTable` is the in-memory implementation shipped with the crate.

use crate::intern::TypeInterner;
use crate::types::{ClassId, TypeId, TypeParamId};
use lineage_common::interner::Atom;

/// Read-only view over class metadata.
///
/// Implementations must be safe to read from several threads at once; path
/// finding and resolution take `&dyn ClassDatabase` and keep no state of
/// their own between calls.
pub trait ClassDatabase: Sync {
    /// The interner backing every `TypeId` this database hands out.
    fn types(&self) -> &TypeInterner;

    fn class_name(&self, class: ClassId) -> Option<Atom>;

    fn param_name(&self, param: TypeParamId) -> Option<Atom>;

    /// Declared type parameters of `class`, in declaration order.
    /// Empty for non-generic (or unknown) classes.
    fn type_params(&self, class: ClassId) -> &[TypeParamId];

    /// Plain direct bases of `class`, without type arguments.
    fn bases(&self, class: ClassId) -> &[ClassId];

    /// Direct bases of `class` with their type arguments attached, when the
    /// metadata source records them. Entries are `Class` or `Application`
    /// types. This list is not guaranteed to agree with `bases`.
    fn annotated_bases(&self, class: ClassId) -> Option<&[TypeId]>;

    /// Reflexive, transitive subclass check over plain bases.
    fn is_subclass(&self, derived: ClassId, base: ClassId) -> bool;
}
