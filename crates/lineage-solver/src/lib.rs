//! Generic Hierarchy Resolver
//!
//! Answers two questions about a class hierarchy whose classes may be generic
//! and may inherit from specialized generic bases:
//!
//! - **Path finding**: which chain of base edges leads from a descendant to an
//!   ancestor, keeping specialization edges such as `A1[int, S]`.
//! - **Type variable resolution**: what the ancestor's type parameters are
//!   bound to as seen from the descendant.
//!
//! Key properties:
//! - O(1) type equality via interning (`TypeId` comparison)
//! - Class metadata read through the `ClassDatabase` trait
//! - Stateless queries, safe to run from several threads at once
mod bases;
mod class_table;
mod db;
mod diagnostics;
mod format;
mod inheritance_path;
mod instantiate;
mod intern;
mod type_var_resolver;
pub mod types;
pub mod visitor;

pub use bases::{BaseList, bases_of};
pub use class_table::{ClassDef, ClassTable, TypeParamDef};
pub use db::ClassDatabase;
pub use diagnostics::LineageError;
pub use format::TypeFormatter;
pub use inheritance_path::{InheritancePath, InheritancePathFinder, find_path};
pub use instantiate::{TypeSubstitution, instantiate_type};
pub use intern::TypeInterner;
pub use type_var_resolver::{TypeVarBindings, TypeVarResolver, resolve_type_vars};
pub use types::{BindingKind, ClassId, CompositeKind, PathNode, TypeData, TypeId, TypeParamId};
