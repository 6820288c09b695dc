//! Errors surfaced by path finding, resolution and class table construction.
//!
//! Every operation is a deterministic function of the class metadata, so none
//! of these are retried or recovered locally: they propagate to the caller.

use crate::types::{ClassId, TypeId, TypeParamId};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineageError {
    /// `descendant` is not a (possibly indirect) subclass of `ancestor`.
    NotSubclass {
        descendant: ClassId,
        ancestor: ClassId,
    },
    /// The ancestor handed to the resolver is not a plain class.
    InvalidAncestor { ancestor: TypeId },
    /// The path search exhausted its frontier even though the subclass check
    /// passed. Indicates inconsistent class metadata.
    InternalInvariant {
        descendant: ClassId,
        ancestor: ClassId,
    },
    /// A substitution had no binding for a parameter that the structural
    /// invariant requires it to bind.
    UnboundTypeVariable { param: TypeParamId },
    /// A base application supplies the wrong number of type arguments.
    ArityMismatch {
        origin: ClassId,
        expected: usize,
        found: usize,
    },
    /// A declared base is neither a class nor a class application.
    InvalidBase { class: ClassId, base: TypeId },
}

impl fmt::Display for LineageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineageError::NotSubclass {
                descendant,
                ancestor,
            } => write!(
                f,
                "class #{} is not a subclass of class #{}",
                descendant.0, ancestor.0
            ),
            LineageError::InvalidAncestor { ancestor } => {
                write!(f, "type #{} is not a plain class", ancestor.0)
            }
            LineageError::InternalInvariant {
                descendant,
                ancestor,
            } => write!(
                f,
                "no inheritance path from class #{} to class #{} although it is a subclass",
                descendant.0, ancestor.0
            ),
            LineageError::UnboundTypeVariable { param } => {
                write!(f, "type parameter #{} is not bound by the substitution", param.0)
            }
            LineageError::ArityMismatch {
                origin,
                expected,
                found,
            } => write!(
                f,
                "class #{} expects {} type arguments, found {}",
                origin.0, expected, found
            ),
            LineageError::InvalidBase { class, base } => write!(
                f,
                "type #{} cannot be a base of class #{}",
                base.0, class.0
            ),
        }
    }
}

impl std::error::Error for LineageError {}
