//! Common types and utilities for the lineage workspace.
//!
//! This crate provides foundational types used across all lineage crates:
//! - String interning (`Atom`, `ShardedInterner`) for class and type parameter names

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, ShardedInterner};
