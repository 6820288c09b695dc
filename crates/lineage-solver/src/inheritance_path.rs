//! Inheritance path search.
//!
//! Finds one chain of base edges from a descendant class up to an ancestor,
//! keeping the specialization edges (`PathNode::Application`) it crosses when
//! generics are enabled.
//!
//! The search is a depth-first walk over an explicit stack:
//!
//! - bases of a node are pushed in declaration order, so the last-declared
//!   base is popped (expanded) first;
//! - a node is queued at most once across the whole search, so a node claimed
//!   by one branch is never re-expanded on behalf of another;
//! - the first base equal to the ancestor ends the search.
//!
//! This order is not a linearization (MRO). In diamond hierarchies the path
//! returned, and therefore the bindings the resolver derives from it, depend
//! on it.

use crate::bases::bases_of;
use crate::db::ClassDatabase;
use crate::diagnostics::LineageError;
use crate::types::{ClassId, PathNode};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{Level, debug, span, trace};

type PathBuffer = SmallVec<[PathNode; 8]>;

/// A path from a descendant (first) to an ancestor (last).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InheritancePath {
    nodes: PathBuffer,
}

impl InheritancePath {
    fn single(class: ClassId) -> Self {
        let mut nodes = PathBuffer::new();
        nodes.push(PathNode::Class(class));
        InheritancePath { nodes }
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true for paths produced by the finder.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<PathNode> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<PathNode> {
        self.nodes.last().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = PathNode> + '_ {
        self.nodes.iter().copied()
    }

    /// The plain classes on the path, skipping specialization edges.
    pub fn classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.nodes.iter().filter_map(|node| node.as_class())
    }
}

impl<'a> IntoIterator for &'a InheritancePath {
    type Item = &'a PathNode;
    type IntoIter = std::slice::Iter<'a, PathNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Path finder bound to one class database.
pub struct InheritancePathFinder<'a> {
    db: &'a dyn ClassDatabase,
}

impl<'a> InheritancePathFinder<'a> {
    pub fn new(db: &'a dyn ClassDatabase) -> Self {
        Self { db }
    }

    /// Find a path from `descendant` to `ancestor`.
    ///
    /// Returns `[descendant]` when both are the same class, `NotSubclass` when
    /// `descendant` does not derive from `ancestor`, and `InternalInvariant`
    /// when the subclass check passed but no path exists (the metadata
    /// contradicts itself).
    pub fn find(
        &self,
        descendant: ClassId,
        ancestor: ClassId,
        with_generics: bool,
    ) -> Result<InheritancePath, LineageError> {
        let _span = span!(
            Level::TRACE,
            "find_path",
            descendant = descendant.0,
            ancestor = ancestor.0,
            with_generics
        )
        .entered();

        if descendant == ancestor {
            return Ok(InheritancePath::single(descendant));
        }

        if !self.db.is_subclass(descendant, ancestor) {
            return Err(LineageError::NotSubclass {
                descendant,
                ancestor,
            });
        }

        let target = PathNode::Class(ancestor);
        let mut queued: FxHashSet<PathNode> = FxHashSet::default();
        let mut stack: Vec<(PathNode, PathBuffer)> =
            vec![(PathNode::Class(descendant), InheritancePath::single(descendant).nodes)];

        while let Some((current, path)) = stack.pop() {
            trace!(?current, depth = path.len(), "expanding");
            for base in bases_of(self.db, current, with_generics) {
                if base == target {
                    let mut nodes = path;
                    nodes.push(base);
                    debug!(len = nodes.len(), "inheritance path found");
                    return Ok(InheritancePath { nodes });
                }
                if !queued.insert(base) {
                    continue;
                }
                let mut next = path.clone();
                next.push(base);
                stack.push((base, next));
            }
        }

        Err(LineageError::InternalInvariant {
            descendant,
            ancestor,
        })
    }
}

/// Find a path from `descendant` to `ancestor`. See
/// [`InheritancePathFinder::find`].
pub fn find_path(
    db: &dyn ClassDatabase,
    descendant: ClassId,
    ancestor: ClassId,
    with_generics: bool,
) -> Result<InheritancePath, LineageError> {
    InheritancePathFinder::new(db).find(descendant, ancestor, with_generics)
}

#[cfg(test)]
#[path = "../tests/inheritance_path_tests.rs"]
mod tests;
