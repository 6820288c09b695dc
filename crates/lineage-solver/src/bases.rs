//! Base-set policy: which edges the path finder follows out of a node.

use crate::db::ClassDatabase;
use crate::types::{ClassId, PathNode, TypeData, TypeId};
use crate::visitor::base_class_of;
use smallvec::SmallVec;
use tracing::warn;

pub type BaseList = SmallVec<[PathNode; 4]>;

/// Direct bases of `node`, in declaration order.
///
/// Without generics this is always the plain base list. With generics:
/// - an `Application` node has its origin class as its only base, so the
///   search unwraps one level of specialization per step;
/// - a class whose annotated base list agrees with its plain base list yields
///   the annotated list, keeping specialization edges on the path;
/// - otherwise the plain list is used. A disagreeing annotated list is logged
///   and ignored for that class only.
pub fn bases_of(db: &dyn ClassDatabase, node: PathNode, with_generics: bool) -> BaseList {
    let class = match node {
        PathNode::Class(class) => class,
        PathNode::Application(type_id) => {
            let origin = base_class_of(db.types(), type_id);
            if with_generics {
                return origin.map(PathNode::Class).into_iter().collect();
            }
            match origin {
                Some(origin) => origin,
                None => return BaseList::new(),
            }
        }
    };

    if with_generics {
        if let Some(annotated) = db.annotated_bases(class) {
            if annotated_matches_plain(db, annotated, db.bases(class)) {
                return annotated
                    .iter()
                    .map(|&base| annotated_node(db, base))
                    .collect();
            }
            warn!(
                ?class,
                annotated = annotated.len(),
                plain = db.bases(class).len(),
                "annotated bases disagree with plain bases, dropping specialization"
            );
        }
    }

    plain_bases(db, class)
}

fn plain_bases(db: &dyn ClassDatabase, class: ClassId) -> BaseList {
    db.bases(class).iter().copied().map(PathNode::Class).collect()
}

/// Stripping each annotated entry to its class must reproduce the plain list.
fn annotated_matches_plain(db: &dyn ClassDatabase, annotated: &[TypeId], plain: &[ClassId]) -> bool {
    annotated.len() == plain.len()
        && annotated
            .iter()
            .zip(plain)
            .all(|(&base, &class)| base_class_of(db.types(), base) == Some(class))
}

fn annotated_node(db: &dyn ClassDatabase, base: TypeId) -> PathNode {
    match db.types().lookup(base) {
        Some(TypeData::Class(class)) => PathNode::Class(class),
        _ => PathNode::Application(base),
    }
}

#[cfg(test)]
#[path = "../tests/bases_tests.rs"]
mod tests;
