use super::*;
use crate::class_table::ClassTable;
use crate::intern::TypeInterner;
use crate::types::{TypeId, TypeParamId};
use lineage_common::interner::Atom;

struct Diamond {
    table: ClassTable,
    a1: ClassId,
    a2: ClassId,
    b1: ClassId,
    b12: ClassId,
    b2: ClassId,
    c: ClassId,
    /// `B1[Optional[int]]`
    b1_app: TypeId,
    /// `A1[Iterable[T], Union[T, str]]` with `T` owned by `B1`
    a1_from_b1: TypeId,
    /// `A2[int]`
    a2_app: TypeId,
}

/// ```text
/// A1[T, S]    A2[T]    B2
/// B1[T](A1[Iterable[T], Union[T, str]])
/// B12(A1[float, str], A2[int], B2)
/// C(B12, B1[Optional[int]], B2)
/// ```
fn diamond() -> Diamond {
    let mut table = ClassTable::new();
    let int = table.declare_class("int", &[]);
    let float = table.declare_class("float", &[]);
    let str_class = table.declare_class("str", &[]);
    let a1 = table.declare_class("A1", &["T", "S"]);
    let a2 = table.declare_class("A2", &["T"]);
    let b2 = table.declare_class("B2", &[]);
    let b1 = table.declare_class("B1", &["T"]);
    let b12 = table.declare_class("B12", &[]);
    let c = table.declare_class("C", &[]);

    let int_ty = table.class_type(int);
    let str_ty = table.class_type(str_class);
    let b1_t = table.param_type(table.find_param(b1, "T").unwrap());

    let types = table.types();
    let a1_from_b1 = table.application(
        a1,
        &[
            types.container("Iterable", &[b1_t]),
            types.union(&[b1_t, str_ty]),
        ],
    );
    let a1_concrete = table.application(a1, &[table.class_type(float), str_ty]);
    let a2_app = table.application(a2, &[int_ty]);
    let b1_app = table.application(b1, &[types.optional(int_ty)]);

    table.declare_base(b1, a1_from_b1).unwrap();
    table.declare_base(b12, a1_concrete).unwrap();
    table.declare_base(b12, a2_app).unwrap();
    table.declare_base(b12, table.class_type(b2)).unwrap();
    table.declare_base(c, table.class_type(b12)).unwrap();
    table.declare_base(c, b1_app).unwrap();
    table.declare_base(c, table.class_type(b2)).unwrap();

    Diamond {
        table,
        a1,
        a2,
        b1,
        b12,
        b2,
        c,
        b1_app,
        a1_from_b1,
        a2_app,
    }
}

#[test]
fn test_same_class_is_single_node_path() {
    let d = diamond();
    for with_generics in [false, true] {
        let path = find_path(&d.table, d.b12, d.b12, with_generics).unwrap();
        assert_eq!(path.nodes(), &[PathNode::Class(d.b12)]);
        assert_eq!(path.len(), 1);
    }
}

#[test]
fn test_not_subclass() {
    let d = diamond();
    assert_eq!(
        find_path(&d.table, d.a1, d.c, false),
        Err(LineageError::NotSubclass {
            descendant: d.a1,
            ancestor: d.c,
        })
    );
    // Siblings are unrelated in both directions.
    assert!(find_path(&d.table, d.b1, d.b12, true).is_err());
    assert!(find_path(&d.table, d.b12, d.b1, true).is_err());
}

#[test]
fn test_path_without_generics_follows_last_declared_base_first() {
    let d = diamond();
    // B2 is popped first (dead end), then B1 reaches A1 before B12 is expanded.
    let path = find_path(&d.table, d.c, d.a1, false).unwrap();
    assert_eq!(
        path.nodes(),
        &[PathNode::Class(d.c), PathNode::Class(d.b1), PathNode::Class(d.a1)]
    );
}

#[test]
fn test_path_with_generics_keeps_specialization_edges() {
    let d = diamond();
    let path = find_path(&d.table, d.c, d.a1, true).unwrap();
    assert_eq!(
        path.nodes(),
        &[
            PathNode::Class(d.c),
            PathNode::Application(d.b1_app),
            PathNode::Class(d.b1),
            PathNode::Application(d.a1_from_b1),
            PathNode::Class(d.a1),
        ]
    );
    assert_eq!(path.first(), Some(PathNode::Class(d.c)));
    assert_eq!(path.last(), Some(PathNode::Class(d.a1)));
    assert_eq!(path.classes().collect::<Vec<_>>(), vec![d.c, d.b1, d.a1]);
    assert_eq!(path.iter().filter(|node| node.is_application()).count(), 2);
}

#[test]
fn test_path_to_second_ancestor_goes_through_b12() {
    let d = diamond();

    let plain = find_path(&d.table, d.c, d.a2, false).unwrap();
    assert_eq!(
        plain.nodes(),
        &[PathNode::Class(d.c), PathNode::Class(d.b12), PathNode::Class(d.a2)]
    );

    let generic = find_path(&d.table, d.c, d.a2, true).unwrap();
    assert_eq!(
        generic.nodes(),
        &[
            PathNode::Class(d.c),
            PathNode::Class(d.b12),
            PathNode::Application(d.a2_app),
            PathNode::Class(d.a2),
        ]
    );
}

#[test]
fn test_direct_base() {
    let d = diamond();
    let path = find_path(&d.table, d.c, d.b2, false).unwrap();
    assert_eq!(path.nodes(), &[PathNode::Class(d.c), PathNode::Class(d.b2)]);
}

#[test]
fn test_node_claimed_by_first_branch_is_not_requeued() {
    // D(X, Y), Y(X), X(A): Y is expanded first but X was already queued from
    // D, so the path goes D -> X -> A rather than through Y.
    let mut table = ClassTable::new();
    let a = table.declare_class("A", &[]);
    let x = table.declare_class("X", &[]);
    let y = table.declare_class("Y", &[]);
    let d = table.declare_class("D", &[]);
    table.declare_base(x, table.class_type(a)).unwrap();
    table.declare_base(y, table.class_type(x)).unwrap();
    table.declare_base(d, table.class_type(x)).unwrap();
    table.declare_base(d, table.class_type(y)).unwrap();

    let path = find_path(&table, d, a, false).unwrap();
    assert_eq!(
        path.nodes(),
        &[PathNode::Class(d), PathNode::Class(x), PathNode::Class(a)]
    );
}

#[test]
fn test_finder_is_reusable() {
    let d = diamond();
    let finder = InheritancePathFinder::new(&d.table);
    let first = finder.find(d.c, d.a1, true).unwrap();
    let second = finder.find(d.c, d.a1, true).unwrap();
    assert_eq!(first, second);
}

/// Claims every pair of classes is related while exposing no bases.
struct Inconsistent<'a>(&'a ClassTable);

impl ClassDatabase for Inconsistent<'_> {
    fn types(&self) -> &TypeInterner {
        self.0.types()
    }
    fn class_name(&self, class: ClassId) -> Option<Atom> {
        self.0.class_name(class)
    }
    fn param_name(&self, param: TypeParamId) -> Option<Atom> {
        self.0.param_name(param)
    }
    fn type_params(&self, class: ClassId) -> &[TypeParamId] {
        self.0.type_params(class)
    }
    fn bases(&self, _class: ClassId) -> &[ClassId] {
        &[]
    }
    fn annotated_bases(&self, _class: ClassId) -> Option<&[TypeId]> {
        None
    }
    fn is_subclass(&self, _derived: ClassId, _base: ClassId) -> bool {
        true
    }
}

#[test]
fn test_exhausted_search_is_internal_invariant() {
    let d = diamond();
    let db = Inconsistent(&d.table);
    assert_eq!(
        find_path(&db, d.c, d.a1, true),
        Err(LineageError::InternalInvariant {
            descendant: d.c,
            ancestor: d.a1,
        })
    );
}
