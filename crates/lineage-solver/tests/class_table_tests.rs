use super::*;

#[test]
fn test_declare_class_allocates_fresh_params() {
    let mut table = ClassTable::new();
    let a = table.declare_class("A", &["T", "S"]);
    let b = table.declare_class("B", &["T"]);

    assert_eq!(table.type_params(a).len(), 2);
    assert_eq!(table.type_params(b).len(), 1);
    // Same name, different identity.
    assert_ne!(table.type_params(a)[0], table.type_params(b)[0]);
    assert_eq!(
        table.param_name(table.type_params(a)[0]),
        table.param_name(table.type_params(b)[0])
    );
    assert_eq!(table.param_def(table.type_params(b)[0]).map(|d| d.owner), Some(b));
}

#[test]
fn test_find_class_and_param() {
    let mut table = ClassTable::new();
    let a = table.declare_class("A", &["T", "S"]);

    assert_eq!(table.find_class("A"), Some(a));
    assert_eq!(table.find_class("Missing"), None);
    assert_eq!(table.find_param(a, "S"), Some(table.type_params(a)[1]));
    assert_eq!(table.find_param(a, "U"), None);
}

#[test]
fn test_redeclared_name_shadows() {
    let mut table = ClassTable::new();
    let first = table.declare_class("Node", &[]);
    let second = table.declare_class("Node", &["T"]);

    assert_ne!(first, second);
    assert_eq!(table.find_class("Node"), Some(second));
    assert!(table.class_def(first).is_some());
    assert_eq!(table.len(), 2);
}

#[test]
fn test_plain_bases_keep_no_annotations() {
    let mut table = ClassTable::new();
    let a = table.declare_class("A", &[]);
    let b = table.declare_class("B", &[]);
    let c = table.declare_class("C", &[]);

    table.declare_base(c, table.class_type(a)).unwrap();
    table.declare_base(c, table.class_type(b)).unwrap();

    assert_eq!(table.bases(c), &[a, b]);
    assert_eq!(table.annotated_bases(c), None);
}

#[test]
fn test_application_base_creates_annotated_list() {
    let mut table = ClassTable::new();
    let int = table.declare_class("int", &[]);
    let plain = table.declare_class("Plain", &[]);
    let generic = table.declare_class("Generic", &["T"]);
    let child = table.declare_class("Child", &[]);

    table.declare_base(child, table.class_type(plain)).unwrap();
    let app = table.application(generic, &[table.class_type(int)]);
    table.declare_base(child, app).unwrap();
    let plain_ty = table.class_type(plain);

    assert_eq!(table.bases(child), &[plain, generic]);
    assert_eq!(table.annotated_bases(child), Some(&[plain_ty, app][..]));

    // Later plain bases are mirrored into the annotated list.
    let other = table.declare_class("Other", &[]);
    table.declare_base(child, table.class_type(other)).unwrap();
    assert_eq!(table.bases(child), &[plain, generic, other]);
    assert_eq!(table.annotated_bases(child).map(|b| b.len()), Some(3));
}

#[test]
fn test_arity_mismatch_is_rejected() {
    let mut table = ClassTable::new();
    let int = table.declare_class("int", &[]);
    let pair = table.declare_class("Pair", &["K", "V"]);
    let child = table.declare_class("Child", &[]);

    let app = table.application(pair, &[table.class_type(int)]);
    let err = table.declare_base(child, app).unwrap_err();
    assert_eq!(
        err,
        LineageError::ArityMismatch {
            origin: pair,
            expected: 2,
            found: 1,
        }
    );
    assert!(table.bases(child).is_empty());
}

#[test]
fn test_non_class_base_is_rejected() {
    let mut table = ClassTable::new();
    let int = table.declare_class("int", &[]);
    let child = table.declare_class("Child", &["T"]);

    let union = table.composite(CompositeKind::Union, &[table.class_type(int)]);
    assert_eq!(
        table.declare_base(child, union),
        Err(LineageError::InvalidBase { class: child, base: union })
    );

    let param = table.param_type(table.type_params(child)[0]);
    assert!(matches!(
        table.declare_base(child, param),
        Err(LineageError::InvalidBase { .. })
    ));
}

#[test]
fn test_is_subclass_is_reflexive_and_transitive() {
    let mut table = ClassTable::new();
    let a = table.declare_class("A", &[]);
    let b = table.declare_class("B", &[]);
    let c = table.declare_class("C", &[]);
    let unrelated = table.declare_class("Unrelated", &[]);

    table.declare_base(b, table.class_type(a)).unwrap();
    table.declare_base(c, table.class_type(b)).unwrap();

    assert!(table.is_subclass(a, a));
    assert!(table.is_subclass(c, b));
    assert!(table.is_subclass(c, a));
    assert!(!table.is_subclass(a, c));
    assert!(!table.is_subclass(c, unrelated));
}

#[test]
fn test_is_subclass_follows_application_bases() {
    let mut table = ClassTable::new();
    let int = table.declare_class("int", &[]);
    let base = table.declare_class("Base", &["T"]);
    let child = table.declare_class("Child", &[]);
    let app = table.application(base, &[table.class_type(int)]);
    table.declare_base(child, app).unwrap();

    assert!(table.is_subclass(child, base));
}

#[test]
fn test_set_plain_bases_overrides_only_plain_list() {
    let mut table = ClassTable::new();
    let int = table.declare_class("int", &[]);
    let base = table.declare_class("Base", &["T"]);
    let other = table.declare_class("Other", &[]);
    let child = table.declare_class("Child", &[]);
    let app = table.application(base, &[table.class_type(int)]);
    table.declare_base(child, app).unwrap();

    table.set_plain_bases(child, &[other, base]);
    assert_eq!(table.bases(child), &[other, base]);
    assert_eq!(table.annotated_bases(child), Some(&[app][..]));
}

#[test]
fn test_unknown_class_reads_as_empty() {
    let table = ClassTable::new();
    let ghost = ClassId(99);
    assert!(table.is_empty());
    assert!(table.type_params(ghost).is_empty());
    assert!(table.bases(ghost).is_empty());
    assert_eq!(table.annotated_bases(ghost), None);
    assert_eq!(table.class_name(ghost), None);
}
