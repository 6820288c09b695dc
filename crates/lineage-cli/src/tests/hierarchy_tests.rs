//! Tests for hierarchy file loading

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::hierarchy::{ClassEntry, Hierarchy, HierarchyFile};
use lineage_solver::{ClassDatabase, PathNode, TypeData, TypeFormatter, TypeId};

const CHAIN: &str = r#"
{
  "classes": [
    { "name": "A1", "params": ["T", "S"] },
    { "name": "B1", "params": ["T"], "bases": ["A1[Iterable[T], Union[T, str]]"] },
    { "name": "C", "bases": ["B1[Optional[int]]"] }
  ]
}
"#;

fn write_hierarchy(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("hierarchy.json");
    std::fs::write(&path, content).unwrap();
    path
}

fn entry(name: &str, params: &[&str], bases: &[&str]) -> ClassEntry {
    ClassEntry {
        name: name.to_string(),
        params: params.iter().map(|s| s.to_string()).collect(),
        bases: bases.iter().map(|s| s.to_string()).collect(),
        plain_bases: None,
    }
}

fn format(hierarchy: &Hierarchy, type_id: TypeId) -> String {
    TypeFormatter::new(hierarchy.table()).format(type_id)
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_hierarchy(temp_dir.path(), CHAIN);

    let hierarchy = Hierarchy::load(&path).unwrap();
    let table = hierarchy.table();
    let b1 = hierarchy.class("B1").unwrap();
    let c = hierarchy.class("C").unwrap();

    let annotated = table.annotated_bases(b1).unwrap();
    assert_eq!(annotated.len(), 1);
    assert_eq!(
        format(&hierarchy, annotated[0]),
        "A1[Iterable[T], Union[T, str]]"
    );
    assert_eq!(table.bases(c), &[b1]);
    assert!(table.is_subclass(c, hierarchy.class("A1").unwrap()));
}

#[test]
fn test_missing_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.json");
    let err = Hierarchy::load(&missing).err().unwrap();
    assert!(format!("{err:#}").contains("nope.json"));
}

#[test]
fn test_malformed_json() {
    assert!(Hierarchy::from_json("{ \"classes\": [ { \"nam\": \"A\" } ] }").is_err());
    assert!(Hierarchy::from_json("not json").is_err());
}

#[test]
fn test_leaf_classes_are_declared_implicitly() {
    let hierarchy = Hierarchy::from_json(CHAIN).unwrap();
    for name in ["int", "str"] {
        let class = hierarchy.class(name).unwrap();
        assert!(hierarchy.table().type_params(class).is_empty());
        assert!(hierarchy.table().bases(class).is_empty());
    }
    // Subscripted unknown names are containers, not classes.
    assert!(hierarchy.class("Iterable").is_err());
}

#[test]
fn test_own_parameters_shadow_classes() {
    let file = HierarchyFile {
        classes: vec![
            entry("T", &[], &[]),
            entry("Box", &["T"], &[]),
            entry("Holder", &["T"], &["Box[T]"]),
        ],
    };
    let hierarchy = Hierarchy::from_file(&file).unwrap();
    let holder = hierarchy.class("Holder").unwrap();
    let base = hierarchy.table().annotated_bases(holder).unwrap()[0];

    let Some(TypeData::Application { args, .. }) = hierarchy.table().types().lookup(base) else {
        panic!("expected an application base");
    };
    let arg = hierarchy.table().types().type_list(args)[0];
    assert!(matches!(
        hierarchy.table().types().lookup(arg),
        Some(TypeData::Param(_))
    ));
}

#[test]
fn test_composite_constructors() {
    let file = HierarchyFile {
        classes: vec![
            entry("Base", &["T"], &[]),
            entry("F", &["R"], &["Base[Callable[[int, Tuple[()]], Optional[R]]]"]),
        ],
    };
    let hierarchy = Hierarchy::from_file(&file).unwrap();
    let f = hierarchy.class("F").unwrap();
    let base = hierarchy.table().annotated_bases(f).unwrap()[0];
    assert_eq!(
        format(&hierarchy, base),
        "Base[Callable[[int, Tuple[()]], Optional[R]]]"
    );
}

#[test]
fn test_plain_bases_override() {
    let json = r#"
    {
      "classes": [
        { "name": "Base", "params": ["T"] },
        { "name": "Mixin" },
        {
          "name": "Child",
          "bases": ["Base[int]", "Mixin"],
          "plain_bases": ["Mixin", "Base"]
        }
      ]
    }
    "#;
    let hierarchy = Hierarchy::from_json(json).unwrap();
    let child = hierarchy.class("Child").unwrap();
    let mixin = hierarchy.class("Mixin").unwrap();
    let base = hierarchy.class("Base").unwrap();

    assert_eq!(hierarchy.table().bases(child), &[mixin, base]);
    // The disagreeing annotated list is ignored by the base-set policy.
    assert_eq!(
        lineage_solver::bases_of(hierarchy.table(), PathNode::Class(child), true).as_slice(),
        &[PathNode::Class(mixin), PathNode::Class(base)]
    );
}

#[test]
fn test_rejects_invalid_hierarchies() {
    let cases: Vec<Vec<ClassEntry>> = vec![
        // Wrong number of type arguments.
        vec![entry("A", &["T", "S"], &[]), entry("B", &[], &["A[int]"])],
        // Duplicate class.
        vec![entry("A", &[], &[]), entry("A", &[], &[])],
        // Declared after being used as a leaf.
        vec![entry("B", &[], &["A"]), entry("A", &[], &[])],
        // Duplicate parameter.
        vec![entry("A", &["T", "T"], &[])],
        // Subscripted parameter.
        vec![entry("A", &["T"], &["T[int]"])],
        // Composite as a base.
        vec![entry("A", &[], &["Union[int, str]"])],
        // Constructor without arguments.
        vec![entry("A", &["T"], &[]), entry("B", &[], &["A[Optional]"])],
        // Malformed Callable.
        vec![entry("A", &["T"], &[]), entry("B", &[], &["A[Callable[int, str]]"])],
        // Syntax error.
        vec![entry("A", &[], &["Base[int"])],
    ];

    for classes in cases {
        let names: Vec<_> = classes.iter().map(|c| c.name.clone()).collect();
        let file = HierarchyFile { classes };
        assert!(Hierarchy::from_file(&file).is_err(), "accepted {names:?}");
    }
}

#[test]
fn test_self_inheritance_is_rejected() {
    let file = HierarchyFile {
        classes: vec![entry("A", &["T"], &["A[int]"])],
    };
    let err = Hierarchy::from_file(&file).err().unwrap();
    assert!(format!("{err:#}").contains("itself"));

    let mut own_plain = entry("A", &[], &[]);
    own_plain.plain_bases = Some(vec!["A".to_string()]);
    let file = HierarchyFile {
        classes: vec![own_plain],
    };
    let err = Hierarchy::from_file(&file).err().unwrap();
    assert!(format!("{err:#}").contains("itself"));
}

#[test]
fn test_unknown_class_lookup() {
    let hierarchy = Hierarchy::from_json(CHAIN).unwrap();
    let err = hierarchy.class("Missing").unwrap_err();
    assert!(err.to_string().contains("Missing"));
}
