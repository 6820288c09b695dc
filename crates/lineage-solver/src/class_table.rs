//! In-memory class metadata.
//!
//! `ClassTable` is built once through `&mut self` (declare classes, then their
//! bases) and is read-only afterwards. It implements `ClassDatabase`, so the
//! path finder and resolver can run on it directly.
//!
//! Classes must be declared before they are used as bases, which keeps the
//! graph acyclic by construction.

use crate::db::ClassDatabase;
use crate::diagnostics::LineageError;
use crate::intern::TypeInterner;
use crate::types::{ClassId, CompositeKind, TypeData, TypeId, TypeParamId};
use lineage_common::interner::Atom;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

/// Stored definition of a class.
#[derive(Clone, Debug)]
pub struct ClassDef {
    pub name: Atom,
    pub type_params: Vec<TypeParamId>,
    /// Plain direct bases in declaration order.
    pub bases: Vec<ClassId>,
    /// Direct bases with type arguments, present once any base is an
    /// application.
    pub annotated_bases: Option<Vec<TypeId>>,
}

/// Stored definition of a declared type parameter.
#[derive(Clone, Debug)]
pub struct TypeParamDef {
    pub name: Atom,
    pub owner: ClassId,
}

pub struct ClassTable {
    interner: TypeInterner,
    classes: Vec<ClassDef>,
    params: Vec<TypeParamDef>,
    by_name: FxHashMap<Atom, ClassId>,
}

impl ClassTable {
    pub fn new() -> Self {
        ClassTable {
            interner: TypeInterner::new(),
            classes: Vec::new(),
            params: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// Declare a class with the given type parameter names.
    ///
    /// Each parameter gets a fresh `TypeParamId`, so `T` declared by two
    /// classes yields two unrelated parameters. Redeclaring a name shadows the
    /// earlier class for `find_class`; the earlier `ClassId` stays valid.
    pub fn declare_class(&mut self, name: &str, params: &[&str]) -> ClassId {
        let class = ClassId(self.classes.len() as u32);
        let name = self.interner.intern_string(name);

        let type_params = params
            .iter()
            .map(|param| {
                let id = TypeParamId(self.params.len() as u32);
                self.params.push(TypeParamDef {
                    name: self.interner.intern_string(param),
                    owner: class,
                });
                id
            })
            .collect();

        self.classes.push(ClassDef {
            name,
            type_params,
            bases: Vec::new(),
            annotated_bases: None,
        });
        if let Some(previous) = self.by_name.insert(name, class) {
            debug!(?previous, ?class, "class name redeclared");
        }
        class
    }

    /// Append a direct base to `class`.
    ///
    /// `base` must be a `Class` or an `Application` type. The plain base list
    /// receives the base's class; the annotated list is created as soon as an
    /// application appears and then mirrors every base.
    pub fn declare_base(&mut self, class: ClassId, base: TypeId) -> Result<(), LineageError> {
        let (base_class, is_application) = match self.interner.lookup(base) {
            Some(TypeData::Class(base_class)) => (base_class, false),
            Some(TypeData::Application { origin, args }) => {
                let expected = self.type_params(origin).len();
                let found = self.interner.type_list(args).len();
                if expected != found {
                    return Err(LineageError::ArityMismatch {
                        origin,
                        expected,
                        found,
                    });
                }
                (origin, true)
            }
            _ => return Err(LineageError::InvalidBase { class, base }),
        };

        let Some(def) = self.classes.get(class.0 as usize) else {
            return Err(LineageError::InvalidBase { class, base });
        };

        let annotated = match (&def.annotated_bases, is_application) {
            (Some(existing), _) => {
                let mut annotated = existing.clone();
                annotated.push(base);
                Some(annotated)
            }
            (None, true) => {
                let mut annotated: Vec<TypeId> = def
                    .bases
                    .iter()
                    .map(|&plain| self.interner.class(plain))
                    .collect();
                annotated.push(base);
                Some(annotated)
            }
            (None, false) => None,
        };

        let def = &mut self.classes[class.0 as usize];
        def.bases.push(base_class);
        def.annotated_bases = annotated;
        trace!(?class, ?base_class, is_application, "declared base");
        Ok(())
    }

    /// Replace the plain base list of `class`, leaving the annotated list
    /// untouched. Models reflection sources whose two lists disagree.
    pub fn set_plain_bases(&mut self, class: ClassId, bases: &[ClassId]) {
        if let Some(def) = self.classes.get_mut(class.0 as usize) {
            def.bases = bases.to_vec();
        }
    }

    pub fn find_class(&self, name: &str) -> Option<ClassId> {
        let atom = self.interner.string_interner.get(name)?;
        self.by_name.get(&atom).copied()
    }

    pub fn class_def(&self, class: ClassId) -> Option<&ClassDef> {
        self.classes.get(class.0 as usize)
    }

    pub fn param_def(&self, param: TypeParamId) -> Option<&TypeParamDef> {
        self.params.get(param.0 as usize)
    }

    /// Declared parameter `name` of `class`, if any.
    pub fn find_param(&self, class: ClassId, name: &str) -> Option<TypeParamId> {
        let atom = self.interner.string_interner.get(name)?;
        self.type_params(class)
            .iter()
            .copied()
            .find(|&param| self.param_name(param) == Some(atom))
    }

    /// Number of declared classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len() as u32).map(ClassId)
    }

    // =========================================================================
    // Type constructors
    // =========================================================================

    pub fn class_type(&self, class: ClassId) -> TypeId {
        self.interner.class(class)
    }

    pub fn param_type(&self, param: TypeParamId) -> TypeId {
        self.interner.param(param)
    }

    pub fn application(&self, origin: ClassId, args: &[TypeId]) -> TypeId {
        self.interner.application(origin, args)
    }

    pub fn composite(&self, kind: CompositeKind, members: &[TypeId]) -> TypeId {
        self.interner.composite(kind, members)
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassDatabase for ClassTable {
    fn types(&self) -> &TypeInterner {
        &self.interner
    }

    fn class_name(&self, class: ClassId) -> Option<Atom> {
        self.class_def(class).map(|def| def.name)
    }

    fn param_name(&self, param: TypeParamId) -> Option<Atom> {
        self.param_def(param).map(|def| def.name)
    }

    fn type_params(&self, class: ClassId) -> &[TypeParamId] {
        self.class_def(class)
            .map(|def| def.type_params.as_slice())
            .unwrap_or(&[])
    }

    fn bases(&self, class: ClassId) -> &[ClassId] {
        self.class_def(class)
            .map(|def| def.bases.as_slice())
            .unwrap_or(&[])
    }

    fn annotated_bases(&self, class: ClassId) -> Option<&[TypeId]> {
        self.class_def(class)?.annotated_bases.as_deref()
    }

    fn is_subclass(&self, derived: ClassId, base: ClassId) -> bool {
        if derived == base {
            return true;
        }

        let mut visited = FxHashSet::default();
        let mut stack = vec![derived];
        while let Some(current) = stack.pop() {
            for &parent in self.bases(current) {
                if parent == base {
                    return true;
                }
                if visited.insert(parent) {
                    stack.push(parent);
                }
            }
        }
        false
    }
}

#[cfg(test)]
#[path = "../tests/class_table_tests.rs"]
mod tests;
