//! Type interning for structural deduplication.
//!
//! This module implements the interning engine that converts `TypeData`
//! values into lightweight `TypeId` handles.
//!
//! Benefits:
//! - O(1) type equality (just compare `TypeId` values)
//! - Memory efficient (each unique structure stored once)
//! - Substitution results are canonical: rebuilding `Iterable[Optional[int]]`
//!   twice yields the same `TypeId`, so repeated resolutions are bit-identical

use crate::types::{ClassId, CompositeKind, TypeData, TypeId, TypeListId, TypeParamId};
use lineage_common::interner::{Atom, ShardedInterner};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

const TYPE_LIST_INLINE: usize = 4;

pub(crate) type TypeListBuffer = SmallVec<[TypeId; TYPE_LIST_INLINE]>;

struct SliceInterner<T> {
    items: Vec<Arc<[T]>>,
    map: FxHashMap<Arc<[T]>, u32>,
}

impl<T> SliceInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        let empty: Arc<[T]> = Arc::from(Vec::new());
        let mut map = FxHashMap::default();
        map.insert(empty.clone(), 0);
        SliceInterner {
            items: vec![empty],
            map,
        }
    }

    fn intern(&mut self, items: &[T]) -> u32
    where
        T: Clone,
    {
        if items.is_empty() {
            return 0;
        }

        if let Some(&id) = self.map.get(items) {
            return id;
        }

        let arc: Arc<[T]> = Arc::from(items);
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<[T]>> {
        self.items.get(id as usize).cloned()
    }

    fn empty(&self) -> Arc<[T]> {
        self.items[0].clone()
    }
}

#[derive(Default)]
struct TypeStore {
    key_to_index: FxHashMap<TypeData, u32>,
    index_to_key: Vec<TypeData>,
}

/// Type interning table.
/// Thread-safe via `RwLock` so that substitution can intern through `&self`.
pub struct TypeInterner {
    types: RwLock<TypeStore>,
    type_lists: RwLock<SliceInterner<TypeId>>,
    /// String interner for class, parameter and container names
    pub string_interner: ShardedInterner,
}

impl TypeInterner {
    pub fn new() -> Self {
        TypeInterner {
            types: RwLock::new(TypeStore::default()),
            type_lists: RwLock::new(SliceInterner::new()),
            string_interner: {
                let interner = ShardedInterner::new();
                interner.intern_common();
                interner
            },
        }
    }

    /// Intern a string into an Atom.
    pub fn intern_string(&self, s: &str) -> Atom {
        self.string_interner.intern(s)
    }

    /// Resolve an Atom back to its string value.
    pub fn resolve_atom(&self, atom: Atom) -> String {
        self.string_interner.resolve(atom).to_string()
    }

    /// Resolve an Atom without allocating a new String.
    pub fn resolve_atom_ref(&self, atom: Atom) -> Arc<str> {
        self.string_interner.resolve(atom)
    }

    pub fn type_list(&self, id: TypeListId) -> Arc<[TypeId]> {
        let lists = self.type_lists.read().expect("type_lists lock poisoned");
        lists.get(id.0).unwrap_or_else(|| lists.empty())
    }

    /// Intern a `TypeData`, returning the existing handle for structurally
    /// identical data.
    pub fn intern(&self, key: TypeData) -> TypeId {
        {
            let store = self.types.read().expect("type store lock poisoned");
            if let Some(&index) = store.key_to_index.get(&key) {
                return TypeId(index);
            }
        }

        let mut store = self.types.write().expect("type store lock poisoned");
        if let Some(&index) = store.key_to_index.get(&key) {
            return TypeId(index);
        }

        let index = store.index_to_key.len() as u32;
        store.index_to_key.push(key);
        store.key_to_index.insert(key, index);
        TypeId(index)
    }

    /// Look up the `TypeData` for a given `TypeId`.
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        let store = self.types.read().expect("type store lock poisoned");
        store.index_to_key.get(id.0 as usize).copied()
    }

    /// Number of distinct interned types.
    pub fn len(&self) -> usize {
        self.types
            .read()
            .expect("type store lock poisoned")
            .index_to_key
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn intern_type_list(&self, members: &[TypeId]) -> TypeListId {
        let mut lists = self.type_lists.write().expect("type_lists lock poisoned");
        TypeListId(lists.intern(members))
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn class(&self, class: ClassId) -> TypeId {
        self.intern(TypeData::Class(class))
    }

    pub fn param(&self, param: TypeParamId) -> TypeId {
        self.intern(TypeData::Param(param))
    }

    /// `origin[args...]`. Arity is not checked here; `ClassTable` validates
    /// declared base edges.
    pub fn application(&self, origin: ClassId, args: &[TypeId]) -> TypeId {
        let args = self.intern_type_list(args);
        self.intern(TypeData::Application { origin, args })
    }

    pub fn composite(&self, kind: CompositeKind, members: &[TypeId]) -> TypeId {
        let members = self.intern_type_list(members);
        self.intern(TypeData::Composite { kind, members })
    }

    pub fn union(&self, members: &[TypeId]) -> TypeId {
        self.composite(CompositeKind::Union, members)
    }

    pub fn optional(&self, inner: TypeId) -> TypeId {
        self.composite(CompositeKind::Optional, &[inner])
    }

    pub fn tuple(&self, elements: &[TypeId]) -> TypeId {
        self.composite(CompositeKind::Tuple, elements)
    }

    /// `Callable[[params...], ret]`, stored as `params ++ [ret]`.
    pub fn callable(&self, params: &[TypeId], ret: TypeId) -> TypeId {
        let mut members: TypeListBuffer = params.iter().copied().collect();
        members.push(ret);
        self.composite(CompositeKind::Callable, &members)
    }

    /// A named container outside the class hierarchy, e.g. `Iterable[T]`.
    pub fn container(&self, name: &str, members: &[TypeId]) -> TypeId {
        let name = self.intern_string(name);
        self.composite(CompositeKind::Container(name), members)
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
