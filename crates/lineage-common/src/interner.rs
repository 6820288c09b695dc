//! String Interner for class and type parameter names.
//!
//! Names are interned into a shared pool and passed around as u32 indices
//! (Atoms). Class tables routinely repeat the same handful of names (`T`,
//! `int`, `str`, `Union`), and comparisons become integer comparisons.

use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

/// An interned name.
///
/// The low `SHARD_BITS` bits select the shard, the rest index into it. Atoms
/// from different interners are not comparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// The empty name, pre-interned in every `ShardedInterner`.
    pub const NONE: Atom = Atom(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    fn new(shard: usize, slot: usize) -> Option<Atom> {
        let slot = u32::try_from(slot).ok().filter(|&slot| slot <= u32::MAX >> SHARD_BITS)?;
        Some(Atom((slot << SHARD_BITS) | (shard as u32 & SHARD_MASK)))
    }

    #[inline]
    fn shard(self) -> usize {
        (self.0 & SHARD_MASK) as usize
    }

    #[inline]
    fn slot(self) -> usize {
        (self.0 >> SHARD_BITS) as usize
    }
}

const SHARD_BITS: u32 = 4;
const SHARD_COUNT: usize = 1 << SHARD_BITS;
const SHARD_MASK: u32 = (SHARD_COUNT as u32) - 1;

/// Names most hierarchies mention, interned up front by `intern_common`.
const COMMON_STRINGS: &[&str] = &[
    // Composite constructors
    "Union",
    "Optional",
    "Tuple",
    "Callable",
    // Builtin leaf classes
    "object",
    "int",
    "float",
    "str",
    "bool",
    "bytes",
    "None",
    // Conventional parameter names
    "T",
    "S",
    "K",
    "V",
];

#[derive(Default)]
struct Shard {
    atoms: FxHashMap<Arc<str>, Atom>,
    names: Vec<Arc<str>>,
}

impl Shard {
    fn push(&mut self, index: usize, name: &str) -> Atom {
        let Some(atom) = Atom::new(index, self.names.len()) else {
            return Atom::NONE;
        };
        let name: Arc<str> = Arc::from(name);
        self.names.push(name.clone());
        self.atoms.insert(name, atom);
        atom
    }
}

/// Name interner safe to share between threads.
///
/// Names are spread over a fixed number of independently locked shards, so
/// concurrent readers resolving different names rarely touch the same lock.
pub struct ShardedInterner {
    shards: [RwLock<Shard>; SHARD_COUNT],
}

impl ShardedInterner {
    pub fn new() -> Self {
        let shards: [RwLock<Shard>; SHARD_COUNT] = std::array::from_fn(|_| RwLock::default());
        shards[0]
            .write()
            .expect("interner shard lock poisoned")
            .push(0, "");
        ShardedInterner { shards }
    }

    /// Intern `name`, returning the existing atom when it is already known.
    pub fn intern(&self, name: &str) -> Atom {
        if name.is_empty() {
            return Atom::NONE;
        }
        if let Some(atom) = self.get(name) {
            return atom;
        }

        let index = Self::shard_for(name);
        let mut shard = self.shards[index]
            .write()
            .expect("interner shard lock poisoned");
        match shard.atoms.get(name) {
            Some(&atom) => atom,
            None => shard.push(index, name),
        }
    }

    /// Look up an already interned name without inserting it.
    pub fn get(&self, name: &str) -> Option<Atom> {
        if name.is_empty() {
            return Some(Atom::NONE);
        }
        let shard = self.shards[Self::shard_for(name)]
            .read()
            .expect("interner shard lock poisoned");
        shard.atoms.get(name).copied()
    }

    /// The name behind `atom`, or `""` for an atom this interner never issued.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        self.try_resolve(atom).unwrap_or_else(|| Arc::from(""))
    }

    pub fn try_resolve(&self, atom: Atom) -> Option<Arc<str>> {
        let shard = self.shards.get(atom.shard())?;
        let shard = shard.read().expect("interner shard lock poisoned");
        shard.names.get(atom.slot()).cloned()
    }

    /// Number of interned names, counting the empty name.
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.read().expect("interner shard lock poisoned").names.len())
            .sum()
    }

    /// True while only the empty name is interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    pub fn intern_common(&self) {
        for name in COMMON_STRINGS {
            self.intern(name);
        }
    }

    #[inline]
    fn shard_for(name: &str) -> usize {
        let mut hasher = FxHasher::default();
        name.hash(&mut hasher);
        (hasher.finish() as usize) & (SHARD_COUNT - 1)
    }
}

impl Default for ShardedInterner {
    fn default() -> Self {
        Self::new()
    }
}
