//! One bound controller per element

use std::collections::HashMap;
use std::hash::Hash;

use crate::Result;

/// Result of [`Registry::attach`]
#[derive(Debug, PartialEq, Eq)]
pub enum Attach<'a, V> {
    /// A new entry was built and stored
    Created(&'a mut V),
    /// The key was already bound; nothing was built
    Existing(&'a mut V),
}

impl<'a, V> Attach<'a, V> {
    pub fn is_created(&self) -> bool {
        matches!(self, Attach::Created(_))
    }

    pub fn into_inner(self) -> &'a mut V {
        match self {
            Attach::Created(value) | Attach::Existing(value) => value,
        }
    }
}

/// Keyed store of bound controllers.
///
/// Attaching to a key that is already bound leaves the existing entry in
/// place and never calls the constructor.
#[derive(Debug)]
pub struct Registry<K, V> {
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V> Registry<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn attach<F>(&mut self, key: K, build: F) -> Result<Attach<'_, V>>
    where
        F: FnOnce() -> Result<V>,
    {
        use std::collections::hash_map::Entry;

        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(Attach::Existing(entry.into_mut())),
            Entry::Vacant(entry) => Ok(Attach::Created(entry.insert(build()?))),
        }
    }

    pub fn detach(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
