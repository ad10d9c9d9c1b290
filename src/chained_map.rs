//! ChainedMap: the hashing kernel, a contract-checked map over a
//! separate-chaining `BucketStore`.

use crate::assoc_map::AssocMap;
use crate::bucket_store::BucketStore;
use crate::config::{ConfigError, MapConfig};
use crate::contract::{violated, Violation};
use crate::kernel::MapKernel;
use crate::pair::Pair;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use rustc_hash::FxBuildHasher;

pub use crate::bucket_store::{IntoIter, Iter};

/// Map with unique keys, backed by one bucket store that nothing else can
/// reach. The default hasher has a fixed seed, so bucket placement is
/// reproducible across instances and runs.
#[derive(Clone)]
pub struct ChainedMap<K, V, S = FxBuildHasher> {
    store: BucketStore<K, V, S>,
}

impl<K, V> ChainedMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(FxBuildHasher)
    }

    pub fn with_config(config: MapConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, FxBuildHasher)
    }
}

impl<K, V, S> ChainedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            store: BucketStore::new(MapConfig::default(), hasher),
        }
    }

    pub fn with_config_and_hasher(config: MapConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store: BucketStore::new(config, hasher),
        })
    }

    pub fn hasher(&self) -> &S {
        self.store.hasher()
    }

    pub fn config(&self) -> &MapConfig {
        self.store.config()
    }

    /// Insert a pair for a key that must not be present yet.
    #[track_caller]
    pub fn add(&mut self, key: K, value: V) {
        if self.store.insert(key, value).is_err() {
            violated("add", Violation::DuplicateKey);
        }
    }

    /// Remove and return the pair for a key that must be present.
    #[track_caller]
    pub fn remove<Q>(&mut self, key: &Q) -> Pair<K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.store.remove(key) {
            Some(p) => p,
            None => violated("remove", Violation::MissingKey),
        }
    }

    /// Remove and return some pair of a map that must not be empty.
    #[track_caller]
    pub fn remove_any(&mut self) -> Pair<K, V> {
        match self.store.remove_arbitrary() {
            Some(p) => p,
            None => violated("remove_any", Violation::Empty),
        }
    }

    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.store.find(key).is_some()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.store.find(key).map(Pair::value)
    }

    /// Value paired with a key that must be present.
    #[track_caller]
    pub fn value<Q>(&self, key: &Q) -> &V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.get(key) {
            Some(v) => v,
            None => violated("value", Violation::MissingKey),
        }
    }

    pub fn size(&self) -> usize {
        self.store.len()
    }

    /// Std-style alias of [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Drop every pair. Bucket capacity is kept.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.store.iter()
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &BucketStore<K, V, S> {
        &self.store
    }
}

impl<K, V, S> MapKernel for ChainedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone,
{
    type Key = K;
    type Value = V;
    type Iter<'a>
        = Iter<'a, K, V>
    where
        Self: 'a;

    fn new_instance(&self) -> Self {
        Self {
            store: self.store.empty_like(),
        }
    }

    #[track_caller]
    fn add(&mut self, key: K, value: V) {
        ChainedMap::add(self, key, value)
    }

    #[track_caller]
    fn remove<Q>(&mut self, key: &Q) -> Pair<K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        ChainedMap::remove(self, key)
    }

    #[track_caller]
    fn remove_any(&mut self) -> Pair<K, V> {
        ChainedMap::remove_any(self)
    }

    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        ChainedMap::get(self, key)
    }

    fn size(&self) -> usize {
        self.store.len()
    }

    fn clear(&mut self) {
        self.store.clear();
    }

    fn iter(&self) -> Iter<'_, K, V> {
        self.store.iter()
    }
}

impl<K, V, S> Default for ChainedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> fmt::Debug for ChainedMap<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Content equality: same size and every pair of `self` found in `other`.
// Bucket counts, hashers, and chain order play no part.
impl<K, V, S1, S2> PartialEq<ChainedMap<K, V, S2>> for ChainedMap<K, V, S1>
where
    K: Eq + Hash,
    V: PartialEq,
    S1: BuildHasher,
    S2: BuildHasher,
{
    fn eq(&self, other: &ChainedMap<K, V, S2>) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for ChainedMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> PartialEq<AssocMap<K, V>> for ChainedMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher + Clone,
{
    fn eq(&self, other: &AssocMap<K, V>) -> bool {
        self.same_pairs(other)
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for ChainedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = Pair<K, V>;
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.into_pairs()
    }
}

/// Adds every pair in turn; a repeated key is a contract violation.
impl<K, V, S> Extend<(K, V)> for ChainedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.add(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::default();
        m.extend(iter);
        m
    }
}
