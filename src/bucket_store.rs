//! BucketStore: separate-chaining storage under `ChainedMap`.
//!
//! Pairs live in chains (one `Vec` per bucket) addressed by
//! `hash(key) mod bucket_count`. Each entry keeps the `u64` hash computed
//! when it was inserted; rehashing relocates entries by that stored hash, so
//! `K: Hash` runs exactly once per inserted key.
//!
//! The store reports absence through `Option`/`Result` and never panics on
//! a missing or duplicate key; turning those into contract failures is the
//! kernel's job.

use crate::config::MapConfig;
use crate::contract::OperationGuard;
use crate::pair::Pair;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;

#[derive(Clone, Debug)]
struct Entry<K, V> {
    pair: Pair<K, V>,
    hash: u64,
}

type Chain<K, V> = Vec<Entry<K, V>>;

#[derive(Clone)]
pub(crate) struct BucketStore<K, V, S> {
    hasher: S,
    config: MapConfig,
    buckets: Vec<Chain<K, V>>,
    len: usize,
    // No bucket below this index holds an entry.
    first_nonempty: usize,
    guard: OperationGuard,
}

/// Reduce a key hash to a bucket index. High bits are folded in first so
/// hashers that leave entropy in the upper half still spread well.
#[inline]
fn slot_of(hash: u64, bucket_count: usize) -> usize {
    let folded = hash ^ (hash >> 32);
    (folded % bucket_count as u64) as usize
}

fn empty_buckets<K, V>(n: usize) -> Vec<Chain<K, V>> {
    std::iter::repeat_with(Vec::new).take(n).collect()
}

impl<K, V, S> BucketStore<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// `config` must already be validated.
    pub(crate) fn new(config: MapConfig, hasher: S) -> Self {
        debug_assert!(config.validate().is_ok());
        let n = config.initial_buckets;
        Self {
            hasher,
            config,
            buckets: empty_buckets(n),
            len: 0,
            first_nonempty: n,
            guard: OperationGuard::new(),
        }
    }

    pub(crate) fn hasher(&self) -> &S {
        &self.hasher
    }

    pub(crate) fn config(&self) -> &MapConfig {
        &self.config
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[cfg(test)]
    pub(crate) fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Bucket index `q` maps to under the current bucket count.
    #[cfg(test)]
    pub(crate) fn locate<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        let _op = self.guard.enter("locate");
        slot_of(self.hasher.hash_one(q), self.buckets.len())
    }

    pub(crate) fn find<Q>(&self, q: &Q) -> Option<&Pair<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _op = self.guard.enter("find");
        let hash = self.hasher.hash_one(q);
        self.buckets[slot_of(hash, self.buckets.len())]
            .iter()
            .find(|e| e.hash == hash && e.pair.key().borrow() == q)
            .map(|e| &e.pair)
    }

    /// Append `(key, value)` to its chain, growing the table if the load
    /// bound is crossed. A key already present is handed back untouched.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<(), Pair<K, V>> {
        let _op = self.guard.enter("insert");
        let hash = self.hasher.hash_one(&key);
        let slot = slot_of(hash, self.buckets.len());
        let chain = &mut self.buckets[slot];
        if chain.iter().any(|e| e.hash == hash && *e.pair.key() == key) {
            return Err(Pair::new(key, value));
        }
        chain.push(Entry {
            pair: Pair::new(key, value),
            hash,
        });
        self.len += 1;
        self.first_nonempty = self.first_nonempty.min(slot);

        if self.config.is_overloaded(self.len, self.buckets.len()) {
            let target = self
                .config
                .grown_bucket_count(self.len, self.buckets.len());
            // At the bucket ceiling the bound is given up rather than
            // rehashing into the same size on every add.
            if target > self.buckets.len() {
                redistribute(&mut self.buckets, target);
                self.first_nonempty = 0;
            }
        }
        Ok(())
    }

    pub(crate) fn remove<Q>(&mut self, q: &Q) -> Option<Pair<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _op = self.guard.enter("remove");
        let hash = self.hasher.hash_one(q);
        let slot = slot_of(hash, self.buckets.len());
        let chain = &mut self.buckets[slot];
        let pos = chain
            .iter()
            .position(|e| e.hash == hash && e.pair.key().borrow() == q)?;
        let entry = chain.remove(pos);
        self.len -= 1;
        // Capacity is never given back here.
        Some(entry.pair)
    }

    /// Take the last pair of the first non-empty bucket.
    pub(crate) fn remove_arbitrary(&mut self) -> Option<Pair<K, V>> {
        if self.len == 0 {
            return None;
        }
        let start = self.first_nonempty;
        let slot = start
            + self.buckets[start..]
                .iter()
                .position(|c| !c.is_empty())?;
        self.first_nonempty = slot;
        let entry = self.buckets[slot].pop()?;
        self.len -= 1;
        Some(entry.pair)
    }

    pub(crate) fn clear(&mut self) {
        log::trace!(
            "clearing {} pairs, keeping {} buckets",
            self.len,
            self.buckets.len()
        );
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
        self.first_nonempty = self.buckets.len();
    }

    /// Fresh empty store with the same policy and hasher.
    pub(crate) fn empty_like(&self) -> Self
    where
        S: Clone,
    {
        Self::new(self.config, self.hasher.clone())
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.len,
        }
    }

    pub(crate) fn into_pairs(self) -> IntoIter<K, V> {
        IntoIter {
            buckets: self.buckets.into_iter(),
            chain: Vec::new().into_iter(),
            remaining: self.len,
        }
    }

    #[cfg(test)]
    pub(crate) fn chain_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    /// Panics if any structural invariant is broken.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let n = self.buckets.len();
        let mut total = 0;
        for (i, chain) in self.buckets.iter().enumerate() {
            if !chain.is_empty() {
                assert!(i >= self.first_nonempty, "cursor skips bucket {i}");
            }
            for (j, e) in chain.iter().enumerate() {
                assert_eq!(self.hasher.hash_one(e.pair.key()), e.hash, "stale hash");
                assert_eq!(slot_of(e.hash, n), i, "entry in wrong bucket");
                assert!(
                    chain[j + 1..].iter().all(|o| o.pair.key() != e.pair.key()),
                    "duplicate key in chain {i}"
                );
            }
            total += chain.len();
        }
        assert_eq!(total, self.len, "len out of sync with chains");
        assert!(
            !self.config.is_overloaded(self.len, n),
            "load factor {} above bound",
            self.load_factor()
        );
    }
}

/// Move every entry into a table of `new_count` buckets.
fn redistribute<K, V>(buckets: &mut Vec<Chain<K, V>>, new_count: usize) {
    let old = std::mem::replace(buckets, empty_buckets(new_count));
    log::debug!(
        "rehashing {} pairs: {} -> {} buckets",
        old.iter().map(Vec::len).sum::<usize>(),
        old.len(),
        new_count
    );
    for entry in old.into_iter().flatten() {
        buckets[slot_of(entry.hash, new_count)].push(entry);
    }
}

/// Borrowing iterator over a map's pairs. Buckets are walked in index
/// order, chains front to back; that order is not part of the contract.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain<K, V>>,
    chain: core::slice::Iter<'a, Entry<K, V>>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            chain: self.chain.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.next() {
                self.remaining -= 1;
                return Some((e.pair.key(), e.pair.value()));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Owning iterator yielding each stored [`Pair`].
pub struct IntoIter<K, V> {
    buckets: std::vec::IntoIter<Chain<K, V>>,
    chain: std::vec::IntoIter<Entry<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = Pair<K, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.next() {
                self.remaining -= 1;
                return Some(e.pair);
            }
            self.chain = self.buckets.next()?.into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
