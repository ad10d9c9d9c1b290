//! AssocMap: association-sequence implementation of the kernel.
//!
//! Pairs sit in one unordered `Vec` and every lookup is a linear scan using
//! only `K: Eq`. It shares no code with the hashing path, which makes it the
//! reference side of differential tests against `ChainedMap`.

use crate::contract::{require, violated, Violation};
use crate::kernel::MapKernel;
use crate::pair::Pair;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use core::iter::FusedIterator;

#[derive(Clone)]
pub struct AssocMap<K, V> {
    pairs: Vec<Pair<K, V>>,
}

impl<K: Eq, V> AssocMap<K, V> {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.pairs.iter().position(|p| p.key().borrow() == key)
    }
}

impl<K: Eq, V> Default for AssocMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AssocIter<'a, K, V> {
    it: core::slice::Iter<'a, Pair<K, V>>,
}

impl<'a, K, V> Iterator for AssocIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|p| (p.key(), p.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V> ExactSizeIterator for AssocIter<'_, K, V> {}
impl<K, V> FusedIterator for AssocIter<'_, K, V> {}

impl<K: Eq, V> MapKernel for AssocMap<K, V> {
    type Key = K;
    type Value = V;
    type Iter<'a>
        = AssocIter<'a, K, V>
    where
        Self: 'a;

    fn new_instance(&self) -> Self {
        Self::new()
    }

    #[track_caller]
    fn add(&mut self, key: K, value: V) {
        require(self.position(&key).is_none(), "add", Violation::DuplicateKey);
        self.pairs.push(Pair::new(key, value));
    }

    #[track_caller]
    fn remove<Q>(&mut self, key: &Q) -> Pair<K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.position(key) {
            Some(i) => self.pairs.swap_remove(i),
            None => violated("remove", Violation::MissingKey),
        }
    }

    #[track_caller]
    fn remove_any(&mut self) -> Pair<K, V> {
        match self.pairs.pop() {
            Some(p) => p,
            None => violated("remove_any", Violation::Empty),
        }
    }

    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.position(key).map(|i| self.pairs[i].value())
    }

    fn size(&self) -> usize {
        self.pairs.len()
    }

    fn clear(&mut self) {
        self.pairs.clear();
    }

    fn iter(&self) -> AssocIter<'_, K, V> {
        AssocIter {
            it: self.pairs.iter(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AssocMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.pairs.iter().map(|p| (p.key(), p.value())))
            .finish()
    }
}

// Set comparison by scanning; storage order is irrelevant.
impl<K: Eq, V: PartialEq> PartialEq for AssocMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.pairs.len() == other.pairs.len()
            && self
                .pairs
                .iter()
                .all(|p| other.position(p.key()).map(|i| other.pairs[i].value()) == Some(p.value()))
    }
}

impl<K: Eq, V: Eq> Eq for AssocMap<K, V> {}

impl<K, V, S> PartialEq<crate::ChainedMap<K, V, S>> for AssocMap<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
    S: core::hash::BuildHasher + Clone,
{
    fn eq(&self, other: &crate::ChainedMap<K, V, S>) -> bool {
        self.same_pairs(other)
    }
}

impl<K: Eq, V> FromIterator<(K, V)> for AssocMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        for (k, v) in iter {
            m.add(k, v);
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: the reference model honors the same kernel contract.
    #[test]
    fn kernel_basics() {
        let mut m: AssocMap<String, i32> = AssocMap::new();
        m.add("a".to_string(), 1);
        m.add("b".to_string(), 2);
        assert_eq!(m.size(), 2);
        assert!(m.has_key("a"));
        assert_eq!(*m.value("b"), 2);
        assert_eq!(m.remove("a"), Pair::new("a".to_string(), 1));
        assert!(!m.has_key("a"));
        assert_eq!(m.remove_any(), Pair::new("b".to_string(), 2));
        assert!(m.is_empty());
    }

    /// Invariant: equality is order-independent.
    #[test]
    fn equality_is_set_based() {
        let a: AssocMap<&str, i32> = [("x", 1), ("y", 2)].into_iter().collect();
        let b: AssocMap<&str, i32> = [("y", 2), ("x", 1)].into_iter().collect();
        let c: AssocMap<&str, i32> = [("y", 2), ("x", 9)].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    #[should_panic(expected = "map contract violated in `add`: key is already present")]
    fn duplicate_add_panics() {
        let mut m: AssocMap<&str, i32> = AssocMap::new();
        m.add("x", 1);
        m.add("x", 2);
    }
}
