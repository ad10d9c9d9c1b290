//! MapKernel: the contract every map in this crate satisfies.
//!
//! The kernel is the minimal operation set: `add`, `remove`, `remove_any`,
//! `get` (and through it `has_key`/`value`), `size`, `clear`, iteration, and
//! `new_instance`. Everything else here is provided in terms of those.
//!
//! Preconditions are part of the contract. Breaking one (`add` of a key
//! already present, `remove`/`value` of a missing key, `remove_any` on an
//! empty map) panics with a `map contract violated` message; no
//! implementation may tolerate it silently.

use crate::contract::{violated, Violation};
use crate::pair::Pair;
use core::borrow::Borrow;
use core::hash::Hash;

pub trait MapKernel {
    type Key;
    type Value;

    /// Borrowing iterator over `(key, value)`. Visits each pair once; the
    /// order is unspecified and may differ between two equal maps.
    type Iter<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self: 'a;

    /// An empty map configured like `self`.
    fn new_instance(&self) -> Self
    where
        Self: Sized;

    /// Requires `key` to be absent.
    fn add(&mut self, key: Self::Key, value: Self::Value);

    /// Requires `key` to be present. Returns the removed pair.
    fn remove<Q>(&mut self, key: &Q) -> Pair<Self::Key, Self::Value>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Requires a non-empty map. Which pair comes out is unspecified.
    fn remove_any(&mut self) -> Pair<Self::Key, Self::Value>;

    fn get<Q>(&self, key: &Q) -> Option<&Self::Value>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    fn size(&self) -> usize;

    fn clear(&mut self);

    fn iter(&self) -> Self::Iter<'_>;

    fn has_key<Q>(&self, key: &Q) -> bool
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).is_some()
    }

    /// Requires `key` to be present.
    #[track_caller]
    fn value<Q>(&self, key: &Q) -> &Self::Value
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.get(key) {
            Some(v) => v,
            None => violated("value", Violation::MissingKey),
        }
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Take over the content of `source`, leaving it empty.
    fn transfer_from(&mut self, source: &mut Self)
    where
        Self: Sized,
    {
        let fresh = source.new_instance();
        *self = core::mem::replace(source, fresh);
    }

    /// Whether both maps hold exactly the same pairs. Works across
    /// implementations and never looks at internal layout.
    fn same_pairs<M>(&self, other: &M) -> bool
    where
        M: MapKernel<Key = Self::Key, Value = Self::Value> + ?Sized,
        Self::Key: Hash + Eq,
        Self::Value: PartialEq,
    {
        self.size() == other.size() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}
