//! chain-map: a single-threaded map with unique keys, built on a
//! separate-chaining hash table behind a small, contract-checked kernel.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the hashing machinery and the public contract in separate
//!   layers so each can be reasoned about on its own.
//! - Layers:
//!   - BucketStore<K, V, S>: array of chains addressed by
//!     `hash(key) mod bucket_count`; owns every pair; grows by a fixed
//!     factor when the load bound is crossed; never shrinks. Reports
//!     absence with `Option`, never panics on a missing key.
//!   - ChainedMap<K, V, S>: the public hashing kernel. Turns store results
//!     into the kernel contract: duplicate `add`, missing-key `remove`, and
//!     `remove_any` on an empty map panic.
//!   - AssocMap<K, V>: an unordered association list implementing the same
//!     `MapKernel` trait with nothing but `K: Eq`. It is the reference side
//!     of differential tests.
//!
//! Constraints
//! - Single-threaded: maps are `Send` (given `Send` contents) but `!Sync`.
//! - Unique keys. Adding a present key is a caller defect, never an
//!   overwrite.
//! - Equality compares content only. Two equal maps may differ in bucket
//!   count, hasher, and iteration order.
//! - Lookups accept borrowed keys (`String` keys, `&str` queries).
//!
//! Hashing and growth
//! - The default hasher is `rustc_hash::FxBuildHasher`, which is unseeded:
//!   placement is reproducible across instances and runs. Any
//!   `BuildHasher` can be supplied instead.
//! - Each entry stores the `u64` hash of its key. Rehashing relocates by
//!   that value, so `K: Hash` runs once per inserted key.
//! - `MapConfig` sets the initial bucket count (16), the maximum load
//!   factor (0.75), and the growth factor (2). After every `add`,
//!   `size / bucket_count` is within the bound.
//!
//! Reentrancy
//! - The store only calls user code through `K: Hash` and `K: Eq` while
//!   probing. A debug-only guard panics if that code re-enters the same
//!   map; release builds carry no guard state.
//!
//! Notes and non-goals
//! - No ordering of keys and no stable iteration order across mutations.
//! - No persistence, no concurrent access.
//! - Pairs are immutable once stored; there is no `value_mut`.

mod assoc_map;
mod bucket_store;
mod bucket_store_proptest;
mod chained_map;
pub mod config;
mod contract;
mod kernel;
mod pair;
mod test_hashers;

// Public surface
pub use assoc_map::{AssocIter, AssocMap};
pub use chained_map::{ChainedMap, IntoIter, Iter};
pub use config::{ConfigError, MapConfig};
pub use contract::Violation;
pub use kernel::MapKernel;
pub use pair::Pair;
