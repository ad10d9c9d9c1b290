#![cfg(test)]

// Property tests for BucketStore kept inside the crate so they can reach
// the structural layer and its invariant checker.

use crate::bucket_store::BucketStore;
use crate::config::MapConfig;
use crate::pair::Pair;
use crate::test_hashers::ConstBuildHasher;
use core::hash::BuildHasher;
use proptest::prelude::*;
use rustc_hash::FxBuildHasher;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations so shrinking converges on early keys.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Remove(usize),
    RemoveArbitrary,
    Find(usize),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            3 => idx.clone().prop_map(Op::Remove),
            2 => Just(Op::RemoveArbitrary),
            3 => idx.clone().prop_map(Op::Find),
            1 => Just(Op::Clear),
            1 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Small tables so growth happens often.
fn arb_config() -> impl Strategy<Value = MapConfig> {
    (1usize..=4, prop_oneof![Just(0.5), Just(1.0), Just(3.0)], 2usize..=4).prop_map(
        |(buckets, lf, growth)| {
            MapConfig::new()
                .with_initial_buckets(buckets)
                .with_max_load_factor(lf)
                .with_growth_factor(growth)
        },
    )
}

// Replays `ops` against the store and a std HashMap model. After every step:
// - store and model agree on len and on the key set;
// - `check_invariants` holds (placement by stored hash, no duplicate keys,
//   len in sync, load bound respected, removal cursor valid);
// - bucket count never decreases.
fn run<S: BuildHasher>(
    mut sut: BucketStore<String, i32, S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut buckets = sut.bucket_count();

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i].clone();
                let already = model.contains_key(&k);
                match sut.insert(k.clone(), v) {
                    Ok(()) => {
                        prop_assert!(!already, "insert must refuse a present key");
                        model.insert(k, v);
                    }
                    Err(back) => {
                        prop_assert!(already, "refusal only when the key exists");
                        prop_assert_eq!(back, Pair::new(k, v));
                    }
                }
            }
            Op::Remove(i) => {
                let k = pool[i].as_str();
                let got = sut.remove(k).map(Pair::into_parts);
                let want = model.remove_entry(k);
                prop_assert_eq!(got, want);
            }
            Op::RemoveArbitrary => match sut.remove_arbitrary() {
                Some(p) => {
                    let mv = model.remove(p.key());
                    prop_assert_eq!(mv.as_ref(), Some(p.value()), "pair must come from the map");
                }
                None => prop_assert!(model.is_empty()),
            },
            Op::Find(i) => {
                let k = pool[i].as_str();
                prop_assert_eq!(sut.find(k).map(Pair::value), model.get(k));
            }
            Op::Clear => {
                sut.clear();
                model.clear();
            }
            Op::Iterate => {
                let seen: Vec<(String, i32)> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                let unique: BTreeSet<_> = seen.iter().cloned().collect();
                prop_assert_eq!(seen.len(), unique.len(), "pair visited twice");
                let expected: BTreeSet<_> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(unique, expected);
            }
        }

        sut.check_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert!(sut.bucket_count() >= buckets, "bucket array shrank");
        buckets = sut.bucket_count();
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_store_state_machine(config in arb_config(), (pool, ops) in arb_scenario()) {
        run(BucketStore::new(config, FxBuildHasher), &pool, ops)?;
    }
}

// Property: same invariants under worst-case collisions; only `Eq`
// distinguishes keys.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_store_state_machine_with_collisions(config in arb_config(), (pool, ops) in arb_scenario()) {
        run(BucketStore::new(config, ConstBuildHasher), &pool, ops)?;
    }
}
