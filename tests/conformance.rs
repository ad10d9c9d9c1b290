// Kernel conformance suite.
//
// Every scenario builds the map under test and an `AssocMap` reference
// from the same (key, value) arguments, runs one kernel call on the map
// under test, and asserts content equality against the expected reference
// plus the returned value. The suite is stamped out once per
// implementation/configuration via `conformance_suite!`.
use chain_map::{AssocMap, ChainedMap, MapConfig, MapKernel};
use std::collections::hash_map::RandomState;

type Ref = AssocMap<String, String>;

// Requires: args come in key/value pairs and keys are unique.
fn create_from_args<M>(mut map: M, args: &[&str]) -> M
where
    M: MapKernel<Key = String, Value = String>,
{
    assert!(args.len() % 2 == 0, "args must come in key/value pairs");
    for kv in args.chunks(2) {
        assert!(!map.has_key(kv[0]), "keys in args must be unique");
        map.add(kv[0].to_string(), kv[1].to_string());
    }
    map
}

fn reference(args: &[&str]) -> Ref {
    create_from_args(AssocMap::new(), args)
}

macro_rules! conformance_suite {
    ($name:ident, $ctor:expr) => {
        mod $name {
            use super::*;

            fn test_map(
                args: &[&str],
            ) -> impl MapKernel<Key = String, Value = String> + PartialEq<Ref> + std::fmt::Debug
            {
                create_from_args($ctor, args)
            }

            #[test]
            fn no_argument_constructor() {
                let m = test_map(&[]);
                assert_eq!(m, reference(&[]));
                assert!(m.is_empty());
            }

            #[test]
            fn add_empty() {
                let mut m = test_map(&[]);
                m.add("red".to_string(), "red".to_string());
                assert_eq!(m, reference(&["red", "red"]));
            }

            #[test]
            fn add_non_empty_one() {
                let mut m = test_map(&["blue", "blue"]);
                m.add("red".to_string(), "red".to_string());
                assert_eq!(m, reference(&["red", "red", "blue", "blue"]));
            }

            #[test]
            fn add_non_empty_more_than_one() {
                let mut m = test_map(&["blue", "blue", "green", "green"]);
                m.add("red".to_string(), "red".to_string());
                assert_eq!(
                    m,
                    reference(&["red", "red", "blue", "blue", "green", "green"])
                );
            }

            #[test]
            fn remove_leaving_empty() {
                let mut m = test_map(&["red", "red"]);
                let x = m.remove("red");
                assert_eq!(m, reference(&[]));
                assert_eq!(x.key(), "red");
                assert_eq!(x.value(), "red");
            }

            #[test]
            fn remove_leaving_non_empty_one() {
                let mut m = test_map(&["red", "red", "blue", "blue"]);
                let x = m.remove("red");
                assert_eq!(m, reference(&["blue", "blue"]));
                assert_eq!(x.key(), "red");
                assert_eq!(x.value(), "red");
            }

            #[test]
            fn remove_leaving_non_empty_more_than_one() {
                let mut m = test_map(&["red", "red", "blue", "blue", "green", "green"]);
                let x = m.remove("red");
                assert_eq!(m, reference(&["blue", "blue", "green", "green"]));
                assert_eq!(x.key(), "red");
                assert_eq!(x.value(), "red");
            }

            #[test]
            fn remove_any() {
                let mut m = test_map(&["red", "red", "green", "green", "blue", "blue"]);
                let mut expected = reference(&["red", "red", "green", "green", "blue", "blue"]);
                let pair = m.remove_any();
                assert!(expected.has_key(pair.key()));
                let removed = expected.remove(pair.key());
                assert_eq!(removed, pair);
                assert_eq!(m, expected);
            }

            #[test]
            fn remove_any_singleton() {
                let mut m = test_map(&["red", "red"]);
                let pair = m.remove_any();
                assert_eq!(pair.into_parts(), ("red".to_string(), "red".to_string()));
                assert_eq!(m, reference(&[]));
            }

            #[test]
            fn has_key() {
                let m = test_map(&["red", "red", "blue", "blue"]);
                let contains = m.has_key("red");
                assert_eq!(m, reference(&["red", "red", "blue", "blue"]));
                assert!(contains);
            }

            #[test]
            fn has_no_key() {
                let m = test_map(&["red", "red", "blue", "blue"]);
                let contains = m.has_key("yellow");
                assert_eq!(m, reference(&["red", "red", "blue", "blue"]));
                assert!(!contains);
            }

            #[test]
            fn size_empty() {
                let m = test_map(&[]);
                let i = m.size();
                assert_eq!(m, reference(&[]));
                assert_eq!(i, 0);
            }

            #[test]
            fn size_non_empty_one() {
                let m = test_map(&["red", "red"]);
                let i = m.size();
                assert_eq!(m, reference(&["red", "red"]));
                assert_eq!(i, 1);
            }

            #[test]
            fn size_non_empty_more_than_one() {
                let m = test_map(&["red", "red", "blue", "blue"]);
                let i = m.size();
                assert_eq!(m, reference(&["red", "red", "blue", "blue"]));
                assert_eq!(i, 2);
            }

            #[test]
            fn value_of_present_key() {
                let m = test_map(&["red", "crimson", "blue", "navy"]);
                assert_eq!(m.value("blue"), "navy");
                assert_eq!(m.get("red").map(String::as_str), Some("crimson"));
                assert_eq!(m.get("green"), None);
            }

            #[test]
            fn clear_and_transfer() {
                let mut m = test_map(&["red", "red", "blue", "blue"]);
                let mut other = m.new_instance();
                other.transfer_from(&mut m);
                assert_eq!(m, reference(&[]));
                assert_eq!(other, reference(&["red", "red", "blue", "blue"]));
                other.clear();
                assert_eq!(other, reference(&[]));
            }

            #[test]
            #[should_panic(expected = "map contract violated in `add`: key is already present")]
            fn add_duplicate_panics() {
                let mut m = test_map(&["red", "red"]);
                m.add("red".to_string(), "blue".to_string());
            }

            #[test]
            #[should_panic(expected = "map contract violated in `remove`: key is not present")]
            fn remove_missing_panics() {
                let mut m = test_map(&["red", "red"]);
                m.remove("blue");
            }

            #[test]
            #[should_panic(expected = "map contract violated in `remove_any`: map is empty")]
            fn remove_any_empty_panics() {
                let mut m = test_map(&[]);
                m.remove_any();
            }

            #[test]
            #[should_panic(expected = "map contract violated in `value`: key is not present")]
            fn value_missing_panics() {
                let m = test_map(&["red", "red"]);
                m.value("blue");
            }
        }
    };
}

conformance_suite!(chained_default, ChainedMap::<String, String>::new());
conformance_suite!(
    chained_single_bucket,
    ChainedMap::<String, String>::with_config(
        MapConfig::new()
            .with_initial_buckets(1)
            .with_max_load_factor(1.0)
    )
    .expect("valid config")
);
conformance_suite!(
    chained_random_state,
    ChainedMap::<String, String, RandomState>::default()
);
conformance_suite!(reference_model, AssocMap::<String, String>::new());
