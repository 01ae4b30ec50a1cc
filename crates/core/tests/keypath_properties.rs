//! Key-path property tests.
//!
//! The hand-written validator must agree with the reference pattern on
//! arbitrary input, and evaluation must never panic on any payload.

use benchcat_core::{fetch_subkey, is_valid_key_path, KeyPath};
use proptest::prelude::*;
use regex::Regex;
use serde_json::{json, Value};

const PATTERN: &str = r"^[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)*$";

fn payload() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9]{0,4}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-c0-2]", inner, 0..4)
                .prop_map(|m| json!(m)),
        ]
    })
}

proptest! {
    #[test]
    fn validator_matches_pattern_on_keylike_input(candidate in "[a-c0-9_.\\- ]{0,10}") {
        let pattern = Regex::new(PATTERN).unwrap();
        prop_assert_eq!(is_valid_key_path(&candidate), pattern.is_match(&candidate));
    }

    #[test]
    fn validator_matches_pattern_on_any_input(candidate in "\\PC{0,16}") {
        let pattern = Regex::new(PATTERN).unwrap();
        prop_assert_eq!(is_valid_key_path(&candidate), pattern.is_match(&candidate));
    }

    #[test]
    fn parse_agrees_with_validator(candidate in "[a-c_.]{0,8}") {
        prop_assert_eq!(KeyPath::parse(candidate.clone()).is_ok(), is_valid_key_path(&candidate));
    }

    #[test]
    fn fetch_never_panics(root in payload(), candidate in "[a-c0-2]{1,2}(\\.[a-c0-2]{1,2}){0,3}") {
        let path = KeyPath::parse(candidate).unwrap();
        let _ = fetch_subkey(&root, &path);
    }

    #[test]
    fn fetch_finds_what_was_stored(key in "[a-z_]{1,6}", inner in "[a-z_]{1,6}", value in any::<i64>()) {
        let mut nested = serde_json::Map::new();
        nested.insert(inner.clone(), Value::from(value));
        let mut outer = serde_json::Map::new();
        outer.insert(key.clone(), Value::Object(nested));
        let root = Value::Object(outer);
        let path = KeyPath::parse(format!("{key}.{inner}")).unwrap();
        prop_assert_eq!(fetch_subkey(&root, &path).as_number(), Some(value as f64));
    }
}
