// tests/property/roundtrip_test.rs

//! Positional round-trip: rewriting and then stripping the prefix from the
//! identified key positions must exactly reconstruct the original argument
//! list, for arbitrary key names and values.

use proptest::prelude::*;
use redis_keyspace::core::protocol::Command;
use redis_keyspace::{KeyPrefixer, RequestContext};

const PREFIX: &str = "app1:";

fn texts(cmd: &Command) -> Vec<String> {
    cmd.args()
        .iter()
        .map(|a| String::from_utf8_lossy(&a.to_wire_bytes()).into_owned())
        .collect()
}

fn rewrite(parts: Vec<String>) -> Vec<String> {
    let mut cmd = Command::from_tokens(parts);
    KeyPrefixer::new(PREFIX).apply(&RequestContext::new(), &mut cmd);
    texts(&cmd)
}

fn stripped(arg: &str) -> String {
    arg.strip_prefix(PREFIX)
        .expect("key position should carry the prefix")
        .to_string()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_single_key_roundtrip(
        key in "[a-zA-Z0-9_:]{1,64}",
        value in ".{0,100}"
    ) {
        let original = vec!["set".to_string(), key, value];
        let result = rewrite(original.clone());

        prop_assert_eq!(result[0].as_str(), "set");
        prop_assert_eq!(stripped(&result[1]), original[1].clone());
        prop_assert_eq!(result[2].clone(), original[2].clone());
    }

    #[test]
    fn test_multi_key_roundtrip(
        keys in prop::collection::vec("[a-zA-Z0-9_:]{1,64}", 1..10)
    ) {
        let mut original = vec!["mget".to_string()];
        original.extend(keys);
        let result = rewrite(original.clone());

        prop_assert_eq!(result.len(), original.len());
        for (rewritten, key) in result[1..].iter().zip(&original[1..]) {
            prop_assert_eq!(stripped(rewritten), key.clone());
        }
    }

    #[test]
    fn test_alternating_key_value_roundtrip(
        pairs in prop::collection::vec(("[a-zA-Z0-9_:]{1,64}", ".{0,100}"), 1..8)
    ) {
        let mut original = vec!["mset".to_string()];
        for (key, value) in &pairs {
            original.push(key.clone());
            original.push(value.clone());
        }
        let result = rewrite(original.clone());

        for i in 1..original.len() {
            if i % 2 == 1 {
                prop_assert_eq!(stripped(&result[i]), original[i].clone());
            } else {
                prop_assert_eq!(result[i].clone(), original[i].clone());
            }
        }
    }

    #[test]
    fn test_count_prefixed_roundtrip(
        dest in "[a-zA-Z0-9_:]{1,64}",
        keys in prop::collection::vec("[a-zA-Z0-9_:]{1,64}", 1..8)
    ) {
        let mut original = vec!["zunionstore".to_string(), dest, keys.len().to_string()];
        original.extend(keys.clone());
        original.push("weights".to_string());
        for _ in &keys {
            original.push("1".to_string());
        }
        let result = rewrite(original.clone());

        prop_assert_eq!(stripped(&result[1]), original[1].clone());
        // The count itself is untouched.
        prop_assert_eq!(result[2].clone(), original[2].clone());
        for i in 3..3 + keys.len() {
            prop_assert_eq!(stripped(&result[i]), original[i].clone());
        }
        for i in 3 + keys.len()..original.len() {
            prop_assert_eq!(result[i].clone(), original[i].clone());
        }
    }

    #[test]
    fn test_blocking_pop_roundtrip(
        keys in prop::collection::vec("[a-zA-Z0-9_:]{1,64}", 1..8),
        timeout in 0u32..3600
    ) {
        let mut original = vec!["brpop".to_string()];
        original.extend(keys.clone());
        original.push(timeout.to_string());
        let result = rewrite(original.clone());

        for i in 1..=keys.len() {
            prop_assert_eq!(stripped(&result[i]), original[i].clone());
        }
        let last = result.len() - 1;
        prop_assert_eq!(result[last].clone(), original[last].clone());
    }
}
