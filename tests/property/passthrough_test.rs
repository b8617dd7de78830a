// tests/property/passthrough_test.rs

//! Pass-through invariants: commands with no rule, commands with no
//! operands, and opted-out requests are never mutated.

use proptest::prelude::*;
use redis_keyspace::core::protocol::Command;
use redis_keyspace::core::rewrite::rule;
use redis_keyspace::{KeyPrefixer, RequestContext, RewriteOutcome};

const PREFIX: &str = "app1:";

fn texts(cmd: &Command) -> Vec<String> {
    cmd.args()
        .iter()
        .map(|a| String::from_utf8_lossy(&a.to_wire_bytes()).into_owned())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_unknown_commands_are_never_mutated(
        name in "[a-z]{3,12}",
        args in prop::collection::vec("[a-zA-Z0-9_:]{1,32}", 1..6)
    ) {
        prop_assume!(!rule::is_supported(&name));

        let mut parts = vec![name];
        parts.extend(args);
        let mut cmd = Command::from_tokens(parts.clone());

        let outcome = KeyPrefixer::new(PREFIX).apply(&RequestContext::new(), &mut cmd);
        prop_assert_eq!(outcome, RewriteOutcome::Unsupported);
        prop_assert_eq!(texts(&cmd), parts);
    }

    #[test]
    fn test_operand_less_commands_are_never_mutated(name in "[a-zA-Z]{1,16}") {
        let mut cmd = Command::from_tokens([name.as_str()]);
        let outcome = KeyPrefixer::new(PREFIX).apply(&RequestContext::new(), &mut cmd);
        prop_assert_eq!(outcome, RewriteOutcome::NoOperands);
        prop_assert_eq!(texts(&cmd), vec![name]);
    }

    #[test]
    fn test_opted_out_requests_are_never_mutated(
        key in "[a-zA-Z0-9_:]{1,64}",
        value in ".{0,100}"
    ) {
        let parts = vec!["set".to_string(), key, value];
        let mut cmd = Command::from_tokens(parts.clone());

        let outcome =
            KeyPrefixer::new(PREFIX).apply(&RequestContext::skip_namespacing(), &mut cmd);
        prop_assert_eq!(outcome, RewriteOutcome::Bypassed);
        prop_assert_eq!(texts(&cmd), parts);
    }
}
