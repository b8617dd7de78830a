// src/core/rewrite/engine.rs

//! Applies a command's [`RewriteRule`] to its argument list, prefixing the
//! identified key slots in place.
//!
//! The rewriter never fails a request: an unknown command, a malformed
//! count, or a marker with no following argument all degrade to "rewrite
//! nothing for that slot" plus a diagnostic. Its failure mode is a key
//! left unprefixed, which the embedding application monitors through the
//! emitted diagnostics.

use crate::core::protocol::{Command, CommandArg};
use crate::core::rewrite::rule::{self, RewriteRule};
use tracing::{debug, warn};

/// What the rewriter did with one command. Purely informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// A rule matched; `keys` slots were prefixed.
    Rewritten { keys: usize },
    /// No rule is registered for the command; it passed through unchanged.
    Unsupported,
    /// The command carries no operands (`len <= 1`), so it cannot name a key.
    NoOperands,
    /// The request-scoped opt-out suppressed rewriting entirely.
    Bypassed,
}

/// Rewrites `cmd` in place, prepending `prefix` to every key argument.
///
/// Must be invoked exactly once per outbound command: reapplying doubles
/// the prefix. The argument buffer passed here must be the one that is
/// transmitted.
pub fn rewrite(prefix: &str, cmd: &mut Command) -> RewriteOutcome {
    if cmd.len() <= 1 {
        return RewriteOutcome::NoOperands;
    }

    let Some(name) = cmd.name() else {
        warn!("command name is not textual, passing through unprefixed");
        return RewriteOutcome::Unsupported;
    };

    let Some(rule) = rule::lookup(&name) else {
        warn!(command = %name, "no rewrite rule for command, passing through unprefixed");
        return RewriteOutcome::Unsupported;
    };

    let keys = apply_rule(prefix, rule, cmd.args_mut());
    RewriteOutcome::Rewritten { keys }
}

/// Dispatches on the rule shape. Returns the number of slots prefixed.
fn apply_rule(prefix: &str, rule: RewriteRule, args: &mut [CommandArg]) -> usize {
    match rule {
        RewriteRule::SingleKey => prefix_at(prefix, args, 1),

        RewriteRule::MultiKey { start } => prefix_range(prefix, args, start, args.len()),

        RewriteRule::MultiKeyExcludingTrailing { start, trailing } => {
            let end = args.len().saturating_sub(trailing);
            prefix_range(prefix, args, start, end)
        }

        RewriteRule::AlternatingKeyValue { start } => {
            let mut count = 0;
            let mut i = start;
            while i < args.len() {
                count += prefix_at(prefix, args, i);
                i += 2;
            }
            count
        }

        RewriteRule::FixedIndices(indices) => indices
            .iter()
            .map(|&i| prefix_at(prefix, args, i))
            .sum(),

        RewriteRule::CountPrefixedKeys {
            count_index,
            keys_start,
            dest_index,
        } => {
            let mut count = 0;
            if let Some(dest) = dest_index {
                count += prefix_at(prefix, args, dest);
            }
            match args.get(count_index).map(CommandArg::as_count) {
                Some(Ok(n)) if n > 0 => {
                    let end = keys_start.saturating_add(n as usize).min(args.len());
                    count += prefix_range(prefix, args, keys_start, end);
                }
                _ => {
                    debug!(count_index, "key count is missing or non-positive, no keys rewritten");
                }
            }
            count
        }

        RewriteRule::MatchPattern {
            key_index,
            scan_from,
        } => {
            let mut count = 0;
            if let Some(key) = key_index {
                count += prefix_at(prefix, args, key);
            }
            if let Some(marker) = find_token(args, scan_from, "match") {
                if marker + 1 < args.len() {
                    count += prefix_at(prefix, args, marker + 1);
                } else {
                    debug!("MATCH token has no following pattern, nothing to rewrite");
                }
            }
            count
        }

        RewriteRule::SortPatterns => {
            let mut count = prefix_at(prefix, args, 1);
            let mut i = 2;
            while i < args.len() {
                if args[i].token_eq("by") || args[i].token_eq("get") {
                    if i + 1 < args.len() {
                        // `GET #` requests the element itself, not a lookup
                        // by key pattern.
                        if !args[i + 1].token_eq("#") {
                            count += prefix_at(prefix, args, i + 1);
                        }
                        i += 2;
                        continue;
                    }
                    debug!("BY/GET token has no following pattern, nothing to rewrite");
                }
                i += 1;
            }
            count
        }

        RewriteRule::SubcommandKey { with_key } => {
            let qualifies = args[1]
                .as_token()
                .is_some_and(|sub| with_key.iter().any(|s| sub.eq_ignore_ascii_case(s)));
            if qualifies {
                prefix_at(prefix, args, 2)
            } else {
                0
            }
        }

        RewriteRule::StreamsKeys => {
            let Some(marker) = find_token(args, 1, "streams") else {
                debug!("STREAMS token not found, no keys rewritten");
                return 0;
            };
            let rest = args.len() - (marker + 1);
            if rest == 0 || rest % 2 != 0 {
                debug!(rest, "unbalanced key/id run after STREAMS, no keys rewritten");
                return 0;
            }
            prefix_range(prefix, args, marker + 1, marker + 1 + rest / 2)
        }

        RewriteRule::MigrateKeys => {
            let mut count = 0;
            // An empty key slot means the keys arrive via the KEYS token.
            if args.len() > 3 && !args[3].is_empty_text() {
                count += prefix_at(prefix, args, 3);
            }
            if let Some(marker) = find_token(args, 4, "keys") {
                count += prefix_range(prefix, args, marker + 1, args.len());
            }
            count
        }
    }
}

/// Prefixes the slot at `index` if it exists. Returns 1 on rewrite, 0 if
/// the argument list is shorter than the rule's declared shape.
fn prefix_at(prefix: &str, args: &mut [CommandArg], index: usize) -> usize {
    match args.get_mut(index) {
        Some(slot) => {
            *slot = slot.prefixed(prefix);
            1
        }
        None => 0,
    }
}

fn prefix_range(prefix: &str, args: &mut [CommandArg], start: usize, end: usize) -> usize {
    let mut count = 0;
    for i in start..end.min(args.len()) {
        count += prefix_at(prefix, args, i);
    }
    count
}

/// First index at or after `from` whose argument equals `token`
/// case-insensitively.
fn find_token(args: &[CommandArg], from: usize, token: &str) -> Option<usize> {
    (from..args.len()).find(|&i| args[i].token_eq(token))
}
