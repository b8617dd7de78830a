// src/core/rewrite/rule.rs

//! Maps command names to the positions of their key arguments.
//!
//! Every supported command resolves to exactly one [`RewriteRule`] variant
//! describing how to locate its keys: a fixed index, a run of indices, a
//! count-governed run, or a position that only an option token or
//! sub-command reveals. Absence from the table is a valid outcome, not an
//! error: the command passes through unprefixed and the caller is told so.
//!
//! The table is built once at first use and is immutable afterwards, so
//! lookups are safe from any number of threads without synchronization.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// How to locate the key arguments of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteRule {
    /// Exactly argument index 1 is a key (`GET key`, `LPUSH key v ...`).
    SingleKey,
    /// All arguments from `start` to the end are keys (`MGET k1 k2 ...`,
    /// `BITOP op dest src ...`).
    MultiKey { start: usize },
    /// Arguments from `start` up to `len - trailing` are keys; the trailing
    /// arguments are not (`BLPOP k1 k2 timeout`).
    MultiKeyExcludingTrailing { start: usize, trailing: usize },
    /// Keys at `start`, `start + 2`, ... (`MSET k1 v1 k2 v2 ...`).
    AlternatingKeyValue { start: usize },
    /// An explicit set of absolute key indices (`RENAME src dst`,
    /// `GEOSEARCHSTORE dest src ...`).
    FixedIndices(&'static [usize]),
    /// A numeric argument at `count_index` gives the number of keys
    /// starting at `keys_start`; `dest_index` optionally names a fixed
    /// destination key preceding the count (`ZUNIONSTORE dest 3 k1 k2 k3`).
    CountPrefixedKeys {
        count_index: usize,
        keys_start: usize,
        dest_index: Option<usize>,
    },
    /// Scan-family shape: an optional fixed key at `key_index`, then the
    /// argument following the first `MATCH` token at or after `scan_from`
    /// is a key-shaped pattern.
    MatchPattern {
        key_index: Option<usize>,
        scan_from: usize,
    },
    /// SORT shape: key at index 1, then every `BY`/`GET` token is followed
    /// by a key-shaped pattern. The literal `#` placeholder denotes the
    /// element itself and passes through unprefixed.
    SortPatterns,
    /// Sub-command-qualified shape: argument 1 names a sub-command and
    /// argument 2 is a key only when the sub-command is on the allowlist
    /// (`XGROUP CREATE key ...` yes, `XGROUP HELP` no).
    SubcommandKey { with_key: &'static [&'static str] },
    /// XREAD/XREADGROUP shape: after the `STREAMS` token the remaining
    /// arguments split evenly into keys then IDs; the first half are keys.
    StreamsKeys,
    /// MIGRATE shape: the key at index 3 may legitimately be empty (keys
    /// follow via the `KEYS` token instead); prefix it only when non-empty,
    /// then prefix every argument after the `KEYS` token.
    MigrateKeys,
}

/// Commands whose only key is the first argument.
const SINGLE_KEY_COMMANDS: &[&str] = &[
    // string / bitmap
    "get", "set", "append", "getrange", "setrange", "strlen", "getset", "setnx", "setex",
    "psetex", "getdel", "getex", "getbit", "setbit", "bitcount", "bitpos", "bitfield",
    // list
    "rpush", "lpush", "rpushx", "lpushx", "lpop", "rpop", "llen", "lrange", "lindex", "lset",
    "linsert", "lrem", "ltrim", "lpos",
    // set
    "sadd", "srem", "sismember", "smismember", "smembers", "scard", "spop", "srandmember",
    // hash (HSCAN's MATCH pattern names fields, not keys, so it stays here)
    "hset", "hsetnx", "hmset", "hget", "hgetall", "hvals", "hlen", "hexists", "hdel", "hkeys",
    "hincrby", "hincrbyfloat", "hscan", "hstrlen", "hrandfield",
    // sorted set
    "zadd", "zrange", "zrangebyscore", "zrevrangebyscore", "zrem", "zrevrange", "zcard",
    "zscore", "zrank", "zrevrank", "zincrby", "zrangebylex", "zrevrangebylex",
    "zremrangebyrank", "zremrangebyscore", "zremrangebylex", "zpopmin", "zpopmax", "zcount",
    "zlexcount", "zmscore",
    // hyperloglog
    "pfadd",
    // geo
    "geoadd", "geopos", "geodist", "geosearch", "georadius", "georadiusbymember",
    // stream
    "xadd", "xlen", "xrange", "xrevrange", "xtrim", "xdel", "xack", "xpending", "xclaim",
    "xautoclaim",
    // counters
    "incr", "incrby", "incrbyfloat", "decr", "decrby",
    // generic key
    "expire", "pexpire", "expireat", "pexpireat", "persist", "ttl", "pttl", "type", "dump",
    "restore",
];

/// Commands whose arguments from index 1 to the end are all keys.
const MULTI_KEY_COMMANDS: &[&str] = &[
    "mget", "del", "exists", "touch", "unlink", "watch", "pfmerge", "pfcount", "sdiff",
    "sinter", "sunion", "sdiffstore", "sinterstore", "sunionstore",
];

/// Blocking pops: keys from index 1, then a trailing timeout.
const BLOCKING_POP_COMMANDS: &[&str] = &["brpop", "blpop", "brpoplpush", "bzpopmin", "bzpopmax"];

/// Two-key commands with both keys at fixed positions 1 and 2.
const TWO_KEY_COMMANDS: &[&str] = &[
    "rename", "renamenx", "rpoplpush", "lmove", "blmove", "smove", "copy", "zrangestore",
    "geosearchstore",
];

/// `numkeys key [key ...]` with the count at index 1.
const COUNTED_KEY_COMMANDS: &[&str] = &["zdiff", "zinter", "zunion", "sintercard", "lmpop", "zmpop"];

/// XINFO sub-commands that carry a key at index 2.
const XINFO_WITH_KEY: &[&str] = &["stream", "groups", "consumers"];

/// XGROUP sub-commands that carry a key at index 2 (HELP does not).
const XGROUP_WITH_KEY: &[&str] = &["create", "setid", "destroy", "createconsumer", "delconsumer"];

/// OBJECT sub-commands that carry a key at index 2.
const OBJECT_WITH_KEY: &[&str] = &["refcount", "encoding", "idletime", "freq"];

static RULES: Lazy<HashMap<&'static str, RewriteRule>> = Lazy::new(|| {
    let mut table = HashMap::new();

    insert_all(&mut table, SINGLE_KEY_COMMANDS, RewriteRule::SingleKey);
    insert_all(&mut table, MULTI_KEY_COMMANDS, RewriteRule::MultiKey { start: 1 });
    insert(&mut table, "bitop", RewriteRule::MultiKey { start: 2 });
    insert_all(
        &mut table,
        BLOCKING_POP_COMMANDS,
        RewriteRule::MultiKeyExcludingTrailing { start: 1, trailing: 1 },
    );
    insert(&mut table, "mset", RewriteRule::AlternatingKeyValue { start: 1 });
    insert(&mut table, "msetnx", RewriteRule::AlternatingKeyValue { start: 1 });
    insert_all(&mut table, TWO_KEY_COMMANDS, RewriteRule::FixedIndices(&[1, 2]));

    insert_all(
        &mut table,
        COUNTED_KEY_COMMANDS,
        RewriteRule::CountPrefixedKeys {
            count_index: 1,
            keys_start: 2,
            dest_index: None,
        },
    );
    // Blocking multi-key pops place a timeout before the count.
    for name in ["blmpop", "bzmpop"] {
        insert(
            &mut table,
            name,
            RewriteRule::CountPrefixedKeys {
                count_index: 2,
                keys_start: 3,
                dest_index: None,
            },
        );
    }
    // Scripting: script/digest first, then numkeys.
    for name in ["eval", "evalsha"] {
        insert(
            &mut table,
            name,
            RewriteRule::CountPrefixedKeys {
                count_index: 2,
                keys_start: 3,
                dest_index: None,
            },
        );
    }
    // Store variants: destination at index 1, then the counted source run.
    for name in ["zunionstore", "zinterstore", "zdiffstore"] {
        insert(
            &mut table,
            name,
            RewriteRule::CountPrefixedKeys {
                count_index: 2,
                keys_start: 3,
                dest_index: Some(1),
            },
        );
    }

    insert(
        &mut table,
        "scan",
        RewriteRule::MatchPattern {
            key_index: None,
            scan_from: 2,
        },
    );
    for name in ["sscan", "zscan"] {
        insert(
            &mut table,
            name,
            RewriteRule::MatchPattern {
                key_index: Some(1),
                scan_from: 3,
            },
        );
    }

    insert(&mut table, "sort", RewriteRule::SortPatterns);
    insert(&mut table, "sort_ro", RewriteRule::SortPatterns);

    insert(&mut table, "xinfo", RewriteRule::SubcommandKey { with_key: XINFO_WITH_KEY });
    insert(&mut table, "xgroup", RewriteRule::SubcommandKey { with_key: XGROUP_WITH_KEY });
    insert(&mut table, "object", RewriteRule::SubcommandKey { with_key: OBJECT_WITH_KEY });

    insert(&mut table, "xread", RewriteRule::StreamsKeys);
    insert(&mut table, "xreadgroup", RewriteRule::StreamsKeys);

    insert(&mut table, "migrate", RewriteRule::MigrateKeys);

    table
});

fn insert(table: &mut HashMap<&'static str, RewriteRule>, name: &'static str, rule: RewriteRule) {
    let previous = table.insert(name, rule);
    assert!(previous.is_none(), "duplicate rewrite rule for '{name}'");
}

fn insert_all(
    table: &mut HashMap<&'static str, RewriteRule>,
    names: &[&'static str],
    rule: RewriteRule,
) {
    for &name in names {
        insert(table, name, rule);
    }
}

/// Looks up the rewrite rule for a canonical (ASCII-lowercase) command
/// name. `None` means the command is unsupported and must pass through
/// unchanged.
pub fn lookup(name: &str) -> Option<RewriteRule> {
    RULES.get(name).copied()
}

/// Whether a rule is registered for the given canonical command name.
pub fn is_supported(name: &str) -> bool {
    RULES.contains_key(name)
}
