// src/hook.rs

//! The interception boundary a client drives on its outbound path.
//!
//! The engine itself is synchronous and stateless; the async trait exists
//! so a client can await the hook point inside its dispatch pipeline. The
//! per-request opt-out travels in a [`RequestContext`] value owned by that
//! request, never in a field on the engine, so concurrent in-flight
//! requests sharing one engine can never observe each other's flag.

use crate::config::KeyspaceConfig;
use crate::core::protocol::Command;
use crate::core::rewrite::{self, RewriteOutcome};
use async_trait::async_trait;

/// Request-scoped data passed alongside each command or batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestContext {
    skip_namespacing: bool,
}

impl RequestContext {
    /// A context with rewriting enabled (the default).
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that suppresses rewriting for this request only. Use when
    /// a caller addresses shared, un-namespaced keys deliberately.
    pub fn skip_namespacing() -> Self {
        Self {
            skip_namespacing: true,
        }
    }

    pub fn is_namespacing_skipped(&self) -> bool {
        self.skip_namespacing
    }
}

/// The two interception points a client supplies: one per single command,
/// one per pipelined batch.
#[async_trait]
pub trait CommandInterceptor: Send + Sync {
    /// Rewrites one outbound command in place. Must be called exactly once
    /// per command, before the transport accepts it.
    async fn intercept(&self, ctx: &RequestContext, cmd: &mut Command) -> RewriteOutcome;

    /// Rewrites each command of a batch independently, in the batch's
    /// original order. An unsupported command never blocks prefixing of
    /// the remaining commands.
    async fn intercept_pipeline(
        &self,
        ctx: &RequestContext,
        batch: &mut [Command],
    ) -> Vec<RewriteOutcome>;
}

/// The rewriting engine: an immutable prefix plus the static rule table.
///
/// Cloning is cheap and every method takes `&self`; one instance may be
/// shared freely across tasks.
#[derive(Debug, Clone)]
pub struct KeyPrefixer {
    prefix: String,
}

impl KeyPrefixer {
    /// Builds an engine around a fixed prefix. Concatenation is plain:
    /// no delimiter is inserted beyond what the prefix itself embeds.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &KeyspaceConfig) -> Self {
        Self::new(config.prefix.clone())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Synchronous single-command rewrite. The async trait delegates here.
    pub fn apply(&self, ctx: &RequestContext, cmd: &mut Command) -> RewriteOutcome {
        if ctx.is_namespacing_skipped() {
            return RewriteOutcome::Bypassed;
        }
        rewrite::rewrite(&self.prefix, cmd)
    }

    /// Synchronous batch rewrite, one outcome per command.
    pub fn apply_batch(&self, ctx: &RequestContext, batch: &mut [Command]) -> Vec<RewriteOutcome> {
        if ctx.is_namespacing_skipped() {
            return vec![RewriteOutcome::Bypassed; batch.len()];
        }
        batch
            .iter_mut()
            .map(|cmd| rewrite::rewrite(&self.prefix, cmd))
            .collect()
    }
}

#[async_trait]
impl CommandInterceptor for KeyPrefixer {
    async fn intercept(&self, ctx: &RequestContext, cmd: &mut Command) -> RewriteOutcome {
        self.apply(ctx, cmd)
    }

    async fn intercept_pipeline(
        &self,
        ctx: &RequestContext,
        batch: &mut [Command],
    ) -> Vec<RewriteOutcome> {
        self.apply_batch(ctx, batch)
    }
}
