// src/core/protocol/command_arg.rs

//! The untyped argument value carried in an outbound command buffer.
//!
//! Client APIs assemble arguments in whatever shape they were built with:
//! byte payloads, counters, scores, timeouts. The rewriter only ever needs
//! a textual rendering of the slots it prefixes, so the variants stay
//! untyped and coercion to wire bytes is lossless.

use crate::core::KeyspaceError;
use bytes::{BufMut, Bytes, BytesMut};

/// A single positional argument of an outbound command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandArg {
    /// Raw bulk payload. Keys, values, and option keywords all travel as
    /// bulk data on the wire; the payload is not required to be UTF-8.
    Bulk(Bytes),
    /// An integer argument (counts, cursors, timeouts, offsets).
    Int(i64),
    /// A floating-point argument (scores, coordinates).
    Double(f64),
}

impl CommandArg {
    /// Renders the argument as the exact bytes its wire encoding carries.
    pub fn to_wire_bytes(&self) -> Bytes {
        match self {
            CommandArg::Bulk(b) => b.clone(),
            CommandArg::Int(i) => {
                let mut buf = itoa::Buffer::new();
                Bytes::copy_from_slice(buf.format(*i).as_bytes())
            }
            CommandArg::Double(d) => {
                let mut buf = ryu::Buffer::new();
                Bytes::copy_from_slice(buf.format(*d).as_bytes())
            }
        }
    }

    /// Textual view used for case-insensitive option-token comparison.
    /// Numeric arguments and non-UTF-8 bulk data never match a token.
    pub fn as_token(&self) -> Option<&str> {
        match self {
            CommandArg::Bulk(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Reads the argument as an integer count, accepting both the `Int`
    /// variant and a textual bulk rendering.
    pub fn as_count(&self) -> Result<i64, KeyspaceError> {
        match self {
            CommandArg::Int(i) => Ok(*i),
            CommandArg::Bulk(b) => {
                let text = std::str::from_utf8(b).map_err(|_| KeyspaceError::NotAnInteger)?;
                Ok(text.parse()?)
            }
            CommandArg::Double(_) => Err(KeyspaceError::NotAnInteger),
        }
    }

    /// True for a zero-length bulk argument. An empty slot is meaningful in
    /// some command grammars (MIGRATE's key position).
    pub fn is_empty_text(&self) -> bool {
        matches!(self, CommandArg::Bulk(b) if b.is_empty())
    }

    /// Case-insensitive comparison against an option keyword.
    pub fn token_eq(&self, token: &str) -> bool {
        self.as_token()
            .is_some_and(|s| s.eq_ignore_ascii_case(token))
    }

    /// Returns a copy of this argument with `prefix` prepended to its
    /// textual rendering. The result is always a bulk argument.
    pub fn prefixed(&self, prefix: &str) -> CommandArg {
        let text = self.to_wire_bytes();
        let mut buf = BytesMut::with_capacity(prefix.len() + text.len());
        buf.put_slice(prefix.as_bytes());
        buf.put_slice(&text);
        CommandArg::Bulk(buf.freeze())
    }
}

impl From<&str> for CommandArg {
    fn from(s: &str) -> Self {
        CommandArg::Bulk(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for CommandArg {
    fn from(s: String) -> Self {
        CommandArg::Bulk(Bytes::from(s.into_bytes()))
    }
}

impl From<Bytes> for CommandArg {
    fn from(b: Bytes) -> Self {
        CommandArg::Bulk(b)
    }
}

impl From<&[u8]> for CommandArg {
    fn from(b: &[u8]) -> Self {
        CommandArg::Bulk(Bytes::copy_from_slice(b))
    }
}

impl From<i64> for CommandArg {
    fn from(i: i64) -> Self {
        CommandArg::Int(i)
    }
}

impl From<f64> for CommandArg {
    fn from(d: f64) -> Self {
        CommandArg::Double(d)
    }
}
