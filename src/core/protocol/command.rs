// src/core/protocol/command.rs

//! The outbound command buffer the rewriter operates on, plus an
//! encode-only RESP serializer for handing a finished command to a
//! raw-connection client. Reply decoding is the client's concern and is
//! deliberately absent here.

use crate::core::KeyspaceError;
use crate::core::protocol::CommandArg;
use bytes::{BufMut, BytesMut};

/// The CRLF (Carriage Return, Line Feed) sequence terminating RESP lines.
const CRLF: &[u8] = b"\r\n";

/// Encoder limit on the number of elements in one command array.
const MAX_COMMAND_ELEMENTS: usize = 1_024 * 1_024;

/// An ordered argument list where index 0 is the command name
/// (case-insensitive) and subsequent indices are positional arguments
/// whose meaning is command-specific.
///
/// The rewriter mutates this buffer in place; the same buffer observed by
/// the classifier must be the one transmitted, since rewriting has no
/// effect if performed on a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    args: Vec<CommandArg>,
}

impl Command {
    pub fn new(args: Vec<CommandArg>) -> Self {
        Self { args }
    }

    /// Builds a command from textual tokens. Convenient for clients that
    /// assemble commands from strings, and for tests.
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CommandArg>,
    {
        Self {
            args: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// The ASCII-lowercased command name, if the name slot holds text.
    pub fn name(&self) -> Option<String> {
        self.args
            .first()
            .and_then(CommandArg::as_token)
            .map(|s| s.to_ascii_lowercase())
    }

    pub fn args(&self) -> &[CommandArg] {
        &self.args
    }

    pub fn args_mut(&mut self) -> &mut [CommandArg] {
        &mut self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Encodes the command as a RESP array of bulk strings, the form every
    /// Redis-protocol server accepts for requests.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, KeyspaceError> {
        if self.args.len() > MAX_COMMAND_ELEMENTS {
            return Err(KeyspaceError::OversizedCommand(self.args.len()));
        }

        let mut dst = BytesMut::new();
        dst.put_u8(b'*');
        dst.extend_from_slice(self.args.len().to_string().as_bytes());
        dst.extend_from_slice(CRLF);
        for arg in &self.args {
            let payload = arg.to_wire_bytes();
            dst.put_u8(b'$');
            dst.extend_from_slice(payload.len().to_string().as_bytes());
            dst.extend_from_slice(CRLF);
            dst.extend_from_slice(&payload);
            dst.extend_from_slice(CRLF);
        }
        Ok(dst.to_vec())
    }
}
