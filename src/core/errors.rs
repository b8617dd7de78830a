// src/core/errors.rs

//! Defines the primary error type for the crate.

use std::num::ParseIntError;
use thiserror::Error;

/// The main error enum for the keyspace layer.
///
/// The rewriting path itself is infallible; errors only arise at the edges
/// of the crate (configuration loading, wire encoding of a finished
/// command). Using `thiserror` allows for clean error definitions and
/// automatic `From` trait implementations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeyspaceError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Command has {0} arguments, exceeding the encoder limit")]
    OversizedCommand(usize),

    #[error("Value is not an integer or out of range")]
    NotAnInteger,
}

impl From<ParseIntError> for KeyspaceError {
    fn from(_: ParseIntError) -> Self {
        KeyspaceError::NotAnInteger
    }
}
