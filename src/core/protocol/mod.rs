// src/core/protocol/mod.rs

pub mod command;
pub mod command_arg;

pub use command::Command;
pub use command_arg::CommandArg;
