//! Subcommand implementations

pub mod transfer;
pub mod tree;
