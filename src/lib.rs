//! Arborescence - directory tree rendering and batch file transfer
//!
//! This crate provides functionality for:
//! - Rendering a directory hierarchy as an indented, box-drawn tree
//! - Copying every file of a directory into another as one batch

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
mod names;
pub mod render;
pub mod transfer;

// Re-export commonly used types
pub use config::Config;
pub use error::{ArborError, Result};
pub use render::{RenderOptions, TreeRenderer};
pub use transfer::{transfer_files, TransferOptions};
