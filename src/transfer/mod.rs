//! Batch file transfer between two directories

mod batch;
mod options;

pub use batch::{transfer_files, TransferReport};
pub use options::TransferOptions;
