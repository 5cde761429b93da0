use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::ColorMode;

/// Arborescence - render directory trees and transfer files in batches
#[derive(Parser, Debug)]
#[command(name = "arborescence")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the directory tree of a path
    Tree(TreeArgs),

    /// Copy every file of a directory into another directory
    Transfer(TransferArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Generate the man page
    Man,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Directory to render
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Draw with ASCII markers instead of box-drawing characters
    #[arg(long)]
    pub ascii: bool,

    /// When to colour the output
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    /// Keep the filesystem listing order
    #[arg(long)]
    pub no_sort: bool,

    /// Follow symbolic links into linked directories
    #[arg(short = 'L', long)]
    pub follow_symlinks: bool,

    /// Print directory and file counts after the tree
    #[arg(short, long)]
    pub summary: bool,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Directory whose files are copied
    pub source: PathBuf,

    /// Directory the files are copied into
    pub target: PathBuf,

    /// Leave files that already exist in the target untouched
    #[arg(short = 'n', long)]
    pub no_clobber: bool,

    /// Create the target directory if it is missing
    #[arg(long)]
    pub create: bool,

    /// Parallel copy jobs
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}
