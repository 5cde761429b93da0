//! Transfer command implementation.

use anyhow::Result;
use humansize::{format_size, BINARY};

use crate::cli::TransferArgs;
use crate::config::TransferConfig;
use crate::transfer::{transfer_files, TransferOptions, TransferReport};

/// Run the transfer command.
pub fn run(args: TransferArgs, config: &TransferConfig) -> Result<()> {
    let options = build_options(&args, config);

    tracing::info!(
        source = %args.source.display(),
        target = %args.target.display(),
        ?options,
        "Transferring files"
    );

    let report = transfer_files(&args.source, &args.target, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }

    Ok(())
}

/// Merge command line flags over the config section.
pub fn build_options(args: &TransferArgs, config: &TransferConfig) -> TransferOptions {
    let mut options = config.to_options();
    if args.no_clobber {
        options.overwrite = false;
    }
    if args.create {
        options.create_target = true;
    }
    if let Some(jobs) = args.jobs {
        options.jobs = jobs;
    }
    options
}

/// Human readable summary of a finished transfer.
pub fn format_report(report: &TransferReport) -> String {
    let copied = report.copied.len();
    let mut output = format!(
        "Copied {} file{} ({}) from {} to {}\n",
        copied,
        if copied == 1 { "" } else { "s" },
        format_size(report.bytes_copied, BINARY),
        report.source.display(),
        report.target.display()
    );

    if !report.skipped.is_empty() {
        output.push_str(&format!(
            "Skipped {} existing: {}\n",
            report.skipped.len(),
            report.skipped.join(", ")
        ));
    }

    output
}
