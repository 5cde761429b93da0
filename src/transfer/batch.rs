use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{ArborError, Result};
use crate::names::{compare_names, display_name};
use crate::render::normalize_root;

use super::options::TransferOptions;

/// Result of copying a single file.
#[derive(Debug)]
pub(crate) enum TransferOutcome {
    Copied { name: String, bytes: u64 },
    Skipped { name: String, reason: String },
    Failed { name: String, error: ArborError },
}

/// Summary of a completed batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransferReport {
    pub source: PathBuf,
    pub target: PathBuf,
    /// Names of copied files, sorted by name
    pub copied: Vec<String>,
    /// Names of files left untouched in the target
    pub skipped: Vec<String>,
    pub bytes_copied: u64,
}

#[derive(Debug)]
struct PendingFile {
    name: String,
    path: PathBuf,
}

/// Copy every file of `source` into `target` as one batch.
///
/// Subdirectories are not descended into. All copies run to completion
/// before this returns; if any failed, the failure of the first file by name
/// is returned and files already copied stay in place.
pub fn transfer_files(
    source: impl AsRef<Path>,
    target: impl AsRef<Path>,
    options: &TransferOptions,
) -> Result<TransferReport> {
    let source = normalize_root(source.as_ref())?;
    let target = normalize_root(target.as_ref())?;

    let source_meta = fs::metadata(&source).map_err(|e| ArborError::from_io(&source, e))?;
    if !source_meta.is_dir() {
        return Err(ArborError::InvalidArgument(format!(
            "source is not a directory: {}",
            source.display()
        )));
    }

    prepare_target(&target, options.create_target)?;

    let source_canonical =
        fs::canonicalize(&source).map_err(|e| ArborError::from_io(&source, e))?;
    let target_canonical =
        fs::canonicalize(&target).map_err(|e| ArborError::from_io(&target, e))?;
    if source_canonical == target_canonical {
        return Err(ArborError::InvalidArgument(format!(
            "source and target are the same directory: {}",
            source.display()
        )));
    }

    let pending = list_files(&source)?;
    tracing::info!(
        source = %source.display(),
        target = %target.display(),
        files = pending.len(),
        "Starting batch transfer"
    );

    let outcomes = run_batch(&pending, &target, options)?;

    let mut report = TransferReport {
        source,
        target,
        ..Default::default()
    };
    let mut first_error = None;

    for outcome in outcomes {
        match outcome {
            TransferOutcome::Copied { name, bytes } => {
                report.bytes_copied += bytes;
                report.copied.push(name);
            }
            TransferOutcome::Skipped { name, reason } => {
                tracing::debug!(file = %name, %reason, "Skipped");
                report.skipped.push(name);
            }
            TransferOutcome::Failed { name, error } => {
                tracing::warn!(file = %name, %error, "Copy failed");
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(report),
    }
}

fn prepare_target(target: &Path, create: bool) -> Result<()> {
    match fs::metadata(target) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ArborError::InvalidArgument(format!(
            "target is not a directory: {}",
            target.display()
        ))),
        Err(e) if e.kind() == io::ErrorKind::NotFound && create => {
            tracing::debug!(path = %target.display(), "Creating target directory");
            fs::create_dir_all(target).map_err(|e| ArborError::from_io(target, e))
        }
        Err(e) => Err(ArborError::from_io(target, e)),
    }
}

fn list_files(source: &Path) -> Result<Vec<PendingFile>> {
    let read_dir = fs::read_dir(source).map_err(|e| ArborError::from_io(source, e))?;

    let mut files = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| ArborError::from_io(source, e))?;
        let path = entry.path();
        let metadata = fs::metadata(&path).map_err(|e| ArborError::from_io(&path, e))?;

        if !metadata.is_file() {
            tracing::debug!(path = %path.display(), "Not a regular file, skipping");
            continue;
        }

        files.push(PendingFile {
            name: display_name(&path),
            path,
        });
    }

    files.sort_by(|a, b| compare_names(&a.name, &b.name));
    Ok(files)
}

fn run_batch(
    pending: &[PendingFile],
    target: &Path,
    options: &TransferOptions,
) -> Result<Vec<TransferOutcome>> {
    let copy_all = || {
        pending
            .par_iter()
            .map(|file| copy_one(file, target, options.overwrite))
            .collect::<Vec<_>>()
    };

    if options.jobs == 0 {
        return Ok(copy_all());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()
        .map_err(|e| ArborError::Io {
            path: target.to_path_buf(),
            source: io::Error::other(e),
        })?;

    Ok(pool.install(copy_all))
}

fn copy_one(file: &PendingFile, target: &Path, overwrite: bool) -> TransferOutcome {
    let destination = target.join(&file.name);

    if !overwrite && destination.exists() {
        return TransferOutcome::Skipped {
            name: file.name.clone(),
            reason: "target exists".to_string(),
        };
    }

    match copy_contents(&file.path, &destination) {
        Ok(bytes) => TransferOutcome::Copied {
            name: file.name.clone(),
            bytes,
        },
        Err(error) => TransferOutcome::Failed {
            name: file.name.clone(),
            error,
        },
    }
}

/// Copy `source` to `destination`; errors name the side that failed.
fn copy_contents(source: &Path, destination: &Path) -> Result<u64> {
    let content = fs::read(source).map_err(|e| ArborError::from_io(source, e))?;
    let permissions = fs::metadata(source)
        .map_err(|e| ArborError::from_io(source, e))?
        .permissions();

    fs::write(destination, &content).map_err(|e| ArborError::from_io(destination, e))?;
    fs::set_permissions(destination, permissions)
        .map_err(|e| ArborError::from_io(destination, e))?;

    Ok(content.len() as u64)
}
