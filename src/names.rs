//! Entry name helpers shared by rendering and transfer

use std::cmp::Ordering;
use std::path::Path;

/// Case-insensitive name order with byte order as tie-break.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Final component of `path` for display, falling back to the whole path.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
