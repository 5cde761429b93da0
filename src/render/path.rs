use std::path::{Path, PathBuf};

use crate::error::{ArborError, Result};

/// Validate a root path and bring it to canonical lexical form.
///
/// Duplicate separators, `.` components and trailing separators are removed,
/// `..` is resolved lexically. The filesystem is not touched.
pub fn normalize_root(root: &Path) -> Result<PathBuf> {
    if root.as_os_str().is_empty() {
        return Err(ArborError::InvalidArgument(
            "root path must not be empty".to_string(),
        ));
    }

    Ok(path_clean::clean(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_root_is_invalid() {
        let err = normalize_root(Path::new("")).unwrap_err();
        assert!(matches!(err, ArborError::InvalidArgument(_)));
    }

    #[test]
    fn trailing_separator_is_stripped() {
        assert_eq!(
            normalize_root(Path::new("project/src/")).unwrap(),
            PathBuf::from("project/src")
        );
        assert_eq!(
            normalize_root(Path::new("/tmp/project//")).unwrap(),
            PathBuf::from("/tmp/project")
        );
    }

    #[test]
    fn dot_components_are_collapsed() {
        assert_eq!(
            normalize_root(Path::new("./project/./bin/../test")).unwrap(),
            PathBuf::from("project/test")
        );
        assert_eq!(normalize_root(Path::new(".")).unwrap(), PathBuf::from("."));
    }

    #[test]
    fn filesystem_root_is_kept() {
        assert_eq!(normalize_root(Path::new("/")).unwrap(), PathBuf::from("/"));
    }
}
