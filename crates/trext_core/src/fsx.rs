//! Filesystem helpers shared by the transform engine.

use anyhow::{Context, Result};
use std::{fs, io, path::Path};

/// Saves a file, creating parent directories if necessary.
pub fn save_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
}

/// Treats a missing file or directory as already satisfied; any other error
/// propagates.
pub fn ignore_not_found<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_save_file_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deeply/nested/out.cjs");

        save_file(&path, "module.exports = {};").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "module.exports = {};");
    }

    #[test]
    fn test_save_file_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.cjs");

        save_file(&path, "first").unwrap();
        save_file(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_ignore_not_found_passes_values_through() {
        let result = ignore_not_found(Ok(42));
        assert_eq!(result.unwrap(), Some(42));
    }

    #[test]
    fn test_ignore_not_found_swallows_missing_files() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.map");

        let result = ignore_not_found(fs::remove_file(&missing));
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn test_ignore_not_found_propagates_other_errors() {
        let denied: io::Result<()> = Err(io::Error::new(ErrorKind::PermissionDenied, "denied"));
        let result = ignore_not_found(denied);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::PermissionDenied);
    }
}
