use anyhow::{Context, Result};
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::{Path, PathBuf};

/// Collects every file under `root` carrying the `from` extension. A
/// failed walk (e.g. an inaccessible directory) aborts the whole batch.
pub(crate) fn collect_files(root: &Path, from: &str) -> Result<Vec<PathBuf>> {
    debug!("Walking directory tree from root: {}", root.display());
    let mut files: Vec<PathBuf> = Vec::new();
    let walker = WalkBuilder::new(root).hidden(false).git_ignore(true).build();

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        if path.extension().and_then(|e| e.to_str()) == Some(from) {
            trace!("Matched file: {}", path.display());
            files.push(path.to_path_buf());
        }
    }

    // Stable batch contents; execution order is still unspecified
    files.sort();
    debug!("Collected {} files with extension .{}", files.len(), from);
    Ok(files)
}
