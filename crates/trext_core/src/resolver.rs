use log::trace;
use std::path::{Path, PathBuf};

/// Outcome of silently resolving a bare specifier through node_modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Specifier lands on a directory carrying its own package.json
    PackageRoot(PathBuf),
    /// Specifier lands on a directory exposing an index entry point
    Directory(PathBuf),
    /// Specifier lands on a file
    File(PathBuf),
    Unresolved,
}

/// Resolves a bare specifier by walking up from `start_dir` looking for
/// `node_modules/{package}`. Never errors; anything that cannot be located
/// is `Unresolved`.
pub fn resolve_silent(specifier: &str, start_dir: &Path, direxts: &[String]) -> Resolution {
    let (package, subpath) = split_package(specifier);
    if package.is_empty() {
        return Resolution::Unresolved;
    }
    trace!("Resolving '{}' (package '{}') from {}", specifier, package, start_dir.display());

    let mut current_dir = Some(start_dir);
    while let Some(dir) = current_dir {
        let package_dir = dir.join("node_modules").join(package);
        if package_dir.is_dir() {
            return resolve_in_package(&package_dir, subpath, direxts);
        }
        current_dir = dir.parent();
    }

    trace!("Failed to resolve '{}'", specifier);
    Resolution::Unresolved
}

/// Splits a bare specifier into its package name and optional subpath.
/// Scoped packages keep their first two segments: `@scope/pkg/lib` splits
/// into `@scope/pkg` and `lib`.
fn split_package(specifier: &str) -> (&str, Option<&str>) {
    let segments = if specifier.starts_with('@') { 2 } else { 1 };
    let mut index = 0;
    for _ in 0..segments {
        match specifier[index..].find('/') {
            Some(offset) => index += offset + 1,
            None => return (specifier, None),
        }
    }
    (&specifier[..index - 1], Some(&specifier[index..]))
}

fn resolve_in_package(package_dir: &Path, subpath: Option<&str>, direxts: &[String]) -> Resolution {
    let target = match subpath {
        Some(subpath) if !subpath.is_empty() => package_dir.join(subpath),
        _ => package_dir.to_path_buf(),
    };

    if target.is_dir() {
        if target.join("package.json").is_file() {
            trace!("Resolved package root at {}", target.display());
            return Resolution::PackageRoot(target);
        }
        if has_index(&target, direxts) {
            trace!("Resolved directory with index at {}", target.display());
            return Resolution::Directory(target);
        }
        return Resolution::Unresolved;
    }

    if target.is_file() {
        return Resolution::File(target);
    }

    // Extensionless file references
    for ext in direxts {
        let candidate = PathBuf::from(format!("{}{}", target.display(), ext));
        if candidate.is_file() {
            return Resolution::File(candidate);
        }
    }

    Resolution::Unresolved
}

fn has_index(dir: &Path, direxts: &[String]) -> bool {
    direxts.iter().any(|ext| dir.join(format!("index{}", ext)).is_file())
}
