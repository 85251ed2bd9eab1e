use dashmap::DashMap;
use log::trace;
use path_clean::clean;

use crate::options::TrextOptions;
use crate::resolver::{Resolution, resolve_silent};
use crate::types::Classification;

/// Thread-safe classification cache shared across a batch. Keyed by raw
/// specifier text; valid for one set of resolved options.
pub type ClassificationCache = DashMap<String, Classification>;

/// Classifies a specifier: absolute vs. relative, and whether it addresses
/// a directory (or a package root). Filesystem queries only; results are
/// cached.
pub fn classify(
    specifier: &str,
    options: &TrextOptions,
    cache: &ClassificationCache,
) -> Classification {
    if let Some(hit) = cache.get(specifier) {
        trace!("Cache hit for classification: '{}'", specifier);
        return *hit;
    }

    let classification = classify_uncached(specifier, options);
    cache.insert(specifier.to_string(), classification);
    classification
}

fn classify_uncached(specifier: &str, options: &TrextOptions) -> Classification {
    if !specifier.starts_with('.') {
        // Absolute specifiers are only worth a resolver round trip when the
        // absolute policy admits them at all
        if !options.absolute.admits(specifier) {
            return Classification { absolute: true, ..Classification::default() };
        }

        return match resolve_silent(specifier, &options.src, &options.direxts) {
            Resolution::PackageRoot(path) => {
                trace!("'{}' resolves to package root {}", specifier, path.display());
                Classification { absolute: true, package_root: true, ..Classification::default() }
            }
            Resolution::Directory(path) => {
                trace!("'{}' resolves to directory {}", specifier, path.display());
                Classification { absolute: true, directory: true, ..Classification::default() }
            }
            _ => Classification { absolute: true, ..Classification::default() },
        };
    }

    // Relative: strip the leading relative markers and test the remainder
    // against the source root
    let remainder: Vec<&str> =
        specifier.split('/').skip_while(|segment| *segment == "." || *segment == "..").collect();
    let candidate = clean(options.src.join(remainder.join("/")));
    let directory = candidate.is_dir();
    if directory {
        trace!("'{}' addresses directory {}", specifier, candidate.display());
    }

    Classification { directory, ..Classification::default() }
}
