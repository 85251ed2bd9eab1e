use anyhow::{Context, Result, anyhow};
use log::{debug, info, trace};
use oxc_allocator::Allocator;
use oxc_ast_visit::VisitMut;
use oxc_codegen::{Codegen, CodegenOptions};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    thread,
};
use trext_core::{ClassificationCache, TrextOptions, fsx};

use crate::{collector, parser, rewriter::Trextel, sourcemap, types::TrextFileResult};

/// Converts every `*.{from}` file under `root`. Files are transformed in
/// parallel with no ordering guarantee; the first failure rejects the whole
/// batch (already persisted files stay on disk).
pub fn trext(root: &Path, options: &TrextOptions) -> Result<Vec<TrextFileResult>> {
    let filenames = collector::collect_files(root, &options.from)?;
    info!("Converting {} files under {}", filenames.len(), root.display());

    let cache: Arc<ClassificationCache> = Arc::new(ClassificationCache::new());

    filenames
        .par_iter()
        .map(|filename| {
            debug!("Thread {:?} converting: {}", thread::current().id(), filename.display());
            trext_file_cached(filename, options, &cache)
        })
        .collect()
}

/// Transforms a single file: rewrites its specifiers, renames its
/// extension, relocates its source map, and replaces it on disk.
pub fn trext_file(filename: &Path, options: &TrextOptions) -> Result<TrextFileResult> {
    trext_file_cached(filename, options, &ClassificationCache::new())
}

fn trext_file_cached(
    filename: &Path,
    options: &TrextOptions,
    cache: &ClassificationCache,
) -> Result<TrextFileResult> {
    let source = fs::read_to_string(filename)
        .with_context(|| format!("Failed to read {}", filename.display()))?;

    let source_type = parser::source_type_for(filename);
    let allocator = Allocator::default();
    let mut program = parser::parse(&allocator, &source, source_type, filename)?;

    let mut visitor = Trextel::new(&allocator, options, cache);
    visitor.visit_program(&mut program);
    let rewrites = visitor.rewrites();
    trace!("Rewrote {} specifiers in {}", rewrites, filename.display());

    let output = output_filename(filename, options)?;

    let codegen_options = CodegenOptions {
        source_map_path: options.source_maps.enabled().then(|| filename.to_path_buf()),
        ..CodegenOptions::default()
    };
    let generated = Codegen::new().with_options(codegen_options).build(&program);

    let map = match generated.map {
        Some(map) => Some(
            serde_json::from_str(&map.to_json_string())
                .with_context(|| format!("Invalid source map for {}", filename.display()))?,
        ),
        None => None,
    };

    let mut result = TrextFileResult {
        input: filename.to_path_buf(),
        output,
        code: generated.code,
        map,
        source_type,
        rewrites,
    };

    // Handle source map
    sourcemap::adjust(options, &mut result)?;

    // Save file, update file permissions, and remove the old file
    fsx::save_file(&result.output, &result.code)?;
    let permissions = fs::metadata(filename)
        .with_context(|| format!("Failed to stat {}", filename.display()))?
        .permissions();
    fs::set_permissions(&result.output, permissions)
        .with_context(|| format!("Failed to set permissions on {}", result.output.display()))?;
    fs::remove_file(filename)
        .with_context(|| format!("Failed to remove {}", filename.display()))?;

    debug!("Converted {} -> {}", filename.display(), result.output.display());
    Ok(result)
}

/// Applies the extension search pattern to the filename. A filename the
/// pattern does not change is a configuration error: persisting and then
/// deleting the same path would lose the file.
fn output_filename(filename: &Path, options: &TrextOptions) -> Result<PathBuf> {
    let name = filename.to_string_lossy();
    let renamed = options.pattern.rename(&name, &options.to);
    if renamed == name {
        return Err(anyhow!(
            "Extension pattern did not change the filename {}",
            filename.display()
        ));
    }
    Ok(PathBuf::from(renamed))
}
