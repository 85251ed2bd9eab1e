use anyhow::{Context, Result};
use log::{debug, trace};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use trext_core::{SourceMaps, TrextOptions, fsx};

use crate::types::TrextFileResult;

/// Returns a source map comment for a map filename.
pub(crate) fn source_mapping_url(filename: &Path) -> String {
    format!("//# sourceMappingURL={}", basename(filename))
}

fn basename(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}

fn map_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.map", path.display()))
}

/// Adds a source map comment to `result.code` if source maps are enabled,
/// renames the map to match the output file, persists it (unless inline),
/// and removes the stale map for the original file.
pub(crate) fn adjust(options: &TrextOptions, result: &mut TrextFileResult) -> Result<()> {
    // Do nothing if source maps aren't enabled
    if result.map.is_none() || !options.source_maps.enabled() {
        return Ok(());
    }

    let output_map = map_path(&result.output);
    trace!("Referencing source map {}", output_map.display());

    result.code.push('\n');
    result.code.push_str(&source_mapping_url(&output_map));
    result.code.push('\n');

    let output_name = basename(&result.output);
    if let Some(Value::Object(map)) = result.map.as_mut() {
        map.insert("file".to_string(), Value::String(output_name));
    }

    if options.source_maps != SourceMaps::Inline {
        let map = result.map.as_ref().map(Value::to_string).unwrap_or_default();
        fsx::save_file(&output_map, &map)?;

        let stale = map_path(&result.input);
        debug!("Removing stale source map {}", stale.display());
        fsx::ignore_not_found(fs::remove_file(&stale))
            .with_context(|| format!("Failed to remove {}", stale.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_span::SourceType;
    use serde_json::json;
    use tempfile::TempDir;
    use trext_core::ExtensionTo;

    fn result_with_map(dir: &Path) -> TrextFileResult {
        TrextFileResult {
            input: dir.join("cat.js"),
            output: dir.join("cat.cjs"),
            code: "module.exports = {};".to_string(),
            map: Some(json!({"version": 3, "sources": ["cat.js"], "mappings": "AAAA"})),
            source_type: SourceType::default(),
            rewrites: 0,
        }
    }

    fn options_with_maps(maps: SourceMaps) -> TrextOptions {
        let mut options = TrextOptions::new("js", ExtensionTo::from("cjs")).unwrap();
        options.source_maps = maps;
        options
    }

    #[test]
    fn test_source_mapping_url() {
        assert_eq!(
            source_mapping_url(Path::new("/tmp/out/cat.cjs.map")),
            "//# sourceMappingURL=cat.cjs.map"
        );
    }

    #[test]
    fn test_noop_when_source_maps_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let mut result = result_with_map(temp_dir.path());
        let code_before = result.code.clone();

        adjust(&options_with_maps(SourceMaps::Off), &mut result).unwrap();
        assert_eq!(result.code, code_before);
        assert!(!temp_dir.path().join("cat.cjs.map").exists());
    }

    #[test]
    fn test_noop_when_result_has_no_map() {
        let temp_dir = TempDir::new().unwrap();
        let mut result = result_with_map(temp_dir.path());
        result.map = None;
        let code_before = result.code.clone();

        adjust(&options_with_maps(SourceMaps::File), &mut result).unwrap();
        assert_eq!(result.code, code_before);
    }

    #[test]
    fn test_appends_comment_and_renames_map_file_field() {
        let temp_dir = TempDir::new().unwrap();
        let mut result = result_with_map(temp_dir.path());

        adjust(&options_with_maps(SourceMaps::File), &mut result).unwrap();
        assert!(result.code.ends_with("//# sourceMappingURL=cat.cjs.map\n"));
        assert_eq!(result.map.as_ref().unwrap()["file"], json!("cat.cjs"));
    }

    #[test]
    fn test_persists_map_and_removes_stale_map() {
        let temp_dir = TempDir::new().unwrap();
        let stale = temp_dir.path().join("cat.js.map");
        fs::write(&stale, "{}").unwrap();
        let mut result = result_with_map(temp_dir.path());

        adjust(&options_with_maps(SourceMaps::File), &mut result).unwrap();

        let persisted = fs::read_to_string(temp_dir.path().join("cat.cjs.map")).unwrap();
        assert!(persisted.contains("\"file\":\"cat.cjs\""));
        assert!(!stale.exists());
    }

    #[test]
    fn test_missing_stale_map_is_tolerated() {
        let temp_dir = TempDir::new().unwrap();
        let mut result = result_with_map(temp_dir.path());

        // No cat.js.map on disk
        assert!(adjust(&options_with_maps(SourceMaps::File), &mut result).is_ok());
    }

    #[test]
    fn test_inline_maps_are_not_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let stale = temp_dir.path().join("cat.js.map");
        fs::write(&stale, "{}").unwrap();
        let mut result = result_with_map(temp_dir.path());

        adjust(&options_with_maps(SourceMaps::Inline), &mut result).unwrap();

        assert!(result.code.contains("sourceMappingURL"));
        assert!(!temp_dir.path().join("cat.cjs.map").exists());
        // Stale maps are only cleaned up when a new map is written
        assert!(stale.exists());
    }
}
