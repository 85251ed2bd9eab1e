use oxc_span::SourceType;
use serde_json::Value;
use std::path::PathBuf;

/// Result of converting a single file.
#[derive(Debug, Clone)]
pub struct TrextFileResult {
    /// Original filename (deleted once the output is persisted)
    pub input: PathBuf,
    /// New filename
    pub output: PathBuf,
    /// Final code text, including any source-map comment
    pub code: String,
    /// Source map emitted by the code generator, if enabled
    pub map: Option<Value>,
    /// How the input was parsed
    pub source_type: SourceType,
    /// Number of specifiers rewritten
    pub rewrites: usize,
}
