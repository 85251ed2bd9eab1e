use anyhow::{Result, anyhow};
use regex::Regex;
use serde::Deserialize;
use std::{env, fmt, path::PathBuf, sync::Arc};

use crate::constants::DIREXTS;
use crate::policy::escape_specials;
use crate::types::NodeKind;

/// Argument handed to a user-supplied extension generator.
///
/// In driver context the generator sees the matched filename suffix; in
/// specifier context it sees the node kind and the raw specifier text.
/// Both forms carry enough information to compute an extension.
#[derive(Debug, Clone, Copy)]
pub enum ToMatch<'a> {
    /// Filename suffix matched by the output-naming pattern
    Filename(&'a str),
    /// Specifier visited inside a source file
    Node { kind: NodeKind, specifier: &'a str },
}

pub type ToGenerator = Arc<dyn Fn(&ToMatch<'_>) -> String + Send + Sync>;

/// New extension: a literal value or a per-match generator.
#[derive(Clone)]
pub enum ExtensionTo {
    Literal(String),
    Generator(ToGenerator),
}

impl ExtensionTo {
    /// Computes the dot-prefixed output extension for a match.
    pub fn resolve(&self, to_match: &ToMatch<'_>) -> String {
        let raw = match self {
            ExtensionTo::Literal(value) => value.clone(),
            ExtensionTo::Generator(generate) => generate(to_match),
        };
        dot_prefixed(raw)
    }
}

impl fmt::Debug for ExtensionTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionTo::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            ExtensionTo::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

impl From<&str> for ExtensionTo {
    fn from(value: &str) -> Self {
        ExtensionTo::Literal(value.to_string())
    }
}

/// Whether absolute (bare) specifiers are eligible for rewriting.
#[derive(Debug, Clone)]
pub enum AbsolutePolicy {
    /// Never rewrite absolute specifiers (default)
    Never,
    /// All absolute specifiers are eligible
    Always,
    /// Only absolute specifiers matching the expression are eligible
    Matching(Regex),
}

impl AbsolutePolicy {
    pub fn admits(&self, specifier: &str) -> bool {
        match self {
            AbsolutePolicy::Never => false,
            AbsolutePolicy::Always => true,
            AbsolutePolicy::Matching(pattern) => pattern.is_match(specifier),
        }
    }
}

impl Default for AbsolutePolicy {
    fn default() -> Self {
        AbsolutePolicy::Never
    }
}

/// Per-node-kind overrides for the mandatory-extension rule.
///
/// Field names follow the JSON shape accepted by the CLI:
/// `{"call": false, "exportAll": true, ...}`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MandatoryOverrides {
    pub call: Option<bool>,
    pub export_all: Option<bool>,
    pub export_named: Option<bool>,
    pub import: Option<bool>,
}

impl MandatoryOverrides {
    fn for_kind(&self, kind: NodeKind) -> Option<bool> {
        match kind {
            NodeKind::Call => self.call,
            NodeKind::ExportAll => self.export_all,
            NodeKind::ExportNamed => self.export_named,
            NodeKind::Import => self.import,
        }
    }
}

/// Whether directory specifiers must receive an explicit `/index` suffix
/// and extension.
#[derive(Debug, Clone)]
pub enum Mandatory {
    All(bool),
    PerKind(MandatoryOverrides),
}

impl Mandatory {
    /// Resolves the flag for one node kind; unset per-kind entries are
    /// mandatory.
    pub fn for_kind(&self, kind: NodeKind) -> bool {
        match self {
            Mandatory::All(mandatory) => *mandatory,
            Mandatory::PerKind(overrides) => overrides.for_kind(kind).unwrap_or(true),
        }
    }
}

impl Default for Mandatory {
    fn default() -> Self {
        Mandatory::All(true)
    }
}

/// Filename suffix to replace when computing the output filename.
#[derive(Debug, Clone)]
pub enum SuffixPattern {
    Regex(Regex),
    Literal(String),
}

impl SuffixPattern {
    /// Replaces the first pattern match in `filename` with the resolved
    /// output extension. Returns the filename unchanged when the pattern
    /// does not match.
    pub fn rename(&self, filename: &str, to: &ExtensionTo) -> String {
        let range = match self {
            SuffixPattern::Regex(pattern) => {
                pattern.find(filename).map(|found| (found.start(), found.end()))
            }
            SuffixPattern::Literal(literal) => {
                filename.find(literal.as_str()).map(|start| (start, start + literal.len()))
            }
        };

        match range {
            Some((start, end)) => {
                let extension = to.resolve(&ToMatch::Filename(&filename[start..end]));
                format!("{}{}{}", &filename[..start], extension, &filename[end..])
            }
            None => filename.to_string(),
        }
    }
}

impl Default for SuffixPattern {
    fn default() -> Self {
        // Everything after the first dot
        SuffixPattern::Regex(Regex::new(r"\..+$").expect("default suffix pattern is valid"))
    }
}

/// Source map handling, forwarded to the code generator and consulted by
/// the source-map adjuster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceMaps {
    #[default]
    Off,
    File,
    Inline,
}

impl SourceMaps {
    pub fn enabled(&self) -> bool {
        !matches!(self, SourceMaps::Off)
    }
}

/// Options for one conversion run. Immutable once resolved; shared across
/// the batch.
#[derive(Debug, Clone)]
pub struct TrextOptions {
    /// Source extension name, no leading dot
    pub from: String,
    /// New extension or generator
    pub to: ExtensionTo,
    /// Filename suffix replaced when naming output files
    pub pattern: SuffixPattern,
    /// Absolute-specifier eligibility
    pub absolute: AbsolutePolicy,
    /// Directory-index suffix rule
    pub mandatory: Mandatory,
    /// Source root used to test whether a relative specifier addresses a
    /// directory
    pub src: PathBuf,
    /// Extensions probed for directory index entry points
    pub direxts: Vec<String>,
    /// Source map handling
    pub source_maps: SourceMaps,
    /// `.{from}` suffix matcher, or an empty match at end-of-string when
    /// the suffix is absent; precompiled so the policy never re-escapes
    pub(crate) from_suffix: Regex,
}

impl TrextOptions {
    /// Builds options for a `from` -> `to` conversion with defaults for
    /// everything else. Normalizes `from` (leading dot stripped) and
    /// validates both extensions.
    pub fn new(from: &str, to: ExtensionTo) -> Result<Self> {
        let from = from.strip_prefix('.').unwrap_or(from).to_string();
        if from.is_empty() {
            return Err(anyhow!("Missing source extension"));
        }
        if from.contains('/') {
            return Err(anyhow!("Invalid source extension '{}'", from));
        }
        if let ExtensionTo::Literal(value) = &to
            && value.trim_start_matches('.').is_empty()
        {
            return Err(anyhow!("Missing output extension"));
        }

        let from_suffix = Regex::new(&format!(r"\.{}$|$", escape_specials(&from)))
            .map_err(|e| anyhow!("Invalid source extension '{}': {}", from, e))?;

        Ok(TrextOptions {
            from,
            to,
            pattern: SuffixPattern::default(),
            absolute: AbsolutePolicy::default(),
            mandatory: Mandatory::default(),
            src: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("src"),
            direxts: DIREXTS.iter().map(|ext| ext.to_string()).collect(),
            source_maps: SourceMaps::default(),
            from_suffix,
        })
    }

    pub(crate) fn from_suffix(&self) -> &Regex {
        &self.from_suffix
    }
}

pub(crate) fn dot_prefixed(value: String) -> String {
    if value.starts_with('.') { value } else { format!(".{}", value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_leading_dot_from_source_extension() {
        let options = TrextOptions::new(".js", ExtensionTo::from("cjs")).unwrap();
        assert_eq!(options.from, "js");
    }

    #[test]
    fn test_new_rejects_empty_source_extension() {
        assert!(TrextOptions::new("", ExtensionTo::from("cjs")).is_err());
        assert!(TrextOptions::new(".", ExtensionTo::from("cjs")).is_err());
    }

    #[test]
    fn test_new_rejects_empty_output_extension() {
        assert!(TrextOptions::new("js", ExtensionTo::from("")).is_err());
        assert!(TrextOptions::new("js", ExtensionTo::from(".")).is_err());
    }

    #[test]
    fn test_literal_to_is_coerced_to_dot_prefixed() {
        let to = ExtensionTo::from("cjs");
        assert_eq!(to.resolve(&ToMatch::Filename(".js")), ".cjs");

        let to = ExtensionTo::from(".mjs");
        assert_eq!(to.resolve(&ToMatch::Filename(".js")), ".mjs");
    }

    #[test]
    fn test_generator_to_receives_node_context() {
        let to = ExtensionTo::Generator(Arc::new(|to_match| match to_match {
            ToMatch::Node { kind: NodeKind::Call, .. } => "cjs".to_string(),
            _ => "mjs".to_string(),
        }));

        let call = ToMatch::Node { kind: NodeKind::Call, specifier: "./a" };
        let import = ToMatch::Node { kind: NodeKind::Import, specifier: "./a" };
        assert_eq!(to.resolve(&call), ".cjs");
        assert_eq!(to.resolve(&import), ".mjs");
    }

    #[test]
    fn test_absolute_policy_admits() {
        assert!(!AbsolutePolicy::Never.admits("@scope/package"));
        assert!(AbsolutePolicy::Always.admits("@scope/package"));

        let matching = AbsolutePolicy::Matching(Regex::new("^@scope/").unwrap());
        assert!(matching.admits("@scope/package"));
        assert!(!matching.admits("lodash"));
    }

    #[test]
    fn test_mandatory_all_applies_to_every_kind() {
        let mandatory = Mandatory::All(false);
        assert!(!mandatory.for_kind(NodeKind::Call));
        assert!(!mandatory.for_kind(NodeKind::Import));
    }

    #[test]
    fn test_mandatory_per_kind_falls_back_to_true() {
        let mandatory = Mandatory::PerKind(MandatoryOverrides {
            import: Some(false),
            ..MandatoryOverrides::default()
        });
        assert!(!mandatory.for_kind(NodeKind::Import));
        assert!(mandatory.for_kind(NodeKind::Call));
        assert!(mandatory.for_kind(NodeKind::ExportAll));
        assert!(mandatory.for_kind(NodeKind::ExportNamed));
    }

    #[test]
    fn test_mandatory_overrides_json_shape() {
        let overrides: MandatoryOverrides =
            serde_json::from_str(r#"{"import":false,"exportAll":true}"#).unwrap();
        assert_eq!(overrides.import, Some(false));
        assert_eq!(overrides.export_all, Some(true));
        assert_eq!(overrides.call, None);
    }

    #[test]
    fn test_default_pattern_replaces_everything_after_first_dot() {
        let pattern = SuffixPattern::default();
        let renamed = pattern.rename("lib/cat.interface.js", &ExtensionTo::from("cjs"));
        assert_eq!(renamed, "lib/cat.cjs");
    }

    #[test]
    fn test_literal_pattern_replaces_first_occurrence() {
        let pattern = SuffixPattern::Literal(".js".to_string());
        let renamed = pattern.rename("lib/cat.js", &ExtensionTo::from("mjs"));
        assert_eq!(renamed, "lib/cat.mjs");
    }

    #[test]
    fn test_pattern_without_match_leaves_filename_unchanged() {
        let pattern = SuffixPattern::Regex(Regex::new(r"\.jsx$").unwrap());
        let renamed = pattern.rename("lib/cat.js", &ExtensionTo::from("cjs"));
        assert_eq!(renamed, "lib/cat.js");
    }

    #[test]
    fn test_pattern_rename_with_generator_sees_matched_suffix() {
        let to = ExtensionTo::Generator(Arc::new(|to_match| match to_match {
            ToMatch::Filename(suffix) => {
                assert_eq!(*suffix, ".js");
                "cjs".to_string()
            }
            _ => panic!("expected filename context"),
        }));
        let pattern = SuffixPattern::default();
        assert_eq!(pattern.rename("cat.js", &to), "cat.cjs");
    }
}
