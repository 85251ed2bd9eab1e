use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use regex::Regex;
use std::{env, path::PathBuf};
use trext_core::{
    AbsolutePolicy, ExtensionTo, Mandatory, MandatoryOverrides, SourceMaps, SuffixPattern,
    TrextOptions,
};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SourceMapsArg {
    #[default]
    Off,
    File,
    Inline,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "trext")]
#[command(about = "Convert file extensions and rewrite module specifiers in JS/TS projects")]
pub struct Config {
    /// Directory to convert (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// File extension to convert from, e.g. "js"
    #[arg(long)]
    pub from: String,

    /// File extension to convert to, e.g. "cjs"
    #[arg(long)]
    pub to: String,

    /// Regex matching the filename suffix to replace (defaults to
    /// everything after the first dot)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Rewrite absolute specifiers: "true", "false", or a regex
    /// restricting which ones are eligible
    #[arg(long)]
    pub absolute: Option<String>,

    /// Force explicit /index suffixes on directory specifiers: "true",
    /// "false", or a JSON map with call/exportAll/exportNamed/import keys
    #[arg(long)]
    pub mandatory: Option<String>,

    /// Source root used to detect directory specifiers (defaults to
    /// <root>/src)
    #[arg(long)]
    pub src: Option<PathBuf>,

    /// Comma-separated index-file extensions probed for directory entry
    /// points
    #[arg(long)]
    pub direxts: Option<String>,

    /// Source map handling
    #[arg(long, value_enum, default_value = "off")]
    pub source_maps: SourceMapsArg,
}

impl Config {
    /// Resolves the CLI shape into a conversion root and validated options.
    /// Malformed pattern/absolute/mandatory values surface here, before any
    /// file work starts.
    pub fn resolve(&self) -> Result<(PathBuf, TrextOptions)> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => env::current_dir().context("Failed to read current directory")?,
        };

        let mut options = TrextOptions::new(&self.from, ExtensionTo::from(self.to.as_str()))?;

        if let Some(pattern) = &self.pattern {
            let pattern = Regex::new(pattern)
                .with_context(|| format!("Invalid extension pattern '{}'", pattern))?;
            options.pattern = SuffixPattern::Regex(pattern);
        }

        if let Some(absolute) = &self.absolute {
            options.absolute = match absolute.as_str() {
                "false" => AbsolutePolicy::Never,
                "true" => AbsolutePolicy::Always,
                expression => AbsolutePolicy::Matching(
                    Regex::new(expression)
                        .with_context(|| format!("Invalid absolute pattern '{}'", expression))?,
                ),
            };
        }

        if let Some(mandatory) = &self.mandatory {
            options.mandatory = match mandatory.as_str() {
                "true" => Mandatory::All(true),
                "false" => Mandatory::All(false),
                json => {
                    let overrides: MandatoryOverrides = serde_json::from_str(json)
                        .with_context(|| format!("Invalid mandatory map '{}'", json))?;
                    Mandatory::PerKind(overrides)
                }
            };
        }

        options.src = match &self.src {
            Some(src) => src.clone(),
            None => root.join("src"),
        };

        if let Some(direxts) = &self.direxts {
            let direxts: Vec<String> = direxts
                .split(',')
                .map(str::trim)
                .filter(|ext| !ext.is_empty())
                .map(|ext| if ext.starts_with('.') { ext.to_string() } else { format!(".{}", ext) })
                .collect();
            if direxts.is_empty() {
                return Err(anyhow!("Empty direxts list"));
            }
            options.direxts = direxts;
        }

        options.source_maps = match self.source_maps {
            SourceMapsArg::Off => SourceMaps::Off,
            SourceMapsArg::File => SourceMaps::File,
            SourceMapsArg::Inline => SourceMaps::Inline,
        };

        Ok((root, options))
    }
}
