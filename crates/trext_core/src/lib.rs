//! Core decision logic for trext.
//!
//! This crate holds everything needed to decide whether a module specifier
//! should be rewritten during a file-extension conversion, and what its new
//! value is:
//! - Classifying specifiers (absolute vs. relative, directory vs. file)
//! - Resolving bare specifiers through node_modules for classification
//! - The extension rewrite policy (absolute/mandatory rules, suffix
//!   replacement)
//! - Option types shared by the transform engine and the CLI

pub mod fsx;

mod classify;
mod constants;
mod options;
mod policy;
mod resolver;
mod types;

// Re-export public API
pub use classify::{ClassificationCache, classify};
pub use constants::{DIREXTS, INDEX_FILES};
pub use options::{
    AbsolutePolicy, ExtensionTo, Mandatory, MandatoryOverrides, SourceMaps, SuffixPattern,
    ToGenerator, ToMatch, TrextOptions,
};
pub use policy::{decide, escape_specials};
pub use resolver::{Resolution, resolve_silent};
pub use types::{Classification, NodeKind, RewriteDecision};
