//! Batch file-extension conversion for JavaScript/TypeScript projects.
//!
//! This crate drives the conversion: it discovers files with the source
//! extension, parses each one, rewrites the module specifiers inside
//! (`import`/`export ... from`/`require`) through the decision core in
//! `trext_core`, re-emits the code, relocates source maps, and replaces the
//! original file on disk.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use trext_convert::trext;
//! use trext_core::{ExtensionTo, TrextOptions};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let options = TrextOptions::new("js", ExtensionTo::from("cjs"))?;
//! let results = trext(Path::new("/path/to/project"), &options)?;
//! println!("converted {} files", results.len());
//! # Ok(())
//! # }
//! ```

mod collector;
mod config;
mod parser;
mod reporter;
mod rewriter;
mod sourcemap;
mod transformer;
mod types;

// Re-export public API
pub use config::Config;
pub use reporter::{print_nothing_to_convert, print_summary};
pub use rewriter::Trextel;
pub use transformer::{trext, trext_file};
pub use types::TrextFileResult;
