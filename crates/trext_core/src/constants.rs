//! Constants for directory-index detection.
//!
//! A specifier like `../interfaces` addresses a directory whose entry point
//! is an index file. These lists centralize which extensions are probed when
//! checking whether such an entry point exists.

/// Extensions (dot-prefixed) probed when checking for a directory's index
/// entry point, in priority order
pub const DIREXTS: &[&str] = &[
    ".cjs", // JavaScript CommonJS
    ".cts", // TypeScript CommonJS
    ".js",  // JavaScript
    ".jsx", // JavaScript with JSX
    ".mjs", // JavaScript module
    ".mts", // TypeScript module
    ".ts",  // TypeScript
    ".tsx", // TypeScript with JSX
];

/// Index file names to try when resolving directory imports
pub const INDEX_FILES: &[&str] = &[
    "index.cjs",
    "index.cts",
    "index.js",
    "index.jsx",
    "index.mjs",
    "index.mts",
    "index.ts",
    "index.tsx",
];
