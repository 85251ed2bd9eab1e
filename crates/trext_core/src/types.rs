use std::fmt;

/// Syntactic category of a node that can carry a module specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `require('...')` call expression
    Call,
    /// `export * from '...'`
    ExportAll,
    /// `export { ... } from '...'`
    ExportNamed,
    /// `import ... from '...'`
    Import,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Call => "call",
            NodeKind::ExportAll => "export-all",
            NodeKind::ExportNamed => "export-named",
            NodeKind::Import => "import",
        };
        write!(f, "{}", name)
    }
}

/// What the classifier learned about a specifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    /// Specifier does not start with a relative-path marker (`.`)
    pub absolute: bool,
    /// Specifier addresses a directory rather than a file
    pub directory: bool,
    /// Specifier resolves to a package root (a directory with its own
    /// package.json); such specifiers are never rewritten
    pub package_root: bool,
}

/// Outcome of the extension rewrite policy for a single specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteDecision {
    /// Leave the node untouched
    Skip,
    /// Replace the specifier with the carried value
    Rewrite(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_display() {
        assert_eq!(NodeKind::Call.to_string(), "call");
        assert_eq!(NodeKind::ExportAll.to_string(), "export-all");
        assert_eq!(NodeKind::ExportNamed.to_string(), "export-named");
        assert_eq!(NodeKind::Import.to_string(), "import");
    }

    #[test]
    fn test_classification_default_is_relative_file() {
        let c = Classification::default();
        assert!(!c.absolute);
        assert!(!c.directory);
        assert!(!c.package_root);
    }
}
