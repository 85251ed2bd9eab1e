use log::trace;
use regex::NoExpand;

use crate::options::{ToMatch, TrextOptions};
use crate::types::{Classification, NodeKind, RewriteDecision};

/// Escapes regex metacharacters in an extension name. `-` is escaped as
/// `\x2d` so escaped names stay valid inside character classes.
pub fn escape_specials(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '|' | '\\' | '{' | '}' | '(' | ')' | '[' | ']' | '^' | '$' | '+' | '*' | '?'
            | '.' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '-' => escaped.push_str("\\x2d"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Decides whether a classified specifier should be rewritten, and computes
/// the replacement value.
///
/// Ordered short-circuit rules:
/// 1. Empty specifiers are skipped.
/// 2. Absolute specifiers are skipped unless the absolute policy admits
///    them; package roots are skipped unconditionally.
/// 3. Directory specifiers are skipped when the mandatory flag for the node
///    kind is off; otherwise `/index` is appended.
/// 4. Specifiers already carrying the output extension are skipped.
/// 5. The `.{from}` suffix (or end-of-string when absent) is replaced with
///    the output extension.
pub fn decide(
    kind: NodeKind,
    specifier: &str,
    classification: Classification,
    options: &TrextOptions,
) -> RewriteDecision {
    if specifier.is_empty() {
        return RewriteDecision::Skip;
    }

    if classification.absolute {
        if !options.absolute.admits(specifier) {
            trace!("Skipping absolute specifier '{}'", specifier);
            return RewriteDecision::Skip;
        }
        if classification.package_root {
            trace!("Skipping package root '{}'", specifier);
            return RewriteDecision::Skip;
        }
    }

    let mut value = specifier.to_string();
    if classification.directory {
        if !options.mandatory.for_kind(kind) {
            trace!("Skipping directory specifier '{}' ({} extensions not mandatory)", specifier, kind);
            return RewriteDecision::Skip;
        }
        // Directory entry points must be made explicit
        value.push_str("/index");
    }

    let to = options.to.resolve(&ToMatch::Node { kind, specifier });

    // Do not double-convert
    if value.ends_with(&to) {
        trace!("Skipping already converted specifier '{}'", value);
        return RewriteDecision::Skip;
    }

    let rewritten = options.from_suffix().replace(&value, NoExpand(&to)).into_owned();
    trace!("Rewriting {} specifier '{}' -> '{}'", kind, specifier, rewritten);
    RewriteDecision::Rewrite(rewritten)
}
