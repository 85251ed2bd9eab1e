use log::trace;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, CallExpression, ExportAllDeclaration, ExportNamedDeclaration, Expression,
    ImportDeclaration, StringLiteral,
};
use oxc_ast_visit::{VisitMut, walk_mut};
use oxc_span::Atom;
use trext_core::{ClassificationCache, NodeKind, RewriteDecision, TrextOptions, classify, decide};

/// Rewrites module specifiers in place while the tree is walked.
///
/// Handles four node kinds: `require(...)` call expressions, import
/// declarations, export-all declarations, and re-exporting export-named
/// declarations. Everything else is left untouched.
pub struct Trextel<'a, 'run> {
    allocator: &'a Allocator,
    options: &'run TrextOptions,
    cache: &'run ClassificationCache,
    rewrites: usize,
}

impl<'a, 'run> Trextel<'a, 'run> {
    pub fn new(
        allocator: &'a Allocator,
        options: &'run TrextOptions,
        cache: &'run ClassificationCache,
    ) -> Self {
        Trextel { allocator, options, cache, rewrites: 0 }
    }

    /// Number of specifiers rewritten so far.
    pub fn rewrites(&self) -> usize {
        self.rewrites
    }

    fn rewrite_specifier(&mut self, kind: NodeKind, literal: &mut StringLiteral<'a>) {
        let classification = classify(&literal.value, self.options, self.cache);
        match decide(kind, &literal.value, classification, self.options) {
            RewriteDecision::Rewrite(value) => {
                literal.value = Atom::from(&*self.allocator.alloc_str(&value));
                // Drop the original raw text so the printer emits the new
                // value
                literal.raw = None;
                self.rewrites += 1;
            }
            RewriteDecision::Skip => {
                trace!("Left {} specifier '{}' untouched", kind, literal.value);
            }
        }
    }
}

/// A call expression is eligible when its callee is the `require`
/// identifier and it carries exactly one argument.
fn is_require_call(call: &CallExpression) -> bool {
    matches!(&call.callee, Expression::Identifier(ident) if ident.name.as_str() == "require")
        && call.arguments.len() == 1
}

impl<'a> VisitMut<'a> for Trextel<'a, '_> {
    fn visit_import_declaration(&mut self, decl: &mut ImportDeclaration<'a>) {
        self.rewrite_specifier(NodeKind::Import, &mut decl.source);
        walk_mut::walk_import_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &mut ExportAllDeclaration<'a>) {
        self.rewrite_specifier(NodeKind::ExportAll, &mut decl.source);
        walk_mut::walk_export_all_declaration(self, decl);
    }

    fn visit_export_named_declaration(&mut self, decl: &mut ExportNamedDeclaration<'a>) {
        // Only re-exports carry a source
        if let Some(source) = &mut decl.source {
            self.rewrite_specifier(NodeKind::ExportNamed, source);
        }
        walk_mut::walk_export_named_declaration(self, decl);
    }

    fn visit_call_expression(&mut self, call: &mut CallExpression<'a>) {
        // Walk first so nested require() arguments are reached
        walk_mut::walk_call_expression(self, call);

        if !is_require_call(call) {
            return;
        }
        if let Argument::StringLiteral(literal) = &mut call.arguments[0] {
            self.rewrite_specifier(NodeKind::Call, literal);
        }
    }
}
