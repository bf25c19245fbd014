//! Syntax providers: turn raw source text into the lightweight,
//! analyzer-friendly summaries C1-C3 and C7 consume.
//!
//! Spec.md treats parsing as an external, contract-only collaborator (a
//! typed-package provider for Go, a syntax-tree provider for tree-sitter
//! languages). This crate serves Go, Python, and TypeScript all through one
//! tree-sitter-backed `SyntaxProvider`, since no `go/types`-equivalent
//! typed-package API exists in the Rust ecosystem (see DESIGN.md).

mod grammar;
mod summary;

pub use summary::{FunctionInfo, ImportEdge, ParsedFile};

use crate::core::SourceFile;
use crate::discovery::Language;
use grammar::GrammarSpec;
use tree_sitter::Parser;

/// Narrow provider contract analyzers depend on. A single implementation
/// backs all three languages; analyzers never know (or care) which grammar
/// produced the summary.
pub trait SyntaxProvider: Send + Sync {
    fn parse(&self, file: &SourceFile) -> Option<ParsedFile>;
}

pub struct TreeSitterProvider;

impl SyntaxProvider for TreeSitterProvider {
    fn parse(&self, file: &SourceFile) -> Option<ParsedFile> {
        let source = file.raw_content.as_deref()?;
        let spec = GrammarSpec::for_language(file.language);
        let mut parser = Parser::new();
        parser.set_language(&spec.ts_language()).ok()?;
        let tree = parser.parse(source, None)?;
        Some(summary::extract(&tree, source, &spec, &file.rel_path))
    }
}

impl Default for TreeSitterProvider {
    fn default() -> Self {
        TreeSitterProvider
    }
}

/// Whether `lang` has a working grammar registered. Used by the pipeline to
/// decide whether parse failures for a whole target should be a warning
/// ("no grammar") versus per-file ("grammar present, this file failed").
pub fn supports(lang: Language) -> bool {
    matches!(lang, Language::Go | Language::Python | Language::TypeScript)
}
