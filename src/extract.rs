//! Import-specifier extraction.
//!
//! Two interchangeable extractors: a textual pattern (default) and a
//! tree-sitter pass over the TypeScript grammar. Both report only
//! `import ... from '<spec>'` statements, in source order.

mod pattern;
mod syntax;

pub use pattern::PatternExtractor;
pub use syntax::SyntaxExtractor;

/// Pulls module specifiers out of a source file's text.
pub trait SpecifierExtractor {
    fn extract(&self, text: &str) -> Vec<String>;
}
