use std::sync::LazyLock;

use regex::Regex;

use super::SpecifierExtractor;

// `import <clause> from '<spec>'`. The clause may span lines (named lists)
// but never contains a quote, a semicolon, a dot or parentheses, which keeps
// `import.meta` and `import(...)` out.
static IMPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\b\s*(?:type\s+)?[^'";.()]*?\bfrom\s*['"]([^'"]+)['"]"#)
        .expect("static import pattern")
});

/// Regex heuristic. Does not understand comments or strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternExtractor;

impl SpecifierExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        IMPORT_FROM
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
