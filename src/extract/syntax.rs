use tree_sitter::{Node, Parser};

use crate::util::{trim_quotes, txt};

use super::SpecifierExtractor;

/// tree-sitter pass over top-level `import_statement` nodes.
///
/// Unlike the pattern extractor this ignores imports inside comments and
/// string literals. Files that fail to parse yield no specifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntaxExtractor;

impl SpecifierExtractor for SyntaxExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()) {
            tracing::warn!("typescript grammar unavailable: {e}");
            return Vec::new();
        }
        let Some(tree) = parser.parse(text, None) else {
            return Vec::new();
        };
        import_sources(tree.root_node(), text.as_bytes())
    }
}

fn import_sources(root: Node, src: &[u8]) -> Vec<String> {
    let mut sources = Vec::new();
    let mut cursor = root.walk();

    for node in root.children(&mut cursor) {
        if node.kind() != "import_statement" || !has_import_clause(node) {
            continue;
        }
        if let Some(source_node) = node.child_by_field_name("source") {
            let path = trim_quotes(txt(source_node, src));
            if !path.is_empty() {
                sources.push(path.to_string());
            }
        }
    }

    sources
}

/// `import x from '...'` has a clause; `import '...'` does not.
fn has_import_clause(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| child.kind() == "import_clause");
    found
}
