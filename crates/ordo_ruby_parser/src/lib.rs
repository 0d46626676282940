//! Ruby parser for ordo, built on tree-sitter-ruby.

use std::sync::Arc;

/// Result of parsing a Ruby source file.
pub struct ParseResult {
    pub tree: tree_sitter::Tree,
    pub source: Arc<str>,
}

impl ParseResult {
    /// Returns true if the tree contains `ERROR` or `MISSING` nodes.
    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Zero-based row of the first syntax error, if any.
    pub fn first_error_row(&self) -> Option<usize> {
        let mut cursor = self.tree.root_node().walk();
        loop {
            let node = cursor.node();
            if node.is_error() || node.is_missing() {
                return Some(node.start_position().row);
            }
            if node.has_error() && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return None;
                }
            }
        }
    }
}

/// Ruby parser wrapping tree-sitter.
pub struct RubyParser {
    parser: tree_sitter::Parser,
}

/// Return the tree-sitter Ruby language.
pub fn ruby_language() -> tree_sitter::Language {
    tree_sitter_ruby::LANGUAGE.into()
}

impl RubyParser {
    /// Create a new Ruby parser.
    pub fn new() -> Self {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&ruby_language())
            .expect("Failed to load Ruby grammar");
        Self { parser }
    }

    /// Parse Ruby source code into a syntax tree.
    pub fn parse(&mut self, source: &str) -> Option<ParseResult> {
        let tree = self.parser.parse(source, None)?;
        Some(ParseResult {
            tree,
            source: source.into(),
        })
    }
}

impl Default for RubyParser {
    fn default() -> Self {
        Self::new()
    }
}
