//! Typed CST node wrappers for Ruby syntax trees.
//!
//! Provides strongly-typed access to tree-sitter nodes while preserving
//! source positions needed for fixes.

mod comments;
mod scope;
mod statement;

pub use comments::{AssociatedComments, CommentMap};
pub use scope::{SCOPE_KINDS, Scope, is_scope_kind};
pub use statement::{Alias, Call, Definition, Statement, StatementKind, method_name_operand, symbol_name};

use ordo_text_size::{Ranged, TextRange, TextSize};
use tree_sitter::Node;

/// Convert a tree-sitter node range to a TextRange.
pub fn node_range(node: &Node) -> TextRange {
    let start = TextSize::new(u32::try_from(node.start_byte()).unwrap_or(u32::MAX));
    let end = TextSize::new(u32::try_from(node.end_byte()).unwrap_or(u32::MAX));
    TextRange::new(start, end)
}

/// Wrapper for traversing CST nodes.
#[derive(Debug, Clone, Copy)]
pub struct CstNode<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> CstNode<'a> {
    pub fn new(node: Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    pub fn range(&self) -> TextRange {
        node_range(&self.node)
    }

    pub fn text(&self) -> &'a str {
        self.node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Zero-based row of the first byte.
    pub fn start_row(&self) -> usize {
        self.node.start_position().row
    }

    /// Zero-based row of the last byte.
    ///
    /// A node that swallows its terminating newline ends at column 0 of the
    /// following row; that row is not counted.
    pub fn end_row(&self) -> usize {
        let end = self.node.end_position();
        if end.column == 0 && end.row > self.start_row() {
            end.row - 1
        } else {
            end.row
        }
    }

    pub fn is_named(&self) -> bool {
        self.node.is_named()
    }

    pub fn is_comment(&self) -> bool {
        self.node.kind() == "comment"
    }

    pub fn parent(&self) -> Option<CstNode<'a>> {
        self.node.parent().map(|n| CstNode::new(n, self.source))
    }

    pub fn children(&self) -> impl Iterator<Item = CstNode<'a>> + 'a {
        let source = self.source;
        let count = self.node.child_count();
        let node = self.node;
        (0..count).filter_map(move |i| {
            let child = node.child(u32::try_from(i).ok()?)?;
            Some(CstNode::new(child, source))
        })
    }

    pub fn child_by_field_name(&self, name: &str) -> Option<CstNode<'a>> {
        self.node
            .child_by_field_name(name)
            .map(|n| CstNode::new(n, self.source))
    }

    pub fn named_children(&self) -> impl Iterator<Item = CstNode<'a>> + 'a {
        self.children().filter(CstNode::is_named)
    }

    pub fn prev_sibling(&self) -> Option<CstNode<'a>> {
        self.node.prev_sibling().map(|n| CstNode::new(n, self.source))
    }

    pub fn next_sibling(&self) -> Option<CstNode<'a>> {
        self.node.next_sibling().map(|n| CstNode::new(n, self.source))
    }

    /// Returns true if only whitespace precedes this node on its first line.
    pub fn starts_line(&self) -> bool {
        let start = self.node.start_byte();
        let line_start = self.source[..start].rfind('\n').map_or(0, |i| i + 1);
        self.source[line_start..start].trim().is_empty()
    }

    /// Get the raw tree-sitter node.
    pub fn inner(&self) -> Node<'a> {
        self.node
    }
}

impl Ranged for CstNode<'_> {
    fn range(&self) -> TextRange {
        node_range(&self.node)
    }
}

/// Iterator for walking all nodes in a tree (pre-order traversal).
pub struct TreeWalker<'a> {
    cursor: tree_sitter::TreeCursor<'a>,
    source: &'a str,
    done: bool,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: Node<'a>, source: &'a str) -> Self {
        Self {
            cursor: root.walk(),
            source,
            done: false,
        }
    }
}

impl<'a> Iterator for TreeWalker<'a> {
    type Item = CstNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = CstNode::new(self.cursor.node(), self.source);

        if self.cursor.goto_first_child() {
            return Some(node);
        }

        if self.cursor.goto_next_sibling() {
            return Some(node);
        }

        // Climb until a sibling is found or the root is reached
        loop {
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
        }
    }
}
