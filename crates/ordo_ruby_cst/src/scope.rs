//! Scopes: bodies whose direct children are checked as one ordered list.

use crate::{CstNode, Statement};

/// Node kinds whose direct children form a scope.
pub const SCOPE_KINDS: &[&str] = &["program", "body_statement", "block_body"];

pub fn is_scope_kind(kind: &str) -> bool {
    SCOPE_KINDS.contains(&kind)
}

/// The ordered statements of one body, plus the comments written among them.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    node: CstNode<'a>,
    statements: Vec<Statement<'a>>,
    comments: Vec<CstNode<'a>>,
}

impl<'a> Scope<'a> {
    /// Build the scope rooted at `node`, or `None` if `node` is not a body.
    pub fn from_node(node: CstNode<'a>) -> Option<Self> {
        if !is_scope_kind(node.kind()) {
            return None;
        }

        let mut statements = Vec::new();
        let mut comments = Vec::new();
        for child in node.named_children() {
            if child.is_comment() {
                comments.push(child);
            } else {
                let index = statements.len();
                statements.push(Statement::from_node(child, index));
            }
        }

        // The parser hangs comments that precede the first statement or follow
        // the last one on the enclosing node, next to the body.
        if node.kind() != "program" {
            let mut before = Vec::new();
            let mut sibling = node.prev_sibling();
            while let Some(prev) = sibling.filter(CstNode::is_comment) {
                before.push(prev);
                sibling = prev.prev_sibling();
            }
            before.reverse();

            let mut after = Vec::new();
            let mut sibling = node.next_sibling();
            while let Some(next) = sibling.filter(CstNode::is_comment) {
                after.push(next);
                sibling = next.next_sibling();
            }

            comments.splice(0..0, before);
            comments.extend(after);
        }

        Some(Self {
            node,
            statements,
            comments,
        })
    }

    pub fn node(&self) -> CstNode<'a> {
        self.node
    }

    pub fn statements(&self) -> &[Statement<'a>] {
        &self.statements
    }

    pub fn statement(&self, index: usize) -> Option<&Statement<'a>> {
        self.statements.get(index)
    }

    /// Comments in source order.
    pub fn comments(&self) -> &[CstNode<'a>] {
        &self.comments
    }

    pub fn source(&self) -> &'a str {
        self.node.source()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeWalker;
    use ordo_ruby_parser::RubyParser;

    fn with_scopes(source: &str, f: impl FnOnce(Vec<Scope>)) {
        let mut parser = RubyParser::new();
        let result = parser.parse(source).unwrap();
        let scopes = TreeWalker::new(result.tree.root_node(), source)
            .filter_map(Scope::from_node)
            .collect();
        f(scopes);
    }

    #[test]
    fn test_top_level_scope() {
        with_scopes("def b; end\ndef a; end\n", |scopes| {
            assert_eq!(scopes.len(), 1);
            let names: Vec<_> = scopes[0]
                .statements()
                .iter()
                .filter_map(|s| s.definition().map(|d| d.name))
                .collect();
            assert_eq!(names, ["b", "a"]);
        });
    }

    #[test]
    fn test_class_body_scope_with_indices() {
        let source = "class Foo\n  def b; end\n  private\n  def a; end\nend\n";
        with_scopes(source, |scopes| {
            let body = scopes
                .iter()
                .find(|s| s.node().kind() == "body_statement")
                .unwrap();
            assert_eq!(body.len(), 3);
            for (i, stmt) in body.statements().iter().enumerate() {
                assert_eq!(stmt.index(), i);
            }
            assert!(body.statement(1).unwrap().as_call().unwrap().is_bare());
        });
    }

    #[test]
    fn test_comments_around_body_are_collected() {
        let source = "class Foo\n  # first\n  def b; end\n  # middle\n  def a; end\n  # last\nend\n";
        with_scopes(source, |scopes| {
            let body = scopes
                .iter()
                .find(|s| s.node().kind() == "body_statement")
                .unwrap();
            let texts: Vec<_> = body.comments().iter().map(CstNode::text).collect();
            assert_eq!(texts, ["# first", "# middle", "# last"]);
        });
    }

    #[test]
    fn test_non_scope_node() {
        with_scopes("x = 1\n", |scopes| {
            assert_eq!(scopes.len(), 1);
            assert_eq!(scopes[0].node().kind(), "program");
        });
        assert!(is_scope_kind("block_body"));
        assert!(!is_scope_kind("class"));
    }
}
