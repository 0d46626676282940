//! Association of comments with the statements of a scope.

use ordo_text_size::TextRange;

use crate::{CstNode, Scope};

/// Comments attached to one statement.
#[derive(Debug, Clone, Default)]
pub struct AssociatedComments<'a> {
    /// Own-line comments directly above the statement, in source order.
    pub leading: Vec<CstNode<'a>>,
    /// A comment on the line the statement ends on.
    pub trailing: Vec<CstNode<'a>>,
}

impl<'a> AssociatedComments<'a> {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CstNode<'a>> {
        self.leading.iter().chain(&self.trailing)
    }

    /// Extend `range` to cover every associated comment.
    pub fn cover(&self, range: TextRange) -> TextRange {
        self.iter().fold(range, |acc, comment| acc.cover(comment.range()))
    }
}

/// Comment lookup for every statement of a scope, keyed by statement index.
#[derive(Debug, Clone, Default)]
pub struct CommentMap<'a> {
    entries: Vec<AssociatedComments<'a>>,
}

impl<'a> CommentMap<'a> {
    pub fn from_scope(scope: &Scope<'a>) -> Self {
        let statements = scope.statements();
        let mut entries = vec![AssociatedComments::default(); statements.len()];
        let mut comments = scope.comments().iter().copied().peekable();
        let mut pending: Vec<CstNode<'a>> = Vec::new();
        let mut previous: Option<usize> = None;

        for stmt in statements {
            let start = stmt.node().range().start();
            while let Some(comment) = comments.next_if(|c| c.range().start() < start) {
                match previous {
                    Some(prev)
                        if pending.is_empty()
                            && comment.start_row() == statements[prev].node().end_row() =>
                    {
                        entries[prev].trailing.push(comment);
                    }
                    _ => pending.push(comment),
                }
            }

            entries[stmt.index()].leading = leading_run(&pending, stmt.node().start_row());
            pending.clear();
            previous = Some(stmt.index());
        }

        if let Some(prev) = previous {
            if let Some(comment) = comments.next() {
                if comment.start_row() == statements[prev].node().end_row() {
                    entries[prev].trailing.push(comment);
                }
            }
        }

        Self { entries }
    }

    /// Comments of the statement at `index`.
    pub fn get(&self, index: usize) -> Option<&AssociatedComments<'a>> {
        self.entries.get(index)
    }

    pub fn leading(&self, index: usize) -> &[CstNode<'a>] {
        self.get(index)
            .map(|c| c.leading.as_slice())
            .unwrap_or_default()
    }

    pub fn trailing(&self, index: usize) -> &[CstNode<'a>] {
        self.get(index)
            .map(|c| c.trailing.as_slice())
            .unwrap_or_default()
    }

    /// Extend `range` to cover the comments of the statement at `index`.
    pub fn cover(&self, index: usize, range: TextRange) -> TextRange {
        self.get(index).map_or(range, |c| c.cover(range))
    }
}

/// The run of own-line comments that ends on the row right above `row`,
/// with no blank line inside it.
fn leading_run<'a>(pending: &[CstNode<'a>], row: usize) -> Vec<CstNode<'a>> {
    let mut next_row = row;
    let mut start = pending.len();
    for comment in pending.iter().rev() {
        if !comment.starts_line() || comment.end_row() + 1 != next_row {
            break;
        }
        next_row = comment.start_row();
        start -= 1;
    }
    pending[start..].to_vec()
}
