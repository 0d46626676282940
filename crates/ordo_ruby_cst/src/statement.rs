//! Statement-level view of the direct children of a scope.
//!
//! Every child is classified once into a closed [`StatementKind`]; the linter
//! matches on it exhaustively instead of probing raw node kinds.

use ordo_text_size::{Ranged, TextRange};

use crate::CstNode;

/// A method definition (`def name` or `def self.name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Definition<'a> {
    pub name: &'a str,
    /// True for `def self.name` / `def obj.name`.
    pub singleton: bool,
}

/// An `alias new_name old_name` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias<'a> {
    pub new_name: &'a str,
    pub old_name: &'a str,
}

/// A method call statement: `foo`, `foo :a, :b`, `obj.foo`, `foo { ... }`.
#[derive(Debug, Clone)]
pub struct Call<'a> {
    pub method: &'a str,
    pub receiver: Option<CstNode<'a>>,
    pub arguments: Vec<CstNode<'a>>,
    pub block: Option<CstNode<'a>>,
}

impl<'a> Call<'a> {
    pub fn has_receiver(&self) -> bool {
        self.receiver.is_some()
    }

    /// A receiverless call without arguments or block, e.g. a bare `private`.
    pub fn is_bare(&self) -> bool {
        self.receiver.is_none() && self.arguments.is_empty() && self.block.is_none()
    }

    /// The method name named by the last argument, when it is a symbol.
    pub fn last_symbol_argument(&self) -> Option<&'a str> {
        self.arguments.last().and_then(symbol_name)
    }

    /// The method defined inline by the first argument (`memoize def foo`).
    pub fn first_argument_definition(&self) -> Option<Definition<'a>> {
        let first = self.arguments.first()?;
        definition(first)
    }

    fn from_node(node: CstNode<'a>) -> Option<Self> {
        let method = node.child_by_field_name("method")?.text();
        let arguments = node
            .child_by_field_name("arguments")
            .map(|args| args.named_children().filter(|n| !n.is_comment()).collect())
            .unwrap_or_default();
        Some(Self {
            method,
            receiver: node.child_by_field_name("receiver"),
            arguments,
            block: node.child_by_field_name("block"),
        })
    }
}

/// The closed set of statement shapes the linter distinguishes.
#[derive(Debug, Clone, is_macro::Is)]
pub enum StatementKind<'a> {
    MethodDef(Definition<'a>),
    SingletonMethodDef(Definition<'a>),
    Call(Call<'a>),
    Alias(Alias<'a>),
    Other,
}

/// A direct child of a scope together with its position among siblings.
#[derive(Debug, Clone)]
pub struct Statement<'a> {
    node: CstNode<'a>,
    index: usize,
    kind: StatementKind<'a>,
}

impl<'a> Statement<'a> {
    /// Classify `node`, the `index`-th statement of its scope.
    pub fn from_node(node: CstNode<'a>, index: usize) -> Self {
        let kind = match node.kind() {
            "method" | "singleton_method" => match definition(&node) {
                Some(def) if def.singleton => StatementKind::SingletonMethodDef(def),
                Some(def) => StatementKind::MethodDef(def),
                None => StatementKind::Other,
            },
            "alias" => alias(&node).map_or(StatementKind::Other, StatementKind::Alias),
            "call" => Call::from_node(node).map_or(StatementKind::Other, StatementKind::Call),
            // A lone identifier statement is a receiverless call without arguments.
            "identifier" => StatementKind::Call(Call {
                method: node.text(),
                receiver: None,
                arguments: Vec::new(),
                block: None,
            }),
            _ => StatementKind::Other,
        };
        Self { node, index, kind }
    }

    pub fn node(&self) -> CstNode<'a> {
        self.node
    }

    /// Position among the scope's statements (comments excluded).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> &StatementKind<'a> {
        &self.kind
    }

    pub fn text(&self) -> &'a str {
        self.node.text()
    }

    /// The definition made by this statement, if it is a `def`.
    pub fn definition(&self) -> Option<Definition<'a>> {
        match &self.kind {
            StatementKind::MethodDef(def) | StatementKind::SingletonMethodDef(def) => Some(*def),
            StatementKind::Call(_) | StatementKind::Alias(_) | StatementKind::Other => None,
        }
    }

    pub fn as_call(&self) -> Option<&Call<'a>> {
        self.kind.as_call()
    }

    pub fn as_alias(&self) -> Option<&Alias<'a>> {
        self.kind.as_alias()
    }
}

impl Ranged for Statement<'_> {
    fn range(&self) -> TextRange {
        self.node.range()
    }
}

fn definition<'a>(node: &CstNode<'a>) -> Option<Definition<'a>> {
    let singleton = match node.kind() {
        "method" => false,
        "singleton_method" => true,
        _ => return None,
    };
    let name = node.child_by_field_name("name")?.text();
    Some(Definition { name, singleton })
}

fn alias<'a>(node: &CstNode<'a>) -> Option<Alias<'a>> {
    let new_name = method_name_operand(&node.child_by_field_name("name")?)?;
    let old_name = method_name_operand(&node.child_by_field_name("alias")?)?;
    Some(Alias { new_name, old_name })
}

/// The name denoted by a symbol literal: `:foo` and `:"foo"` both give `foo`.
pub fn symbol_name<'a>(node: &CstNode<'a>) -> Option<&'a str> {
    let text = node.text();
    match node.kind() {
        "simple_symbol" => text.strip_prefix(':'),
        "delimited_symbol" => {
            let quoted = text.strip_prefix(':')?;
            quoted
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .or_else(|| quoted.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        }
        _ => None,
    }
}

/// The method name written as an `alias` operand: a bare name or a symbol.
pub fn method_name_operand<'a>(node: &CstNode<'a>) -> Option<&'a str> {
    match node.kind() {
        "simple_symbol" | "delimited_symbol" => symbol_name(node),
        "identifier" | "constant" | "setter" | "operator" | "global_variable" => {
            Some(node.text())
        }
        _ => None,
    }
}
