//! Print the tree-sitter syntax tree of a Ruby file.
//!
//! Usage: `dump_ruby_ast <file.rb>`

use std::process::ExitCode;

use ordo_ruby_parser::RubyParser;

fn print_node(node: tree_sitter::Node, source: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    let start = node.start_position();
    let end = node.end_position();
    let field_text = if node.child_count() == 0 {
        format!(" {:?}", node.utf8_text(source.as_bytes()).unwrap_or(""))
    } else {
        String::new()
    };
    println!(
        "{indent}{} [{}:{}-{}:{}]{field_text}",
        node.kind(),
        start.row + 1,
        start.column + 1,
        end.row + 1,
        end.column + 1,
    );

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        print_node(child, source, depth + 1);
    }
}

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: dump_ruby_ast <file.rb>");
        return ExitCode::from(2);
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut parser = RubyParser::new();
    let Some(result) = parser.parse(&source) else {
        eprintln!("{path}: failed to parse");
        return ExitCode::FAILURE;
    };

    print_node(result.tree.root_node(), &source, 0);
    ExitCode::SUCCESS
}
