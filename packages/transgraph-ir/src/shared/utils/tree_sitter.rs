//! Tree-sitter Utility Functions
//!
//! Common helpers for working with tree-sitter nodes, shared by the
//! definition extractor and the stub annotator.

use crate::shared::models::Span;
use tree_sitter::Node;

// ═══════════════════════════════════════════════════════════════════════════
// Node Traversal Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// All direct children of a node, in source order
#[inline]
pub fn children<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// All named direct children of a node, in source order
#[inline]
pub fn named_children<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// First ERROR or MISSING node in pre-order, if any
pub fn first_error_node<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    if !node.has_error() {
        return None;
    }
    let mut stack = vec![*node];
    while let Some(current) = stack.pop() {
        if current.is_error() || current.is_missing() {
            return Some(current);
        }
        let mut kids = children(&current);
        kids.reverse();
        stack.extend(kids.into_iter().filter(|k| k.has_error() || k.is_missing()));
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
// Text Extraction Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Text of a node (empty if the byte range is not valid for `source`)
#[inline]
pub fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Text between two byte offsets
#[inline]
pub fn text_between(source: &str, start: usize, end: usize) -> &str {
    source.get(start..end).unwrap_or("")
}

/// Text of the named field child of a node
#[inline]
pub fn field_text<'s>(node: &Node, field: &str, source: &'s str) -> Option<&'s str> {
    node.child_by_field_name(field)
        .map(|child| node_text(&child, source))
}

// ═══════════════════════════════════════════════════════════════════════════
// Span Conversion Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Convert tree-sitter node to Span (1-indexed lines)
#[inline]
pub fn node_to_span(node: &Node) -> Span {
    let start_pos = node.start_position();
    let end_pos = node.end_position();

    Span::new(
        start_pos.row as u32 + 1,
        start_pos.column as u32,
        end_pos.row as u32 + 1,
        end_pos.column as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse_python(code: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::language())
            .unwrap();
        parser.parse(code, None).unwrap()
    }

    #[test]
    fn test_field_text() {
        let code = "class Child(Base): pass";
        let tree = parse_python(code);
        let class = tree.root_node().child(0).unwrap();

        assert_eq!(field_text(&class, "name", code), Some("Child"));
        assert_eq!(field_text(&class, "superclasses", code), Some("(Base)"));
    }

    #[test]
    fn test_node_to_span() {
        let code = "\ndef foo():\n    pass";
        let tree = parse_python(code);
        let func = tree.root_node().named_child(0).unwrap();

        let span = node_to_span(&func);
        assert_eq!(span.start_line, 2);
        assert_eq!(span.start_col, 0);
        assert_eq!(span.end_line, 3);
    }

    #[test]
    fn test_first_error_node() {
        let ok = parse_python("x = 1\n");
        assert!(first_error_node(&ok.root_node()).is_none());

        let broken = parse_python("def (:\n");
        assert!(first_error_node(&broken.root_node()).is_some());
    }

    #[test]
    fn test_named_children_skip_punctuation() {
        let code = "class C(A, b.B): pass";
        let tree = parse_python(code);
        let class = tree.root_node().child(0).unwrap();
        let args = class.child_by_field_name("superclasses").unwrap();

        let kinds: Vec<_> = named_children(&args).iter().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec!["identifier", "attribute"]);
    }
}
