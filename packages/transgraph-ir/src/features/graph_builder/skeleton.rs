//! Class skeleton text
//!
//! A class node carries a condensed view of its definition instead of the
//! full body: the header line, each class-level assignment verbatim, and
//! each method signature with its body replaced by a marker.

use tree_sitter::Node;

use crate::features::parsing::infrastructure::tree_sitter::languages::python::{
    fields, node_kinds,
};
use crate::shared::utils::tree_sitter::{named_children, node_text, text_between};

/// Build the skeleton of a `class_definition` node
pub fn class_skeleton(class: &Node, source: &str, elided_marker: &str) -> String {
    let Some(body) = class.child_by_field_name(fields::BODY) else {
        return node_text(class, source).trim_end().to_string();
    };

    let header = text_between(source, class.start_byte(), body.start_byte()).trim_end();
    let mut parts = vec![header.to_string()];

    for stmt in named_children(&body) {
        match stmt.kind() {
            node_kinds::EXPRESSION_STATEMENT if is_assignment_statement(&stmt) => {
                parts.push(node_text(&stmt, source).trim_end().to_string());
            }
            node_kinds::ASSIGNMENT => {
                parts.push(node_text(&stmt, source).trim_end().to_string());
            }
            node_kinds::FUNCTION_DEF => {
                if let Some(sig) = signature_line(&stmt, &stmt, source) {
                    parts.push(format!("{}{}", sig, elided_marker));
                }
            }
            node_kinds::DECORATED_DEF => {
                let inner = stmt.child_by_field_name(fields::DEFINITION);
                if let Some(func) = inner.filter(|d| d.kind() == node_kinds::FUNCTION_DEF) {
                    if let Some(sig) = signature_line(&stmt, &func, source) {
                        parts.push(format!("{}{}", sig, elided_marker));
                    }
                }
            }
            _ => {}
        }
    }

    parts.join("\n")
}

/// `expression_statement` wrapping a single assignment
fn is_assignment_statement(stmt: &Node) -> bool {
    stmt.named_child_count() == 1
        && stmt
            .named_child(0)
            .map_or(false, |child| child.kind() == node_kinds::ASSIGNMENT)
}

/// Text from `start` up to the body of `func`, each line de-indented
fn signature_line(start: &Node, func: &Node, source: &str) -> Option<String> {
    let body = func.child_by_field_name(fields::BODY)?;
    let text = text_between(source, start.start_byte(), body.start_byte()).trim_end();
    Some(text.lines().map(str::trim_start).collect::<Vec<_>>().join("\n"))
}
