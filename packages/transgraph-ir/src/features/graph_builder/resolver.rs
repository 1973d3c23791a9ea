//! Edge resolution policy
//!
//! Two tiers, best effort and file-local:
//! 1. `<receiver>.m(...)` inside a class resolves to `<class>.m` if that node
//!    already exists.
//! 2. Any other identifier or dotted-path callee is looked up verbatim in the
//!    qualified-name index after all files are traversed.
//!
//! Aliases, imports and dynamic dispatch are not followed.

use tree_sitter::Node;

use super::domain::{DeferredCall, Resolution};
use crate::features::dependency_graph::DependencyGraph;
use crate::features::parsing::infrastructure::tree_sitter::languages::python::{
    fields, is_name_like, node_kinds,
};
use crate::shared::models::QNAME_SEPARATOR;
use crate::shared::utils::tree_sitter::node_text;

/// Shape of a call target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTarget<'s> {
    /// `<receiver>.method(...)`; `raw` is the full callee text
    Receiver { method: &'s str, raw: &'s str },
    /// `name(...)` or `a.b.c(...)`
    Named(&'s str),
    /// Call through a computed expression (`f()()`, `xs[0]()`, ...)
    Opaque,
}

/// Classify the callee of a `call` node
pub fn classify_call<'s>(call: &Node, source: &'s str, receiver: &str) -> CallTarget<'s> {
    let Some(function) = call.child_by_field_name(fields::FUNCTION) else {
        return CallTarget::Opaque;
    };

    if function.kind() == node_kinds::ATTRIBUTE {
        let object = function.child_by_field_name(fields::OBJECT);
        let attribute = function.child_by_field_name(fields::ATTRIBUTE);
        if let (Some(object), Some(attribute)) = (object, attribute) {
            if object.kind() == node_kinds::IDENTIFIER && node_text(&object, source) == receiver {
                return CallTarget::Receiver {
                    method: node_text(&attribute, source),
                    raw: node_text(&function, source),
                };
            }
        }
    }

    if is_name_like(function.kind()) {
        return CallTarget::Named(node_text(&function, source));
    }
    CallTarget::Opaque
}

/// Tier 1: receiver call against the innermost class scope
pub fn resolve_scoped(graph: &DependencyGraph, class_qname: &str, method: &str) -> Resolution {
    let qname = scoped_name(class_qname, method);
    match graph.index_of(&qname) {
        Some(idx) => Resolution::ByScope(idx),
        None => Resolution::Unresolved,
    }
}

/// Deferred pass: scoped retry (if recorded) then verbatim lookup
pub fn resolve_deferred(graph: &DependencyGraph, call: &DeferredCall) -> Resolution {
    if let Some(idx) = call.scoped.as_deref().and_then(|q| graph.index_of(q)) {
        return Resolution::ByScope(idx);
    }
    match graph.index_of(&call.callee) {
        Some(idx) => Resolution::ByName(idx),
        None => Resolution::Unresolved,
    }
}

pub fn scoped_name(class_qname: &str, method: &str) -> String {
    format!("{}{}{}", class_qname, QNAME_SEPARATOR, method)
}
