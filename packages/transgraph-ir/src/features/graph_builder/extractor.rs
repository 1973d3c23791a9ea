//! Scope-aware definition extractor
//!
//! One depth-first walk per file. It creates `CodeNode`s for module-level
//! and class-member definitions, adds membership edges, and classifies every
//! call it meets while a definition is active. Definitions nested inside a
//! function body are not extracted, and their subtrees are not visited.

use petgraph::graph::NodeIndex;
use tree_sitter::Node;

use super::domain::{BuildStats, DeferredCall, Resolution};
use super::resolver::{classify_call, resolve_scoped, scoped_name, CallTarget};
use super::skeleton::class_skeleton;
use crate::config::BuildConfig;
use crate::features::dependency_graph::{DependencyGraph, GraphResult, NodeInsert};
use crate::features::parsing::infrastructure::tree_sitter::languages::python::{
    fields, is_name_like, node_kinds,
};
use crate::shared::models::{CodeNode, EdgeKind, NodeKind};
use crate::shared::utils::tree_sitter::{children, field_text, named_children, node_text, node_to_span};
use crate::shared::utils::ScopeStack;

pub struct DefinitionExtractor<'b> {
    config: &'b BuildConfig,
    graph: &'b mut DependencyGraph,
    deferred: &'b mut Vec<DeferredCall>,
    stats: &'b mut BuildStats,
    file_path: &'b str,
    source: &'b str,

    scope_stack: ScopeStack,
    /// Qualified names of enclosing classes, innermost last
    class_stack: Vec<String>,
    /// Definition whose body is being walked
    current: Option<NodeIndex>,
}

impl<'b> DefinitionExtractor<'b> {
    pub fn new(
        config: &'b BuildConfig,
        graph: &'b mut DependencyGraph,
        deferred: &'b mut Vec<DeferredCall>,
        stats: &'b mut BuildStats,
        file_path: &'b str,
        source: &'b str,
    ) -> Self {
        Self {
            config,
            graph,
            deferred,
            stats,
            file_path,
            source,
            scope_stack: ScopeStack::new(),
            class_stack: Vec::new(),
            current: None,
        }
    }

    /// Walk a whole file
    pub fn run(mut self, root: &Node) -> GraphResult<()> {
        self.traverse(root)
    }

    fn traverse(&mut self, node: &Node) -> GraphResult<()> {
        match node.kind() {
            node_kinds::CLASS_DEF => return self.enter_class(node),
            node_kinds::FUNCTION_DEF => return self.enter_function(node),
            node_kinds::CALL => {
                if self.visit_call(node) {
                    return Ok(());
                }
            }
            _ => {}
        }
        self.traverse_children(node)
    }

    fn traverse_children(&mut self, node: &Node) -> GraphResult<()> {
        for child in children(node) {
            self.traverse(&child)?;
        }
        Ok(())
    }

    fn current_kind(&self) -> Option<NodeKind> {
        self.current.map(|idx| self.graph.node(idx).kind)
    }

    fn enter_class(&mut self, node: &Node) -> GraphResult<()> {
        if self.current_kind() == Some(NodeKind::Function) {
            return Ok(());
        }
        let Some(name) = field_text(node, fields::NAME, self.source) else {
            return self.traverse_children(node);
        };

        let qname = self.scope_stack.qname_with(name);
        let skeleton = class_skeleton(node, self.source, &self.config.elided_body_marker);
        let class_node = CodeNode::new(
            qname,
            NodeKind::Class,
            skeleton,
            self.file_path,
            node_to_span(node),
        )
        .with_base_names(base_names(node, self.source));
        let idx = self.define(class_node)?;

        let class_qname = self.graph.node(idx).qualified_name.clone();
        self.scope_stack.push(name);
        self.class_stack.push(class_qname);
        let prev = self.current.replace(idx);

        let result = self.traverse_children(node);

        self.current = prev;
        self.class_stack.pop();
        self.scope_stack.pop();
        result
    }

    fn enter_function(&mut self, node: &Node) -> GraphResult<()> {
        if self.current_kind() == Some(NodeKind::Function) {
            return Ok(());
        }
        let Some(name) = field_text(node, fields::NAME, self.source) else {
            return self.traverse_children(node);
        };

        let qname = self.scope_stack.qname_with(name);
        let func_node = CodeNode::new(
            qname,
            NodeKind::Function,
            node_text(node, self.source),
            self.file_path,
            node_to_span(node),
        );
        let idx = self.define(func_node)?;

        if let Some(owner) = self.current {
            if self.graph.node(owner).is_class() && self.graph.add_edge(idx, owner, EdgeKind::Membership) {
                self.stats.membership_edges += 1;
            }
        }

        self.scope_stack.push(name);
        let prev = self.current.replace(idx);

        let result = self.traverse_children(node);

        self.current = prev;
        self.scope_stack.pop();
        result
    }

    /// Insert a node; on a name clash the surviving node becomes the context
    fn define(&mut self, node: CodeNode) -> GraphResult<NodeIndex> {
        let kind = node.kind;
        match self.graph.insert_node(node, self.config.collision_policy)? {
            NodeInsert::Inserted(idx) => {
                match kind {
                    NodeKind::Function => self.stats.functions += 1,
                    NodeKind::Class => self.stats.classes += 1,
                }
                tracing::debug!(
                    qname = %self.graph.node(idx).qualified_name,
                    kind = kind.as_str(),
                    file = self.file_path,
                    "definition extracted"
                );
                Ok(idx)
            }
            NodeInsert::Existing(idx) => {
                self.stats.collisions += 1;
                Ok(idx)
            }
        }
    }

    /// Returns `true` when the call was bound by class scope; the call's
    /// subtree is then not walked further.
    fn visit_call(&mut self, node: &Node) -> bool {
        let Some(caller) = self.current else {
            return false;
        };

        match classify_call(node, self.source, &self.config.receiver_name) {
            CallTarget::Receiver { method, raw } => {
                let Some(class_qname) = self.class_stack.last() else {
                    self.defer(caller, raw, None);
                    return false;
                };
                match resolve_scoped(self.graph, class_qname, method) {
                    Resolution::ByScope(target) => {
                        self.graph.add_edge(caller, target, EdgeKind::Call);
                        self.stats.record(Resolution::ByScope(target));
                        tracing::debug!(
                            caller = %self.graph.node(caller).qualified_name,
                            callee = %self.graph.node(target).qualified_name,
                            "call resolved by scope"
                        );
                        true
                    }
                    _ => {
                        let scoped = self
                            .config
                            .resolve_forward_self_calls
                            .then(|| scoped_name(class_qname, method));
                        self.defer(caller, raw, scoped);
                        false
                    }
                }
            }
            CallTarget::Named(raw) => {
                self.defer(caller, raw, None);
                false
            }
            CallTarget::Opaque => {
                self.stats.record(Resolution::Unresolved);
                tracing::trace!(
                    caller = %self.graph.node(caller).qualified_name,
                    line = node.start_position().row + 1,
                    "call through computed expression left unresolved"
                );
                false
            }
        }
    }

    fn defer(&mut self, caller: NodeIndex, callee: &str, scoped: Option<String>) {
        self.deferred.push(DeferredCall {
            caller,
            callee: callee.to_string(),
            scoped,
        });
    }
}

/// Base classes written as plain names or dotted paths
fn base_names(class: &Node, source: &str) -> Vec<String> {
    let Some(superclasses) = class.child_by_field_name(fields::SUPERCLASSES) else {
        return Vec::new();
    };
    named_children(&superclasses)
        .iter()
        .filter(|arg| is_name_like(arg.kind()))
        .map(|arg| node_text(arg, source).to_string())
        .collect()
}
