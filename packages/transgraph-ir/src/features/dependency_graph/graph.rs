//! Definition dependency graph (petgraph)
//!
//! Directed graph where:
//! - Nodes are `CodeNode`s keyed by qualified name
//! - `Call` edges point caller → callee
//! - `Membership` edges point method → owning class
//!
//! Nodes are never removed, so `NodeIndex` values stay stable and node
//! iteration follows insertion (traversal) order.

use ahash::AHashMap;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::error::{GraphError, GraphResult};
use crate::config::CollisionPolicy;
use crate::features::annotation::SignatureAnnotator;
use crate::shared::models::{CodeNode, EdgeKind, NodeKind};

/// Outcome of inserting a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeInsert {
    /// A new node was created
    Inserted(NodeIndex),
    /// The name was already taken; the existing node is returned
    Existing(NodeIndex),
}

impl NodeInsert {
    pub fn index(self) -> NodeIndex {
        match self {
            NodeInsert::Inserted(idx) | NodeInsert::Existing(idx) => idx,
        }
    }
}

/// Dependency graph over extracted definitions
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<CodeNode, EdgeKind>,

    /// Qualified name → node index
    index: AHashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, applying the collision policy on name clashes
    pub fn insert_node(&mut self, node: CodeNode, policy: CollisionPolicy) -> GraphResult<NodeInsert> {
        if let Some(&existing) = self.index.get(&node.qualified_name) {
            let first = &self.graph[existing];
            return match policy {
                CollisionPolicy::FirstSeen => {
                    tracing::warn!(
                        qname = %node.qualified_name,
                        kept = %format!("{}:{}", first.file_path, first.lineno()),
                        dropped = %format!("{}:{}", node.file_path, node.lineno()),
                        "qualified name collision; keeping first definition"
                    );
                    Ok(NodeInsert::Existing(existing))
                }
                CollisionPolicy::Reject => Err(GraphError::DuplicateDefinition {
                    qname: node.qualified_name.clone(),
                    first: format!("{}:{}", first.file_path, first.lineno()),
                    second: format!("{}:{}", node.file_path, node.lineno()),
                }),
            };
        }

        let qname = node.qualified_name.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(qname, idx);
        Ok(NodeInsert::Inserted(idx))
    }

    /// Add an edge unless one already joins the same pair. Returns `true` if added.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, kind: EdgeKind) -> bool {
        if self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, kind);
        true
    }

    /// Drop every `n → n` edge. Returns how many were removed.
    pub fn remove_self_loops(&mut self) -> usize {
        let before = self.graph.edge_count();
        self.graph
            .retain_edges(|g, e| g.edge_endpoints(e).map_or(true, |(a, b)| a != b));
        before - self.graph.edge_count()
    }

    pub fn index_of(&self, qname: &str) -> Option<NodeIndex> {
        self.index.get(qname).copied()
    }

    pub fn contains(&self, qname: &str) -> bool {
        self.index.contains_key(qname)
    }

    pub fn node(&self, idx: NodeIndex) -> &CodeNode {
        &self.graph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut CodeNode {
        &mut self.graph[idx]
    }

    pub fn get(&self, qname: &str) -> Option<&CodeNode> {
        self.index_of(qname).map(|idx| &self.graph[idx])
    }

    pub fn get_mut(&mut self, qname: &str) -> Option<&mut CodeNode> {
        let idx = self.index_of(qname)?;
        Some(&mut self.graph[idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices in insertion order
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &CodeNode> + '_ {
        self.graph.node_weights()
    }

    /// All edges as `(from, to, kind)` qualified-name triples
    pub fn edges(&self) -> Vec<(&str, &str, EdgeKind)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].qualified_name.as_str(),
                    self.graph[e.target()].qualified_name.as_str(),
                    *e.weight(),
                )
            })
            .collect()
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(a), Some(b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn edge_kind(&self, from: &str, to: &str) -> Option<EdgeKind> {
        let edge = self.graph.find_edge(self.index_of(from)?, self.index_of(to)?)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Nodes with an edge into `qname` (its callers, or the methods of a class)
    pub fn predecessors(&self, qname: &str) -> GraphResult<Vec<&CodeNode>> {
        self.neighbors(qname, Direction::Incoming)
    }

    /// Nodes `qname` has an edge to (its callees and owning class)
    pub fn successors(&self, qname: &str) -> GraphResult<Vec<&CodeNode>> {
        self.neighbors(qname, Direction::Outgoing)
    }

    fn neighbors(&self, qname: &str, direction: Direction) -> GraphResult<Vec<&CodeNode>> {
        let idx = self
            .index_of(qname)
            .ok_or_else(|| GraphError::UnknownNode(qname.to_string()))?;
        let mut found: Vec<NodeIndex> = self.graph.neighbors_directed(idx, direction).collect();
        found.sort_unstable();
        found.dedup();
        Ok(found.into_iter().map(|n| &self.graph[n]).collect())
    }

    /// Store a generated artifact on a node; graph algorithms never read it
    pub fn attach_translation(&mut self, qname: &str, text: impl Into<String>) -> GraphResult<()> {
        let node = self
            .get_mut(qname)
            .ok_or_else(|| GraphError::UnknownNode(qname.to_string()))?;
        node.translation = Some(text.into());
        Ok(())
    }

    /// Fill `params` / `return_type` of function nodes the annotator knows.
    /// Returns the number of nodes updated.
    pub fn annotate(&mut self, annotator: &dyn SignatureAnnotator) -> usize {
        let mut updated = 0;
        for node in self.graph.node_weights_mut() {
            if node.kind != NodeKind::Function {
                continue;
            }
            if let Some(signature) = annotator.signature_for(&node.qualified_name) {
                node.params = signature.params;
                node.return_type = signature.return_type;
                updated += 1;
            }
        }
        updated
    }

    /// Graphviz rendering: classes as boxes, functions as ellipses
    pub fn to_dot(&self) -> String {
        let dot = Dot::with_attr_getters(
            &self.graph,
            &[],
            &|_, _| String::new(),
            &|_, (_, node)| match node.kind {
                NodeKind::Class => "shape = box".to_string(),
                NodeKind::Function => "shape = ellipse".to_string(),
            },
        );
        format!("{}", dot)
    }

    pub(crate) fn inner(&self) -> &DiGraph<CodeNode, EdgeKind> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Span;

    fn func(qname: &str) -> CodeNode {
        CodeNode::new(qname, NodeKind::Function, "", "m.py", Span::new(1, 0, 1, 0))
    }

    fn class(qname: &str) -> CodeNode {
        CodeNode::new(qname, NodeKind::Class, "", "m.py", Span::new(1, 0, 1, 0))
    }

    #[test]
    fn test_insert_first_seen_keeps_original() {
        let mut g = DependencyGraph::new();
        let a = g.insert_node(func("a"), CollisionPolicy::FirstSeen).unwrap();
        let mut dup = func("a");
        dup.source_text = "def a(): return 2".to_string();
        let b = g.insert_node(dup, CollisionPolicy::FirstSeen).unwrap();

        assert!(matches!(a, NodeInsert::Inserted(_)));
        assert_eq!(b, NodeInsert::Existing(a.index()));
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.get("a").unwrap().source_text, "");
    }

    #[test]
    fn test_insert_reject_errors() {
        let mut g = DependencyGraph::new();
        g.insert_node(func("a"), CollisionPolicy::Reject).unwrap();
        let err = g.insert_node(func("a"), CollisionPolicy::Reject).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateDefinition { .. }));
    }

    #[test]
    fn test_add_edge_dedups() {
        let mut g = DependencyGraph::new();
        let a = g.insert_node(func("a"), CollisionPolicy::FirstSeen).unwrap().index();
        let b = g.insert_node(func("b"), CollisionPolicy::FirstSeen).unwrap().index();

        assert!(g.add_edge(a, b, EdgeKind::Call));
        assert!(!g.add_edge(a, b, EdgeKind::Call));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_kind("a", "b"), Some(EdgeKind::Call));
    }

    #[test]
    fn test_remove_self_loops() {
        let mut g = DependencyGraph::new();
        let a = g.insert_node(func("a"), CollisionPolicy::FirstSeen).unwrap().index();
        let b = g.insert_node(func("b"), CollisionPolicy::FirstSeen).unwrap().index();
        g.add_edge(a, a, EdgeKind::Call);
        g.add_edge(a, b, EdgeKind::Call);
        g.add_edge(b, b, EdgeKind::Call);

        assert_eq!(g.remove_self_loops(), 2);
        assert_eq!(g.edges(), vec![("a", "b", EdgeKind::Call)]);
    }

    #[test]
    fn test_neighbor_queries() {
        let mut g = DependencyGraph::new();
        let c = g.insert_node(class("C"), CollisionPolicy::FirstSeen).unwrap().index();
        let m = g.insert_node(func("C.m"), CollisionPolicy::FirstSeen).unwrap().index();
        let f = g.insert_node(func("f"), CollisionPolicy::FirstSeen).unwrap().index();
        g.add_edge(m, c, EdgeKind::Membership);
        g.add_edge(m, f, EdgeKind::Call);

        let succ: Vec<_> = g.successors("C.m").unwrap().iter().map(|n| n.qualified_name.as_str()).collect();
        assert_eq!(succ, vec!["C", "f"]);
        let pred: Vec<_> = g.predecessors("C").unwrap().iter().map(|n| n.qualified_name.as_str()).collect();
        assert_eq!(pred, vec!["C.m"]);
        assert_eq!(g.successors("missing").unwrap_err(), GraphError::UnknownNode("missing".into()));
    }

    #[test]
    fn test_attach_translation() {
        let mut g = DependencyGraph::new();
        g.insert_node(func("a"), CollisionPolicy::FirstSeen).unwrap();
        g.attach_translation("a", "pub fn a() {}").unwrap();
        assert_eq!(g.get("a").unwrap().translation.as_deref(), Some("pub fn a() {}"));
        assert!(g.attach_translation("zzz", "").is_err());
    }

    #[test]
    fn test_to_dot_shapes() {
        let mut g = DependencyGraph::new();
        let c = g.insert_node(class("C"), CollisionPolicy::FirstSeen).unwrap().index();
        let m = g.insert_node(func("C.m"), CollisionPolicy::FirstSeen).unwrap().index();
        g.add_edge(m, c, EdgeKind::Membership);

        let dot = g.to_dot();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("C.m"));
        assert!(dot.contains("shape = box"));
        assert!(dot.contains("shape = ellipse"));
        assert!(dot.contains("member"));
    }
}
