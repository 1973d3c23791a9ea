//! IR assembly
//!
//! 1. Line-level bodies: `body_lines` is the node's source text split into lines.
//! 2. Field inference: receiver attribute assignments found in any method
//!    body are folded into the owning class's `fields` (first-seen order,
//!    no duplicates). Runs over all nodes before any record is built.
//! 3. One `IrRecord` per node, in schedule order when one is given.

use ahash::AHashMap;
use regex::Regex;
use std::path::Path;

use super::record::IrRecord;
use crate::features::dependency_graph::{DependencyGraph, GraphError, GraphResult, Schedule};
use crate::shared::models::{NodeKind, Result};

pub struct IrAssembler {
    /// `<receiver>.<name> = ...` (optionally annotated), but not `==`
    field_assignment: Regex,
}

impl IrAssembler {
    pub fn new(receiver_name: &str) -> std::result::Result<Self, regex::Error> {
        let pattern = format!(
            r"^\s*{}\.([A-Za-z_]\w*)\s*(?::[^=]*)?=(?:[^=]|$)",
            regex::escape(receiver_name)
        );
        Ok(Self {
            field_assignment: Regex::new(&pattern)?,
        })
    }

    /// Attribute name assigned through the receiver on this line, if any
    pub fn assigned_field<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.field_assignment
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Fill `body_lines` / `line_count` from each node's source text
    pub fn build_bodies(&self, graph: &mut DependencyGraph) {
        let indices: Vec<_> = graph.node_indices().collect();
        for idx in indices {
            let node = graph.node_mut(idx);
            node.body_lines = node.source_text.lines().map(str::to_string).collect();
            node.line_count = node.body_lines.len();
        }
    }

    /// Fold receiver attribute assignments into owning classes.
    /// Returns the number of fields newly added.
    pub fn infer_fields(&self, graph: &mut DependencyGraph) -> usize {
        let mut found: Vec<(String, String)> = Vec::new();
        for node in graph.nodes() {
            if node.kind != NodeKind::Function {
                continue;
            }
            let Some(owner) = node.parent_qname() else {
                continue;
            };
            if !graph.get(owner).map_or(false, |n| n.is_class()) {
                continue;
            }
            let lines: Vec<&str> = if node.body_lines.is_empty() {
                node.source_text.lines().collect()
            } else {
                node.body_lines.iter().map(String::as_str).collect()
            };
            for line in lines {
                if let Some(field) = self.assigned_field(line) {
                    found.push((owner.to_string(), field.to_string()));
                }
            }
        }

        let mut added = 0;
        for (owner, field) in found {
            if let Some(class) = graph.get_mut(&owner) {
                if class.add_field(&field) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Bodies, fields, then one record per node
    pub fn assemble(&self, graph: &mut DependencyGraph, schedule: Option<&Schedule>) -> Vec<IrRecord> {
        self.build_bodies(graph);
        let added = self.infer_fields(graph);
        tracing::debug!(fields = added, "class fields inferred");

        match schedule {
            Some(schedule) => schedule
                .iter()
                .filter_map(|entry| graph.get(&entry.qname))
                .map(IrRecord::from_node)
                .collect(),
            None => graph.nodes().map(IrRecord::from_node).collect(),
        }
    }
}

/// Predecessor records followed by successor records of `qname`:
/// the context a generator needs to translate that node
pub fn dependency_context<'r>(
    graph: &DependencyGraph,
    records: &'r [IrRecord],
    qname: &str,
) -> GraphResult<Vec<&'r IrRecord>> {
    let by_name: AHashMap<&str, &IrRecord> =
        records.iter().map(|r| (r.qname.as_str(), r)).collect();
    if !graph.contains(qname) {
        return Err(GraphError::UnknownNode(qname.to_string()));
    }
    let preds = graph.predecessors(qname)?;
    let succs = graph.successors(qname)?;
    Ok(preds
        .into_iter()
        .chain(succs)
        .filter_map(|node| by_name.get(node.qualified_name.as_str()).copied())
        .collect())
}

/// Write records as pretty-printed JSON
pub fn write_ir_json(path: impl AsRef<Path>, records: &[IrRecord]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).map_err(|e| {
        crate::shared::models::CodegraphError::io(format!("cannot write IR: {}", e))
            .with_file(path.display().to_string())
            .with_source(e)
    })?;
    tracing::info!(path = %path.display(), records = records.len(), "IR written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollisionPolicy;
    use crate::shared::models::{CodeNode, Span};

    fn assembler() -> IrAssembler {
        IrAssembler::new("self").unwrap()
    }

    fn insert(graph: &mut DependencyGraph, qname: &str, kind: NodeKind, text: &str) {
        graph
            .insert_node(
                CodeNode::new(qname, kind, text, "m.py", Span::new(1, 0, 1, 0)),
                CollisionPolicy::FirstSeen,
            )
            .unwrap();
    }

    #[test]
    fn test_assigned_field_shapes() {
        let a = assembler();
        assert_eq!(a.assigned_field("        self.x = 1"), Some("x"));
        assert_eq!(a.assigned_field("self._cache: dict = {}"), Some("_cache"));
        assert_eq!(a.assigned_field("self.y=2"), Some("y"));
        assert_eq!(a.assigned_field("if self.x == 1:"), None);
        assert_eq!(a.assigned_field("self.x += 1"), None);
        assert_eq!(a.assigned_field("other.x = 1"), None);
        assert_eq!(a.assigned_field("x = self.y"), None);
        assert_eq!(a.assigned_field("selfish.x = 1"), None);
    }

    #[test]
    fn test_custom_receiver() {
        let a = IrAssembler::new("this").unwrap();
        assert_eq!(a.assigned_field("this.z = 0"), Some("z"));
        assert_eq!(a.assigned_field("self.z = 0"), None);
    }

    #[test]
    fn test_fields_first_seen_order_without_duplicates() {
        let mut graph = DependencyGraph::new();
        insert(&mut graph, "C", NodeKind::Class, "class C:");
        insert(&mut graph, "C.a", NodeKind::Function, "def a(self):\n    self.x = 1");
        insert(
            &mut graph,
            "C.b",
            NodeKind::Function,
            "def b(self):\n    self.x = 2\n    self.y = 3",
        );
        let a = assembler();
        a.build_bodies(&mut graph);

        assert_eq!(a.infer_fields(&mut graph), 2);
        assert_eq!(graph.get("C").unwrap().fields, vec!["x", "y"]);

        // second pass adds nothing and keeps the order
        assert_eq!(a.infer_fields(&mut graph), 0);
        assert_eq!(graph.get("C").unwrap().fields, vec!["x", "y"]);
    }

    #[test]
    fn test_top_level_functions_do_not_contribute() {
        let mut graph = DependencyGraph::new();
        insert(&mut graph, "C", NodeKind::Class, "class C:");
        insert(&mut graph, "f", NodeKind::Function, "def f(self):\n    self.q = 1");
        assert_eq!(assembler().infer_fields(&mut graph), 0);
        assert!(graph.get("C").unwrap().fields.is_empty());
    }

    #[test]
    fn test_bodies_and_line_counts() {
        let mut graph = DependencyGraph::new();
        insert(&mut graph, "f", NodeKind::Function, "def f():\n    a = 1\n    return a");
        let records = assembler().assemble(&mut graph, None);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line_count, 3);
        assert_eq!(records[0].body_lines[2], "    return a");
    }

    #[test]
    fn test_dependency_context_preds_then_succs() {
        let mut graph = DependencyGraph::new();
        insert(&mut graph, "C", NodeKind::Class, "class C:");
        insert(&mut graph, "C.m", NodeKind::Function, "def m(self): pass");
        insert(&mut graph, "main", NodeKind::Function, "def main(): pass");
        let c = graph.index_of("C").unwrap();
        let m = graph.index_of("C.m").unwrap();
        let main = graph.index_of("main").unwrap();
        graph.add_edge(m, c, crate::shared::models::EdgeKind::Membership);
        graph.add_edge(main, m, crate::shared::models::EdgeKind::Call);

        let records = assembler().assemble(&mut graph, None);
        let ctx: Vec<_> = dependency_context(&graph, &records, "C.m")
            .unwrap()
            .iter()
            .map(|r| r.qname.as_str())
            .collect();
        assert_eq!(ctx, vec!["main", "C"]);
        assert!(dependency_context(&graph, &records, "nope").is_err());
    }

    #[test]
    fn test_write_ir_json() {
        let mut graph = DependencyGraph::new();
        insert(&mut graph, "décodé", NodeKind::Function, "def décodé(): pass");
        let records = assembler().assemble(&mut graph, None);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pre_ir.json");
        write_ir_json(&path, &records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("décodé"));
        let back: Vec<IrRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, records);
    }
}
