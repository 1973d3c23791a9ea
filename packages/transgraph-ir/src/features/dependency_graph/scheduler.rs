//! Translation schedule
//!
//! A topological sort over the stored edge direction places every caller
//! before its callee and every method before its class. Reversing it yields
//! the processing order: callees first, classes before their methods.

use ahash::AHashMap;
use petgraph::algo::{tarjan_scc, toposort};

use super::error::{GraphError, GraphResult};
use super::graph::DependencyGraph;
use crate::shared::models::NodeKind;

/// One scheduled definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledNode {
    pub qname: String,
    pub kind: NodeKind,
}

/// Dependency-first total order over all nodes
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    entries: Vec<ScheduledNode>,
    positions: AHashMap<String, usize>,
}

impl Schedule {
    fn from_entries(entries: Vec<ScheduledNode>) -> Self {
        let positions = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.qname.clone(), i))
            .collect();
        Self { entries, positions }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledNode> + '_ {
        self.entries.iter()
    }

    /// Qualified names in processing order
    pub fn qnames(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.qname.as_str()).collect()
    }

    pub fn position(&self, qname: &str) -> Option<usize> {
        self.positions.get(qname).copied()
    }

    pub fn contains(&self, qname: &str) -> bool {
        self.positions.contains_key(qname)
    }

    /// The schedule restricted to one kind, order preserved
    pub fn of_kind(&self, kind: NodeKind) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.qname.as_str())
            .collect()
    }
}

/// Compute the processing order for a cycle-free graph
pub fn schedule(graph: &DependencyGraph) -> GraphResult<Schedule> {
    let inner = graph.inner();

    let mut order = toposort(inner, None).map_err(|cycle| {
        let offender = cycle.node_id();
        let members = tarjan_scc(inner)
            .into_iter()
            .find(|scc| scc.contains(&offender))
            .unwrap_or_else(|| vec![offender]);
        let mut names: Vec<String> = members
            .into_iter()
            .map(|idx| inner[idx].qualified_name.clone())
            .collect();
        names.sort();
        GraphError::CyclicDependency { cycle: names }
    })?;

    // Callers come first in topological order; flip to dependencies-first
    order.reverse();

    let entries = order
        .into_iter()
        .map(|idx| ScheduledNode {
            qname: inner[idx].qualified_name.clone(),
            kind: inner[idx].kind,
        })
        .collect();

    let schedule = Schedule::from_entries(entries);
    tracing::debug!(nodes = schedule.len(), "schedule computed");
    Ok(schedule)
}
