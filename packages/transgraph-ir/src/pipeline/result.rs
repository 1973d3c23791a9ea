//! Build output

use crate::features::dependency_graph::{DependencyGraph, GraphResult, Schedule};
use crate::features::graph_builder::BuildStats;
use crate::features::ir_generation::{dependency_context, IrRecord};

/// Everything a build run hands to the downstream generator
#[derive(Debug)]
pub struct BuildOutput {
    /// Live graph with predecessor/successor queries
    pub graph: DependencyGraph,
    /// Dependency-first processing order
    pub schedule: Schedule,
    /// One record per node, in schedule order
    pub ir: Vec<IrRecord>,
    pub stats: BuildStats,
}

impl BuildOutput {
    pub fn record(&self, qname: &str) -> Option<&IrRecord> {
        self.ir.iter().find(|r| r.qname == qname)
    }

    /// Predecessor then successor records of `qname`
    pub fn context_for(&self, qname: &str) -> GraphResult<Vec<&IrRecord>> {
        dependency_context(&self.graph, &self.ir, qname)
    }
}
