//! Graph builder
//!
//! Owns all traversal state for one run: the node index and edges being
//! built, and the calls deferred for name-based resolution. Files are added
//! strictly in caller order; the index accumulates across files.

use super::assembler::assemble;
use super::domain::{BuildStats, DeferredCall};
use super::extractor::DefinitionExtractor;
use crate::config::BuildConfig;
use crate::features::dependency_graph::{DependencyGraph, GraphResult};
use crate::features::parsing::SourceTree;

pub struct GraphBuilder {
    config: BuildConfig,
    graph: DependencyGraph,
    deferred: Vec<DeferredCall>,
    stats: BuildStats,
}

impl GraphBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            graph: DependencyGraph::new(),
            deferred: Vec::new(),
            stats: BuildStats::default(),
        }
    }

    /// Extract definitions and call sites of one parsed file
    pub fn add_tree(&mut self, tree: &SourceTree) -> GraphResult<()> {
        let before = self.graph.node_count();
        DefinitionExtractor::new(
            &self.config,
            &mut self.graph,
            &mut self.deferred,
            &mut self.stats,
            &tree.file_path,
            &tree.source,
        )
        .run(&tree.root())?;
        self.stats.files += 1;

        tracing::info!(
            file = %tree.file_path,
            lines = tree.line_count(),
            definitions = self.graph.node_count() - before,
            "file traversed"
        );
        Ok(())
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Calls waiting for the name-based pass
    pub fn pending_calls(&self) -> &[DeferredCall] {
        &self.deferred
    }

    /// Resolve deferred calls, strip self-loops, and hand over the graph
    pub fn finish(self) -> (DependencyGraph, BuildStats) {
        let GraphBuilder {
            mut graph,
            deferred,
            mut stats,
            ..
        } = self;
        assemble(&mut graph, &deferred, &mut stats);
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "dependency graph assembled"
        );
        (graph, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::{Parser, TreeSitterParser};

    fn parse(code: &str, path: &str) -> SourceTree {
        TreeSitterParser::python().parse(code, path).unwrap()
    }

    #[test]
    fn test_cross_file_name_resolution() {
        let mut builder = GraphBuilder::new(BuildConfig::default());
        builder
            .add_tree(&parse("def main():\n    helper()\n", "a.py"))
            .unwrap();
        builder
            .add_tree(&parse("def helper():\n    pass\n", "b.py"))
            .unwrap();
        assert_eq!(builder.pending_calls().len(), 1);

        let (graph, stats) = builder.finish();
        assert!(graph.has_edge("main", "helper"));
        assert_eq!(graph.get("helper").unwrap().file_path, "b.py");
        assert_eq!(stats.files, 2);
        assert_eq!(stats.resolved_by_name, 1);
    }

    #[test]
    fn test_first_file_wins_on_collision() {
        let mut builder = GraphBuilder::new(BuildConfig::default());
        builder.add_tree(&parse("def f():\n    pass\n", "a.py")).unwrap();
        builder.add_tree(&parse("def f():\n    pass\n", "b.py")).unwrap();

        let (graph, stats) = builder.finish();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.get("f").unwrap().file_path, "a.py");
        assert_eq!(stats.collisions, 1);
    }

    #[test]
    fn test_later_file_extends_class() {
        let mut builder = GraphBuilder::new(BuildConfig::default());
        builder
            .add_tree(&parse("class C:\n    def a(self):\n        pass\n", "a.py"))
            .unwrap();
        builder
            .add_tree(&parse("class C:\n    def b(self):\n        self.a()\n", "b.py"))
            .unwrap();

        let (graph, _) = builder.finish();
        assert!(graph.has_edge("C.b", "C"));
        assert!(graph.has_edge("C.b", "C.a"));
        assert_eq!(graph.get("C").unwrap().file_path, "a.py");
    }
}
