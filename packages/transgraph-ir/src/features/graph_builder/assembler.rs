//! Graph assembly
//!
//! Runs after every file has been traversed:
//! 1. resolve deferred calls against the full qualified-name index
//! 2. strip self-loops (recursion is not an ordering dependency)

use super::domain::{BuildStats, DeferredCall, Resolution};
use super::resolver::resolve_deferred;
use crate::features::dependency_graph::DependencyGraph;
use crate::shared::models::EdgeKind;

pub fn assemble(graph: &mut DependencyGraph, deferred: &[DeferredCall], stats: &mut BuildStats) {
    for call in deferred {
        let resolution = resolve_deferred(graph, call);
        match resolution {
            Resolution::ByScope(target) | Resolution::ByName(target) => {
                graph.add_edge(call.caller, target, EdgeKind::Call);
                tracing::debug!(
                    caller = %graph.node(call.caller).qualified_name,
                    callee = %graph.node(target).qualified_name,
                    "deferred call resolved"
                );
            }
            Resolution::Unresolved => {
                tracing::trace!(
                    caller = %graph.node(call.caller).qualified_name,
                    callee = %call.callee,
                    "call target not found"
                );
            }
        }
        stats.record(resolution);
    }

    stats.self_loops_removed = graph.remove_self_loops();
}
