//! Graph builder domain models

use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::fmt;

/// Call recorded during traversal for name-based resolution afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredCall {
    pub caller: NodeIndex,
    /// Callee text exactly as written (`helper`, `mod.helper`, `self.m`)
    pub callee: String,
    /// Scoped name to try first (`Class.m` for an unbound receiver call)
    pub scoped: Option<String>,
}

/// How a call expression ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Receiver call matched `<enclosing class>.<method>` during traversal
    ByScope(NodeIndex),
    /// Raw callee text matched a qualified name in the deferred pass
    ByName(NodeIndex),
    /// No node found; no edge
    Unresolved,
}

/// Counters for one build run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub files: usize,
    pub functions: usize,
    pub classes: usize,
    /// Definitions dropped because their qualified name was taken
    pub collisions: usize,
    pub membership_edges: usize,
    pub resolved_by_scope: usize,
    pub resolved_by_name: usize,
    pub unresolved_calls: usize,
    pub self_loops_removed: usize,
}

impl BuildStats {
    pub fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::ByScope(_) => self.resolved_by_scope += 1,
            Resolution::ByName(_) => self.resolved_by_name += 1,
            Resolution::Unresolved => self.unresolved_calls += 1,
        }
    }

    pub fn nodes(&self) -> usize {
        self.functions + self.classes
    }
}

impl fmt::Display for BuildStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files, {} functions, {} classes, {} collisions, calls: {} by scope / {} by name / {} unresolved, {} membership edges, {} self-loops removed",
            self.files,
            self.functions,
            self.classes,
            self.collisions,
            self.resolved_by_scope,
            self.resolved_by_name,
            self.unresolved_calls,
            self.membership_edges,
            self.self_loops_removed
        )
    }
}
