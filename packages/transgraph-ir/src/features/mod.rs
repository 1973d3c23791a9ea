//! Feature modules
//!
//! parsing → graph_builder → dependency_graph → ir_generation,
//! with annotation feeding signatures into the graph.

pub mod annotation;
pub mod dependency_graph;
pub mod graph_builder;
pub mod ir_generation;
pub mod parsing;
