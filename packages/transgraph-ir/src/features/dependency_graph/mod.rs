//! Dependency Graph Feature
//!
//! Graph model over extracted definitions, neighbor queries for the
//! downstream generator, DOT rendering, and the translation scheduler.

pub mod error;
pub mod graph;
pub mod scheduler;

pub use error::{GraphError, GraphResult};
pub use graph::{DependencyGraph, NodeInsert};
pub use scheduler::{schedule, Schedule, ScheduledNode};
