//! Graph Builder Feature
//!
//! Definition extraction, edge resolution and graph assembly.
//!
//! ## Flow
//! ```text
//! SourceTree ─▶ DefinitionExtractor ─▶ (nodes, membership + scoped call edges, deferred calls)
//!                                              │
//!                                    assemble ─▶ DependencyGraph (no self-loops)
//! ```

pub mod assembler;
pub mod builder;
pub mod domain;
pub mod extractor;
pub mod resolver;
pub mod skeleton;

pub use builder::GraphBuilder;
pub use domain::{BuildStats, DeferredCall, Resolution};
pub use resolver::CallTarget;
