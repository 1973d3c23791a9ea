/*
 * Transgraph IR - definition dependency graph and translation schedule
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (CodeNode, Span, errors) and tree helpers
 * - features/    : Vertical slices (parsing → graph_builder → dependency_graph → ir_generation)
 * - pipeline/    : Orchestration
 * - config/      : Build settings (YAML)
 *
 * Single-threaded and deterministic for a fixed file order.
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{BuildConfig, CollisionPolicy};
pub use errors::{Result, TransgraphError};
pub use features::annotation::{Signature, SignatureAnnotator, StubAnnotator};
pub use features::dependency_graph::{schedule, DependencyGraph, GraphError, Schedule};
pub use features::graph_builder::{BuildStats, GraphBuilder};
pub use features::ir_generation::{dependency_context, write_ir_json, IrAssembler, IrRecord};
pub use pipeline::{BuildOutput, GraphBuildPipeline};
pub use shared::models::{CodeNode, EdgeKind, NodeKind};
