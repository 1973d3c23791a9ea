//! Error types for transgraph-ir
//!
//! Each feature keeps its own error type; `TransgraphError` is what the
//! pipeline and the CLI surface.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::dependency_graph::GraphError;
use crate::shared::models::CodegraphError;

/// Top-level error for a build run
#[derive(Debug, Error)]
pub enum TransgraphError {
    /// Parse, annotation, or serialization failure
    #[error(transparent)]
    Codegraph(#[from] CodegraphError),

    /// Graph construction or scheduling failure
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Receiver pattern could not be compiled
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, TransgraphError>;
