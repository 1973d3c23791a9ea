//! Graph and scheduling errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A cycle survived self-loop removal; no valid schedule exists
    #[error("cyclic dependency between: {}", cycle.join(", "))]
    CyclicDependency { cycle: Vec<String> },

    /// Lookup of a qualified name that has no node
    #[error("unknown definition '{0}'")]
    UnknownNode(String),

    /// Second definition of a name under the `reject` collision policy
    #[error("duplicate definition of '{qname}': first at {first}, again at {second}")]
    DuplicateDefinition {
        qname: String,
        first: String,
        second: String,
    },
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;
