//! Shared models

mod error;
mod node;
mod span;

pub use error::{CodegraphError, ErrorKind, Result};
pub use node::{CodeNode, EdgeKind, NodeKind, Param, QNAME_SEPARATOR};
pub use span::Span;
