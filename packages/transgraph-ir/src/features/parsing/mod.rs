//! Parsing Feature (Tree Parser)
//!
//! Turns raw source text into a concrete syntax tree.
//!
//! ## Structure
//! - `domain/` - SourceTree
//! - `ports/` - Parser trait
//! - `infrastructure/` - TreeSitterParser, Python node kinds

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::SourceTree;
pub use infrastructure::TreeSitterParser;
pub use ports::Parser;
