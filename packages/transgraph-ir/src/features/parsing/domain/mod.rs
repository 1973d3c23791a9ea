//! Parsing domain models

mod source_tree;

pub use source_tree::SourceTree;
