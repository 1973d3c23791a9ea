//! Utility modules shared across features
//!
//! - `scope_stack`: Scope management for qualified names
//! - `tree_sitter`: Tree-sitter traversal and text extraction

pub mod scope_stack;
pub mod tree_sitter;

pub use scope_stack::ScopeStack;
