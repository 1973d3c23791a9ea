//! Parsed source file
//!
//! Keeps the concrete syntax tree together with the text it was parsed
//! from, so byte ranges can be resolved back to source.

use tree_sitter::{Node, Tree};

/// Concrete syntax tree of one source file
#[derive(Debug, Clone)]
pub struct SourceTree {
    tree: Tree,

    /// Source code
    pub source: String,

    /// File path as given by the caller
    pub file_path: String,
}

impl SourceTree {
    pub fn new(tree: Tree, source: String, file_path: String) -> Self {
        Self {
            tree,
            source,
            file_path,
        }
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    pub fn line_count(&self) -> usize {
        self.source.lines().count()
    }
}
