//! Tree-sitter parser implementation
//!
//! This is where the tree-sitter dependency lives.

use tree_sitter::Parser as TSParser;

use crate::features::parsing::domain::SourceTree;
use crate::features::parsing::ports::Parser;
use crate::shared::models::{CodegraphError, Result};
use crate::shared::utils::tree_sitter::{first_error_node, node_to_span};

/// Tree-sitter based parser
pub struct TreeSitterParser {
    language: TreeSitterLanguage,
    allow_syntax_errors: bool,
}

/// Supported tree-sitter languages
#[derive(Debug, Clone, Copy)]
pub enum TreeSitterLanguage {
    Python,
}

impl TreeSitterParser {
    /// Create a Python parser that rejects trees containing syntax errors
    pub fn python() -> Self {
        Self {
            language: TreeSitterLanguage::Python,
            allow_syntax_errors: false,
        }
    }

    /// Accept trees with ERROR/MISSING nodes instead of failing
    pub fn allow_syntax_errors(mut self, allow: bool) -> Self {
        self.allow_syntax_errors = allow;
        self
    }

    /// Get the tree-sitter language
    fn get_ts_language(&self) -> tree_sitter::Language {
        match self.language {
            TreeSitterLanguage::Python => tree_sitter_python::language(),
        }
    }
}

impl Parser for TreeSitterParser {
    fn parse(&self, source: &str, file_path: &str) -> Result<SourceTree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.get_ts_language())
            .map_err(|e| {
                CodegraphError::parse(format!("Failed to set language: {}", e)).with_source(e)
            })?;

        let tree = parser.parse(source, None).ok_or_else(|| {
            CodegraphError::parse("Failed to parse source code").with_file(file_path)
        })?;

        if let Some(bad) = first_error_node(&tree.root_node()) {
            let span = node_to_span(&bad);
            if !self.allow_syntax_errors {
                let what = if bad.is_missing() {
                    format!("missing {}", bad.kind())
                } else {
                    "syntax error".to_string()
                };
                return Err(CodegraphError::parse(format!(
                    "{} at column {}",
                    what, span.start_col
                ))
                .with_file(file_path)
                .with_line(span.start_line));
            }
            tracing::warn!(
                file = file_path,
                line = span.start_line,
                "syntax error in source; continuing with partial tree"
            );
        }

        Ok(SourceTree::new(
            tree,
            source.to_string(),
            file_path.to_string(),
        ))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        match self.language {
            TreeSitterLanguage::Python => matches!(ext, "py" | "pyi"),
        }
    }

    fn language_name(&self) -> &'static str {
        match self.language {
            TreeSitterLanguage::Python => "python",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::ErrorKind;

    #[test]
    fn test_parse_python_function() {
        let parser = TreeSitterParser::python();
        let tree = parser.parse("def hello():\n    pass\n", "test.py").unwrap();

        assert!(!tree.has_errors());
        assert_eq!(tree.root().kind(), "module");
        assert_eq!(tree.file_path, "test.py");
    }

    #[test]
    fn test_parse_python_class() {
        let parser = TreeSitterParser::python();
        let result = parser.parse("class Foo:\n    def bar(self):\n        pass\n", "test.py");

        assert!(result.is_ok());
    }

    #[test]
    fn test_malformed_source_fails_fast() {
        let parser = TreeSitterParser::python();
        let err = parser.parse("def broken(:\n    pass\n", "bad.py").unwrap_err();

        assert_eq!(err.kind, ErrorKind::Parse);
        assert_eq!(err.file_path.as_deref(), Some("bad.py"));
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn test_malformed_source_tolerated_when_allowed() {
        let parser = TreeSitterParser::python().allow_syntax_errors(true);
        let tree = parser.parse("def broken(:\n    pass\n", "bad.py").unwrap();

        assert!(tree.has_errors());
    }

    #[test]
    fn test_supported_extensions() {
        let parser = TreeSitterParser::python();
        assert!(parser.supports_extension("py"));
        assert!(parser.supports_extension("pyi"));
        assert!(!parser.supports_extension("rs"));
        assert_eq!(parser.language_name(), "python");
    }
}
