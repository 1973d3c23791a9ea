//! Error types shared by every pipeline stage
//!
//! Features:
//! - Categorized error kinds for the file-level stages (parse, annotate, write)
//! - Optional file path and line context
//! - Source error chaining

use std::fmt;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Parsing errors (tree parser)
    Parse,
    /// Signature annotation errors
    Annotation,
    /// IO errors
    IO,
    /// JSON / YAML encoding errors
    Serialization,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::Annotation => "annotation",
            ErrorKind::IO => "io",
            ErrorKind::Serialization => "serialization",
        }
    }
}

/// Unified error type
#[derive(Debug)]
pub struct CodegraphError {
    pub kind: ErrorKind,
    pub message: String,
    pub file_path: Option<String>,
    pub line: Option<u32>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CodegraphError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file_path: None,
            line: None,
            source: None,
        }
    }

    pub fn with_file(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn annotation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Annotation, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IO, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }
}

impl fmt::Display for CodegraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(ref file) = self.file_path {
            write!(f, " in {}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for CodegraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CodegraphError>;

impl From<std::io::Error> for CodegraphError {
    fn from(err: std::io::Error) -> Self {
        CodegraphError::io(format!("I/O error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for CodegraphError {
    fn from(err: serde_json::Error) -> Self {
        CodegraphError::serialization(format!("JSON serialization error: {}", err))
            .with_source(err)
    }
}
