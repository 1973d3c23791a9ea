//! Definition-site node model
//!
//! A `CodeNode` is created once per extracted definition and never removed.
//! Its `qualified_name` is the unique key across a whole run.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::span::Span;

/// Scope separator used in qualified names (`Outer.Inner.method`)
pub const QNAME_SEPARATOR: char = '.';

/// Definition kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Function,
    Class,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Function => "function",
            NodeKind::Class => "class",
        }
    }
}

/// Dependency edge kind
///
/// Inheritance is metadata on the class node (`base_names`), never an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// caller → callee
    Call,
    /// method → owning class
    Membership,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Call => "call",
            EdgeKind::Membership => "member",
        }
    }
}

/// Parameter with an optional declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, declared_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            declared_type,
        }
    }
}

/// Extracted definition (function, method or class)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeNode {
    /// Dot-joined scope path, unique per run
    pub qualified_name: String,
    pub kind: NodeKind,
    /// Full span for functions, condensed skeleton for classes
    pub source_text: String,
    pub file_path: String,
    pub span: Span,

    /// Filled by a `SignatureAnnotator`, never by extraction
    pub params: Vec<Param>,
    pub return_type: Option<String>,

    /// Class nodes only; filled by field inference
    pub fields: Vec<String>,
    /// Class nodes only; as written at the definition site
    pub base_names: Vec<String>,

    pub body_lines: Vec<String>,
    pub line_count: usize,

    /// Written by the code generation stage; not read by graph building
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub translation: Option<String>,
}

impl CodeNode {
    pub fn new(
        qualified_name: impl Into<String>,
        kind: NodeKind,
        source_text: impl Into<String>,
        file_path: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
            source_text: source_text.into(),
            file_path: file_path.into(),
            span,
            params: Vec::new(),
            return_type: None,
            fields: Vec::new(),
            base_names: Vec::new(),
            body_lines: Vec::new(),
            line_count: 0,
            translation: None,
        }
    }

    pub fn with_base_names(mut self, base_names: Vec<String>) -> Self {
        self.base_names = base_names;
        self
    }

    /// Line of the definition (1-indexed)
    pub fn lineno(&self) -> u32 {
        self.span.start_line
    }

    /// Everything before the last separator, if any
    pub fn parent_qname(&self) -> Option<&str> {
        self.qualified_name
            .rsplit_once(QNAME_SEPARATOR)
            .map(|(parent, _)| parent)
    }

    pub fn is_class(&self) -> bool {
        self.kind == NodeKind::Class
    }

    /// Add a field name unless already present (first-seen order)
    pub fn add_field(&mut self, field: &str) -> bool {
        if self.fields.iter().any(|f| f == field) {
            return false;
        }
        self.fields.push(field.to_string());
        true
    }
}

impl fmt::Display for CodeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
