//! Scope stack for qualified-name management
//!
//! Tracks nested scopes during tree traversal.

use crate::shared::models::QNAME_SEPARATOR;

/// Scope stack for building qualified names
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    scopes: Vec<String>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Push a new scope
    pub fn push(&mut self, name: impl Into<String>) {
        self.scopes.push(name.into());
    }

    /// Pop the current scope
    pub fn pop(&mut self) -> Option<String> {
        self.scopes.pop()
    }

    /// Current qualified name
    pub fn qname(&self) -> String {
        let mut out = String::new();
        for (i, scope) in self.scopes.iter().enumerate() {
            if i > 0 {
                out.push(QNAME_SEPARATOR);
            }
            out.push_str(scope);
        }
        out
    }

    /// Qualified name with an additional trailing segment
    pub fn qname_with(&self, name: &str) -> String {
        if self.scopes.is_empty() {
            name.to_string()
        } else {
            format!("{}{}{}", self.qname(), QNAME_SEPARATOR, name)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
