//! Signature annotator port
//!
//! Annotators supply declared parameter and return types for definitions.
//! Extraction never fills these fields itself.

use crate::shared::models::Param;

/// Declared signature of one function
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Param>,
    pub return_type: Option<String>,
}

/// Source of type information keyed by qualified name
pub trait SignatureAnnotator {
    fn signature_for(&self, qname: &str) -> Option<Signature>;
}

impl SignatureAnnotator for std::collections::HashMap<String, Signature> {
    fn signature_for(&self, qname: &str) -> Option<Signature> {
        self.get(qname).cloned()
    }
}
