//! Stub-file annotator
//!
//! Reads a `.pyi` stub with the same grammar as the sources and indexes
//! every function signature by qualified name: `def f` → `f`,
//! `class C: def m` → `C.m` (nested classes extend the path).

use ahash::AHashMap;
use std::path::Path;
use tree_sitter::Node;

use super::port::{Signature, SignatureAnnotator};
use crate::features::parsing::infrastructure::tree_sitter::languages::python::{
    fields, node_kinds,
};
use crate::features::parsing::{Parser, TreeSitterParser};
use crate::shared::models::{CodegraphError, Param, Result};
use crate::shared::utils::tree_sitter::{field_text, named_children, node_text};
use crate::shared::utils::ScopeStack;

/// Signatures collected from a stub file
#[derive(Debug, Clone, Default)]
pub struct StubAnnotator {
    signatures: AHashMap<String, Signature>,
}

impl StubAnnotator {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|e| {
            CodegraphError::annotation(format!("cannot read stub: {}", e))
                .with_file(shown.clone())
                .with_source(e)
        })?;
        Self::from_source(&source, &shown)
    }

    pub fn from_source(source: &str, file_path: &str) -> Result<Self> {
        let tree = TreeSitterParser::python().parse(source, file_path)?;
        let mut annotator = Self::default();
        let mut scopes = ScopeStack::new();
        annotator.collect(&tree.root(), source, &mut scopes);
        tracing::debug!(
            file = file_path,
            signatures = annotator.signatures.len(),
            "stub signatures loaded"
        );
        Ok(annotator)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    fn collect(&mut self, node: &Node, source: &str, scopes: &mut ScopeStack) {
        for child in named_children(node) {
            let def = if child.kind() == node_kinds::DECORATED_DEF {
                match child.child_by_field_name(fields::DEFINITION) {
                    Some(inner) => inner,
                    None => continue,
                }
            } else {
                child
            };

            match def.kind() {
                node_kinds::FUNCTION_DEF => {
                    if let Some(name) = field_text(&def, fields::NAME, source) {
                        let signature = extract_signature(&def, source);
                        self.signatures.insert(scopes.qname_with(name), signature);
                    }
                }
                node_kinds::CLASS_DEF => {
                    let (Some(name), Some(body)) = (
                        field_text(&def, fields::NAME, source),
                        def.child_by_field_name(fields::BODY),
                    ) else {
                        continue;
                    };
                    scopes.push(name);
                    self.collect(&body, source, scopes);
                    scopes.pop();
                }
                _ => {}
            }
        }
    }
}

impl SignatureAnnotator for StubAnnotator {
    fn signature_for(&self, qname: &str) -> Option<Signature> {
        self.signatures.get(qname).cloned()
    }
}

fn extract_signature(func: &Node, source: &str) -> Signature {
    let params = func
        .child_by_field_name(fields::PARAMETERS)
        .map(|p| extract_params(&p, source))
        .unwrap_or_default();
    let return_type = field_text(func, fields::RETURN_TYPE, source).map(str::to_string);
    Signature {
        params,
        return_type,
    }
}

/// Positional-or-keyword parameters with their annotations. Parameters
/// before `/` and everything from `*`/`*args` on are left out.
fn extract_params(params: &Node, source: &str) -> Vec<Param> {
    let mut out = Vec::new();
    for param in named_children(params) {
        match param.kind() {
            node_kinds::IDENTIFIER => {
                out.push(Param::new(node_text(&param, source), None));
            }
            node_kinds::TYPED_PARAMETER => {
                // typed_parameter has no name field: its first named child is the name
                let Some(name) = param.named_child(0) else {
                    continue;
                };
                if name.kind() != node_kinds::IDENTIFIER {
                    // `*args: T` / `**kw: T`
                    break;
                }
                let declared = field_text(&param, fields::TYPE, source).map(str::to_string);
                out.push(Param::new(node_text(&name, source), declared));
            }
            node_kinds::DEFAULT_PARAMETER | node_kinds::TYPED_DEFAULT_PARAMETER => {
                let Some(name) = field_text(&param, fields::NAME, source) else {
                    continue;
                };
                let declared = field_text(&param, fields::TYPE, source).map(str::to_string);
                out.push(Param::new(name, declared));
            }
            node_kinds::POSITIONAL_SEPARATOR => out.clear(),
            node_kinds::KEYWORD_SEPARATOR
            | node_kinds::LIST_SPLAT_PATTERN
            | node_kinds::DICT_SPLAT_PATTERN => break,
            _ => {}
        }
    }
    out
}
