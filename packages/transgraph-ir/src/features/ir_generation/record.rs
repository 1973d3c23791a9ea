//! IR record: the per-definition summary handed to the code generator

use serde::{Deserialize, Serialize};

use crate::shared::models::{CodeNode, NodeKind, Param};

/// One structured record per definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrRecord {
    pub qname: String,
    pub kind: NodeKind,
    pub filename: String,
    pub lineno: u32,
    pub body_lines: Vec<String>,
    pub line_count: usize,
    #[serde(flatten)]
    pub detail: IrDetail,
}

/// Kind-specific part of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IrDetail {
    Class {
        fields: Vec<String>,
        base_names: Vec<String>,
    },
    Function {
        enclosing_class: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        params: Vec<Param>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        return_type: Option<String>,
    },
}

impl IrRecord {
    pub fn from_node(node: &CodeNode) -> Self {
        let detail = match node.kind {
            NodeKind::Class => IrDetail::Class {
                fields: node.fields.clone(),
                base_names: node.base_names.clone(),
            },
            NodeKind::Function => IrDetail::Function {
                enclosing_class: node.parent_qname().map(str::to_string),
                params: node.params.clone(),
                return_type: node.return_type.clone(),
            },
        };
        Self {
            qname: node.qualified_name.clone(),
            kind: node.kind,
            filename: node.file_path.clone(),
            lineno: node.lineno(),
            body_lines: node.body_lines.clone(),
            line_count: node.line_count,
            detail,
        }
    }

    pub fn fields(&self) -> Option<&[String]> {
        match &self.detail {
            IrDetail::Class { fields, .. } => Some(fields),
            IrDetail::Function { .. } => None,
        }
    }

    pub fn enclosing_class(&self) -> Option<&str> {
        match &self.detail {
            IrDetail::Function {
                enclosing_class, ..
            } => enclosing_class.as_deref(),
            IrDetail::Class { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Span;

    #[test]
    fn test_function_record_json_shape() {
        let mut node = CodeNode::new(
            "C.m",
            NodeKind::Function,
            "def m(self):\n    pass",
            "a.py",
            Span::new(2, 4, 3, 12),
        );
        node.body_lines = vec!["def m(self):".into(), "    pass".into()];
        node.line_count = 2;

        let json = serde_json::to_value(IrRecord::from_node(&node)).unwrap();
        assert_eq!(json["qname"], "C.m");
        assert_eq!(json["kind"], "function");
        assert_eq!(json["filename"], "a.py");
        assert_eq!(json["lineno"], 2);
        assert_eq!(json["line_count"], 2);
        assert_eq!(json["enclosing_class"], "C");
        assert!(json.get("fields").is_none());
        assert!(json.get("params").is_none());
    }

    #[test]
    fn test_top_level_function_has_null_class() {
        let node = CodeNode::new("f", NodeKind::Function, "", "a.py", Span::new(1, 0, 1, 0));
        let json = serde_json::to_value(IrRecord::from_node(&node)).unwrap();
        assert!(json["enclosing_class"].is_null());
        assert!(json.as_object().unwrap().contains_key("enclosing_class"));
    }

    #[test]
    fn test_class_record_parses_back() {
        let mut node = CodeNode::new("C", NodeKind::Class, "class C(B):", "a.py", Span::new(1, 0, 1, 0));
        node.fields = vec!["x".into()];
        node.base_names = vec!["B".into()];

        let record = IrRecord::from_node(&node);
        let text = serde_json::to_string(&record).unwrap();
        let back: IrRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.fields(), Some(&["x".to_string()][..]));
    }
}
