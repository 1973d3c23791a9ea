//! Python-specific tree-sitter configuration

/// Python node kinds for quick lookup
pub mod node_kinds {
    pub const FUNCTION_DEF: &str = "function_definition";
    pub const CLASS_DEF: &str = "class_definition";
    pub const DECORATED_DEF: &str = "decorated_definition";
    pub const ASSIGNMENT: &str = "assignment";
    pub const EXPRESSION_STATEMENT: &str = "expression_statement";
    pub const CALL: &str = "call";
    pub const IDENTIFIER: &str = "identifier";
    pub const ATTRIBUTE: &str = "attribute";
    pub const DEFAULT_PARAMETER: &str = "default_parameter";
    pub const TYPED_PARAMETER: &str = "typed_parameter";
    pub const TYPED_DEFAULT_PARAMETER: &str = "typed_default_parameter";
    pub const LIST_SPLAT_PATTERN: &str = "list_splat_pattern";
    pub const DICT_SPLAT_PATTERN: &str = "dictionary_splat_pattern";
    pub const KEYWORD_SEPARATOR: &str = "keyword_separator";
    pub const POSITIONAL_SEPARATOR: &str = "positional_separator";
}

/// Named fields used by the definition extractor
pub mod fields {
    pub const NAME: &str = "name";
    pub const BODY: &str = "body";
    pub const SUPERCLASSES: &str = "superclasses";
    pub const FUNCTION: &str = "function";
    pub const OBJECT: &str = "object";
    pub const ATTRIBUTE: &str = "attribute";
    pub const PARAMETERS: &str = "parameters";
    pub const RETURN_TYPE: &str = "return_type";
    pub const TYPE: &str = "type";
    pub const DEFINITION: &str = "definition";
}

/// Check if a call target shape can be looked up by name
pub fn is_name_like(kind: &str) -> bool {
    matches!(kind, node_kinds::IDENTIFIER | node_kinds::ATTRIBUTE)
}
