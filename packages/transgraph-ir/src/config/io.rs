//! Configuration I/O (YAML schema)
//!
//! Every field except `version` is optional; absent fields keep the
//! defaults of `BuildConfig`.

use serde::{Deserialize, Serialize};

use super::build_config::CollisionPolicy;

/// YAML Schema v1
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collision_policy: Option<CollisionPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub elided_body_marker: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_syntax_errors: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve_forward_self_calls: Option<bool>,
}
