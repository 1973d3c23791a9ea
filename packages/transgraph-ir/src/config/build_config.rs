//! Graph build configuration

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigFileV1;

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// What happens when two definitions share a qualified name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Keep the first definition, drop later ones (logged)
    #[default]
    FirstSeen,
    /// Abort the run with a duplicate-definition error
    Reject,
}

/// Settings for one graph build run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Instance receiver name used for scoped call resolution and field inference
    pub receiver_name: String,
    pub collision_policy: CollisionPolicy,
    /// Appended to method signatures in class skeletons
    pub elided_body_marker: String,
    /// Keep going on trees with ERROR/MISSING nodes
    pub allow_syntax_errors: bool,
    /// Retry unbound receiver calls by scoped name after traversal
    pub resolve_forward_self_calls: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            receiver_name: "self".to_string(),
            collision_policy: CollisionPolicy::FirstSeen,
            elided_body_marker: "  # ...".to_string(),
            allow_syntax_errors: false,
            resolve_forward_self_calls: false,
        }
    }
}

impl BuildConfig {
    pub fn receiver_name(mut self, name: impl Into<String>) -> Self {
        self.receiver_name = name.into();
        self
    }

    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    pub fn elided_body_marker(mut self, marker: impl Into<String>) -> Self {
        self.elided_body_marker = marker.into();
        self
    }

    pub fn allow_syntax_errors(mut self, allow: bool) -> Self {
        self.allow_syntax_errors = allow;
        self
    }

    pub fn resolve_forward_self_calls(mut self, enable: bool) -> Self {
        self.resolve_forward_self_calls = enable;
        self
    }

    /// Range and shape checks
    pub fn validate(&self) -> ConfigResult<()> {
        let name = self.receiver_name.as_str();
        let valid = IDENTIFIER.is_match(name);
        if !valid {
            return Err(ConfigError::Invalid {
                field: "receiver_name".to_string(),
                reason: format!("'{}' is not an identifier", name),
            });
        }
        Ok(())
    }

    /// Load from a YAML file
    pub fn from_yaml(path: impl AsRef<std::path::Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let mut config = Self::default();
        if let Some(receiver) = file.receiver_name {
            config.receiver_name = receiver;
        }
        if let Some(policy) = file.collision_policy {
            config.collision_policy = policy;
        }
        if let Some(marker) = file.elided_body_marker {
            config.elided_body_marker = marker;
        }
        if let Some(allow) = file.allow_syntax_errors {
            config.allow_syntax_errors = allow;
        }
        if let Some(enable) = file.resolve_forward_self_calls {
            config.resolve_forward_self_calls = enable;
        }

        config.validate()?;
        Ok(config)
    }

    /// Export as YAML (schema v1, every field spelled out)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            receiver_name: Some(self.receiver_name.clone()),
            collision_policy: Some(self.collision_policy),
            elided_body_marker: Some(self.elided_body_marker.clone()),
            allow_syntax_errors: Some(self.allow_syntax_errors),
            resolve_forward_self_calls: Some(self.resolve_forward_self_calls),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.receiver_name, "self");
        assert_eq!(config.collision_policy, CollisionPolicy::FirstSeen);
        assert!(!config.allow_syntax_errors);
        assert!(!config.resolve_forward_self_calls);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = BuildConfig::default()
            .receiver_name("this")
            .collision_policy(CollisionPolicy::Reject);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("collision_policy: reject"));

        let loaded = BuildConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_yaml_loading_partial() {
        let yaml_content = r#"
version: 1
resolve_forward_self_calls: true
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = BuildConfig::from_yaml(temp_file.path()).unwrap();
        assert!(config.resolve_forward_self_calls);
        assert_eq!(config.receiver_name, "self");
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = BuildConfig::from_yaml_str("receiver_name: me\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = BuildConfig::from_yaml_str("version: 2\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_field() {
        let result = BuildConfig::from_yaml_str("version: 1\nreceiver: me\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_invalid_receiver_name() {
        let result = BuildConfig::from_yaml_str("version: 1\nreceiver_name: \"self.x\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
        assert!(BuildConfig::default().receiver_name("").validate().is_err());
    }
}
