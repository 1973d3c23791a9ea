//! Build configuration
//!
//! Programmatic builder plus a versioned YAML file format.
//!
//! ```rust,ignore
//! use transgraph_ir::config::{BuildConfig, CollisionPolicy};
//!
//! let config = BuildConfig::default().collision_policy(CollisionPolicy::Reject);
//! let config = BuildConfig::from_yaml("transgraph.yaml")?;
//! ```

pub mod build_config;
pub mod error;
pub mod io;

pub use build_config::{BuildConfig, CollisionPolicy};
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
