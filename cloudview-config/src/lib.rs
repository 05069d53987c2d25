//! Cloudview configuration management using Figment
//!
//! Settings that shape how resource views are validated and rendered are
//! loaded from three layers, later layers overriding earlier ones:
//!
//! 1. Built-in defaults ([`CloudviewConfig::default`])
//! 2. An optional configuration file (`.toml`, `.yaml`/`.yml` or `.json`)
//! 3. Environment variables prefixed with `CLOUDVIEW_`
//!
//! ```no_run
//! use cloudview_config::ConfigProvider;
//!
//! let config = ConfigProvider::new()
//!     .with_file("/etc/cloudview/cloudview.toml")
//!     .load()?;
//! println!("view mode: {}", config.view_mode);
//! # Ok::<(), cloudview_config::ConfigError>(())
//! ```
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! validation = "lenient"
//! fieldset_weight_start = 10
//! view_mode = "full"
//! langcode = "en"
//! render_cache = true
//! registry_root = "/var/lib/cloudview/registry"
//! ```

/// Error types and handling
pub mod error;
/// Figment provider assembling the configuration layers
pub mod provider;
/// Typed configuration values
pub mod types;

pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, ENV_PREFIX};
pub use types::{CloudviewConfig, ValidationMode};
