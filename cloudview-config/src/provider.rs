//! Configuration provider using Figment for cloudview

use crate::{error::ConfigError, types::CloudviewConfig, ConfigResult};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Prefix for environment variable overrides, e.g. `CLOUDVIEW_VIEW_MODE`.
pub const ENV_PREFIX: &str = "CLOUDVIEW_";

/// Configuration provider using figment
///
/// No caching is performed; every [`load`](ConfigProvider::load) reads the
/// file and environment again.
#[derive(Debug, Default, Clone)]
pub struct ConfigProvider {
    file: Option<PathBuf>,
}

impl ConfigProvider {
    /// Create a provider that only reads defaults and the environment
    pub fn new() -> Self {
        Self { file: None }
    }

    /// Add a configuration file layer. A missing file contributes nothing.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Load and validate the configuration from all layers
    pub fn load(&self) -> ConfigResult<CloudviewConfig> {
        let figment = self.build_figment()?;
        let config: CloudviewConfig = figment.extract()?;
        config.validate()?;

        debug!(
            validation = ?config.validation,
            view_mode = %config.view_mode,
            render_cache = config.render_cache,
            "loaded cloudview configuration"
        );
        Ok(config)
    }

    /// Build the figment configuration with all sources in precedence order
    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(CloudviewConfig::default()));

        if let Some(path) = &self.file {
            figment = figment.merge(Self::file_layer(path)?);
        }

        Ok(figment.merge(Self::env_layer()))
    }

    /// Load a single configuration file based on its extension
    fn file_layer(path: &Path) -> ConfigResult<Figment> {
        trace!("Loading config file: {}", path.display());

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Ok(Figment::from(Toml::file(path))),
            "yaml" | "yml" => Ok(Figment::from(Yaml::file(path))),
            "json" => Ok(Figment::from(Json::file(path))),
            other => Err(ConfigError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }

    fn env_layer() -> Figment {
        Figment::from(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationMode;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        let config = ConfigProvider::new().load().unwrap();
        assert_eq!(config, CloudviewConfig::default());
    }

    #[test]
    #[serial]
    fn test_missing_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        let config = ConfigProvider::new()
            .with_file(temp.path().join("absent.toml"))
            .load()
            .unwrap();
        assert_eq!(config.view_mode, "full");
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ConfigProvider::new().with_file("/tmp/cloudview.ini").load();
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    #[serial]
    fn test_yaml_file_layer() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cloudview.yaml");
        fs::write(
            &path,
            "validation: lenient\nfieldset_weight_start: 5\nlangcode: ja\n",
        )
        .unwrap();

        let config = ConfigProvider::new().with_file(&path).load().unwrap();
        assert_eq!(config.validation, ValidationMode::Lenient);
        assert_eq!(config.fieldset_weight_start, 5);
        assert_eq!(config.langcode.as_deref(), Some("ja"));
        assert_eq!(config.view_mode, "full");
    }
}
