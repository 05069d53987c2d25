//! Core configuration values for cloudview

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{ConfigError, ConfigResult};

/// How fieldset policies and selectable column lists are checked on load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Dangling, duplicate or colliding field references are errors.
    #[default]
    Strict,
    /// Problems are logged and the offending references are silently omitted.
    Lenient,
}

impl ValidationMode {
    pub fn is_strict(self) -> bool {
        matches!(self, ValidationMode::Strict)
    }
}

/// Resolved cloudview configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudviewConfig {
    pub validation: ValidationMode,
    /// Weight given to the first fieldset container; each following one gets +1.
    pub fieldset_weight_start: i32,
    pub view_mode: String,
    pub langcode: Option<String>,
    pub render_cache: bool,
    /// Directory holding `schemas/` and `views/` YAML overrides.
    pub registry_root: Option<PathBuf>,
}

impl Default for CloudviewConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Strict,
            fieldset_weight_start: 0,
            view_mode: "full".to_string(),
            langcode: None,
            render_cache: true,
            registry_root: None,
        }
    }
}

impl CloudviewConfig {
    /// Reject values that deserialize fine but cannot be used.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.view_mode.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "view_mode".into(),
                message: "must not be empty".into(),
            });
        }
        if let Some(langcode) = &self.langcode {
            if langcode.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "langcode".into(),
                    message: "must not be empty when set".into(),
                });
            }
        }
        Ok(())
    }
}
