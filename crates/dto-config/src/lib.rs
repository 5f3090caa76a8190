//! # dto-config
//!
//! Layered configuration loading for dtocheck using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DTOCHECK_*` prefix, `__` as separator)
//! 2. `dtocheck.toml` in the working directory (or an explicit file)
//! 3. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DTOCHECK_TARGET__MODULE` -> `target.module`,
//! `DTOCHECK_VERIFY__FAILURE_POLICY` -> `verify.failure_policy`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use dto_config::DtoConfig;
//!
//! let config = DtoConfig::load().expect("config");
//! println!("checking module {}", config.target.module);
//! ```

mod error;
mod fabrication;
mod target;
mod verify;

pub use error::ConfigError;
pub use fabrication::FabricationConfig;
pub use target::{DEFAULT_MODULE, TargetConfig};
pub use verify::{FailurePolicy, VerifyConfig};

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Project-local config file name.
pub const CONFIG_FILE: &str = "dtocheck.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DTOCHECK_";

/// Widest accepted indent for the canonical form.
const MAX_INDENT: usize = 8;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DtoConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub fabrication: FabricationConfig,
    #[serde(default)]
    pub verify: VerifyConfig,
}

impl DtoConfig {
    /// Load configuration from `dtocheck.toml` (if present) and environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration with an explicit TOML file instead of `dtocheck.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] if `path` does not exist, and
    /// [`ConfigError`] if the file cannot be parsed, extraction fails, or a
    /// value is out of range.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        // `Toml::file` reads a missing file as empty.
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Self::extract(Self::figment_with_file(path))
    }

    /// Build the default provider chain.
    pub fn figment() -> Figment {
        let local = PathBuf::from(CONFIG_FILE);
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if local.exists() {
            figment = figment.merge(Toml::file(local));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Provider chain with `path` as the file layer.
    pub fn figment_with_file(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the harness cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.module.trim().is_empty() {
            return Err(invalid("target.module", "must not be empty"));
        }
        if self.fabrication.max_depth == 0 {
            return Err(invalid("fabrication.max_depth", "must be at least 1"));
        }
        if self.fabrication.collection_len == 0 {
            return Err(invalid(
                "fabrication.collection_len",
                "must be at least 1 so collections are populated",
            ));
        }
        if self.verify.indent > MAX_INDENT {
            return Err(invalid(
                "verify.indent",
                &format!("must be at most {MAX_INDENT}"),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DtoConfig::default();
        assert_eq!(config.target.module, DEFAULT_MODULE);
        assert_eq!(config.verify.failure_policy, FailurePolicy::CollectAll);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_collection_len_rejected() {
        let mut config = DtoConfig::default();
        config.fabrication.collection_len = 0;
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "fabrication.collection_len")
        );
    }

    #[test]
    fn zero_depth_rejected() {
        let mut config = DtoConfig::default();
        config.fabrication.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn wide_indent_rejected() {
        let mut config = DtoConfig::default();
        config.verify.indent = 12;
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_module_rejected() {
        let mut config = DtoConfig::default();
        config.target.module = " ".into();
        assert!(config.validate().is_err());
    }
}
