//! Loader configuration (pkgload.toml)
//!
//! Supplies the GOROOT and GOPATH roots used for default resolution. Values
//! given on the command line take precedence over the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Config file read when `--config` is not given (optional).
pub const DEFAULT_CONFIG_PATH: &str = "pkgload.toml";

/// Error types for config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Roots searched when no override applies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Toolchain root; standard library packages live under `<goroot>/src`
    #[serde(default)]
    pub goroot: Option<PathBuf>,

    /// Workspace roots, searched in order as `<entry>/src/<import path>`
    #[serde(default)]
    pub gopath: Vec<PathBuf>,
}

impl LoaderConfig {
    /// Load and parse config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse config from a TOML string
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: LoaderConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else the default file if it exists, else defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref goroot) = self.goroot {
            if goroot.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "'goroot' must not be empty".to_string(),
                ));
            }
        }

        for (i, entry) in self.gopath.iter().enumerate() {
            if entry.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "'gopath' entry {} is empty",
                    i
                )));
            }
        }

        Ok(())
    }

    /// Apply command-line values on top of this config.
    ///
    /// A given goroot replaces the file's; a non-empty gopath list replaces
    /// the file's list entirely.
    pub fn with_overrides(mut self, goroot: Option<PathBuf>, gopath: Vec<PathBuf>) -> Self {
        if goroot.is_some() {
            self.goroot = goroot;
        }
        if !gopath.is_empty() {
            self.gopath = gopath;
        }
        self
    }
}
