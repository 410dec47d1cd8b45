//! Build flags shared by commands that load packages.

use crate::config::{ConfigError, LoaderConfig};
use crate::load::Loader;
use clap::Args;
use pkgload_importcfg::{DebugImportcfg, ImportcfgError};
use std::path::PathBuf;

/// Flag processing failures. Any of these aborts the command.
#[derive(Debug, thiserror::Error)]
pub enum FlagError {
    #[error("invalid value {value:?} for flag --debug-deprecated-importcfg: {source}")]
    Importcfg {
        value: String,
        #[source]
        source: ImportcfgError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Default, Args)]
pub struct BuildFlags {
    /// Path to loader config file (default: pkgload.toml, if present)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// GOROOT to search for standard library packages
    #[arg(long, value_name = "DIR")]
    pub goroot: Option<PathBuf>,

    /// GOPATH entry to search; may be repeated
    #[arg(long, value_name = "DIR")]
    pub gopath: Vec<PathBuf>,

    // Undocumented debugging aid, not for general use. Each occurrence is
    // applied in order; an empty value disables it.
    #[arg(long = "debug-deprecated-importcfg", hide = true, value_name = "FILE")]
    pub debug_deprecated_importcfg: Vec<String>,
}

impl BuildFlags {
    /// Build the override table from every `--debug-deprecated-importcfg`
    /// occurrence. The last one wins.
    pub fn importcfg(&self) -> Result<DebugImportcfg, FlagError> {
        let mut importcfg = DebugImportcfg::default();
        for value in &self.debug_deprecated_importcfg {
            importcfg
                .set(value)
                .map_err(|source| FlagError::Importcfg {
                    value: value.clone(),
                    source,
                })?;
        }
        Ok(importcfg)
    }

    /// Loader config: the config file, then command-line roots on top.
    pub fn loader_config(&self) -> Result<LoaderConfig, FlagError> {
        let config = LoaderConfig::discover(self.config.as_deref())?;
        Ok(config.with_overrides(self.goroot.clone(), self.gopath.clone()))
    }

    /// Process all flags into a ready loader.
    pub fn loader(&self) -> Result<Loader, FlagError> {
        let importcfg = self.importcfg()?;
        let config = self.loader_config()?;
        Ok(Loader::new(config, importcfg))
    }
}
