//! pkgload - import path resolution with debug overrides
//!
//! Resolves Go-style import paths to package directories. Resolution normally
//! searches GOROOT and GOPATH; the hidden `--debug-deprecated-importcfg` flag
//! can redirect individual packages and imports (see [`pkgload_importcfg`]).

pub mod config;
pub mod flags;
pub mod load;

pub use config::{ConfigError, LoaderConfig, DEFAULT_CONFIG_PATH};
pub use flags::{BuildFlags, FlagError};
pub use load::{LoadError, Loader, Origin, Package};
pub use pkgload_importcfg::{DebugImportcfg, ImportcfgError};
