//! Import path resolution
//!
//! The [`Loader`] turns an import path, seen from an optional parent package,
//! into a package directory. The debug importcfg table is consulted first;
//! anything it does not cover falls through to GOROOT/GOPATH resolution.

use crate::config::LoaderConfig;
use pkgload_importcfg::DebugImportcfg;
use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// How a package's directory was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Redirected by the debug importcfg table
    Importcfg,
    Goroot,
    Gopath,
    /// `./x` or `../x` relative to the parent's directory
    Relative,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Importcfg => write!(f, "importcfg"),
            Self::Goroot => write!(f, "goroot"),
            Self::Gopath => write!(f, "gopath"),
            Self::Relative => write!(f, "relative"),
        }
    }
}

/// A resolved package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Canonical import path (the redirected one, for overrides)
    pub import_path: String,
    pub dir: PathBuf,
    pub origin: Origin,
}

/// Resolution failures. Importcfg misses are not errors; they fall through
/// to default resolution.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("empty import path")]
    EmptyImportPath,

    #[error("local import {0:?} has no parent package")]
    RelativeWithoutParent(String),

    #[error("cannot find package {0:?}: GOROOT is not set")]
    NoGoroot(String),

    #[error("cannot find package {path:?} in any of:\n{}", format_searched(.searched))]
    NotFound { path: String, searched: Vec<PathBuf> },
}

fn format_searched(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| format!("\t{}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolves import paths against an owned config and override table.
///
/// The table is fixed for the loader's lifetime; build a new loader to change
/// it.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
    importcfg: DebugImportcfg,
}

impl Loader {
    pub fn new(config: LoaderConfig, importcfg: DebugImportcfg) -> Self {
        Self { config, importcfg }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn importcfg(&self) -> &DebugImportcfg {
        &self.importcfg
    }

    /// Resolve `path` as imported by `parent` (or as a root package).
    pub fn resolve(&self, parent: Option<&Package>, path: &str) -> Result<Package, LoadError> {
        if path.is_empty() {
            return Err(LoadError::EmptyImportPath);
        }

        let parent_path = parent.map(|p| p.import_path.as_str());
        match self.importcfg.lookup(parent_path, path) {
            Some(redirect) if !redirect.dir.is_empty() => {
                tracing::debug!(
                    parent = parent_path.unwrap_or("-"),
                    path,
                    import_path = redirect.import_path,
                    dir = redirect.dir,
                    "importcfg override"
                );
                return Ok(Package {
                    import_path: redirect.import_path.to_string(),
                    dir: PathBuf::from(redirect.dir),
                    origin: Origin::Importcfg,
                });
            }
            Some(redirect) => {
                tracing::debug!(
                    import_path = redirect.import_path,
                    "importcfg entry has no Dir, using default resolution"
                );
            }
            None => {
                tracing::trace!(parent = parent_path.unwrap_or("-"), path, "no importcfg override");
            }
        }

        self.resolve_default(parent, path)
    }

    fn resolve_default(&self, parent: Option<&Package>, path: &str) -> Result<Package, LoadError> {
        if is_local_import(path) {
            let parent = parent.ok_or_else(|| LoadError::RelativeWithoutParent(path.to_string()))?;
            return Ok(Package {
                import_path: join_import_path(&parent.import_path, path),
                dir: clean_join(&parent.dir, path),
                origin: Origin::Relative,
            });
        }

        if is_standard_import(path) {
            let goroot = self
                .config
                .goroot
                .as_ref()
                .ok_or_else(|| LoadError::NoGoroot(path.to_string()))?;
            let dir = goroot.join("src").join(path);
            if !dir.is_dir() {
                return Err(LoadError::NotFound {
                    path: path.to_string(),
                    searched: vec![dir],
                });
            }
            return Ok(Package {
                import_path: path.to_string(),
                dir,
                origin: Origin::Goroot,
            });
        }

        let mut searched = Vec::with_capacity(self.config.gopath.len());
        for root in &self.config.gopath {
            let dir = root.join("src").join(path);
            if dir.is_dir() {
                return Ok(Package {
                    import_path: path.to_string(),
                    dir,
                    origin: Origin::Gopath,
                });
            }
            searched.push(dir);
        }

        Err(LoadError::NotFound {
            path: path.to_string(),
            searched,
        })
    }
}

fn is_local_import(path: &str) -> bool {
    path == "." || path == ".." || path.starts_with("./") || path.starts_with("../")
}

/// Standard library paths have no dot in their first element.
fn is_standard_import(path: &str) -> bool {
    let first = path.split('/').next().unwrap_or(path);
    !first.contains('.')
}

/// Lexically join a relative import onto an import path.
fn join_import_path(base: &str, rel: &str) -> String {
    let mut parts: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for elem in rel.split('/') {
        match elem {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(elem),
        }
    }
    parts.join("/")
}

/// Lexically join `rel` onto `base`, dropping `.` and resolving `..`.
fn clean_join(base: &Path, rel: &str) -> PathBuf {
    let mut out = base.to_path_buf();
    for component in Path::new(rel).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
