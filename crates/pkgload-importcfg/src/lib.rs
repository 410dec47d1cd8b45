//! Debug import-config override table.
//!
//! Backs the hidden `--debug-deprecated-importcfg` build flag. The flag names a
//! file whose first line is `# debug-deprecated-importcfg` followed by a JSON
//! object mapping import paths to `{"Dir": ..., "Import": {...}}` records. The
//! package loader consults the table to redirect where a package is loaded
//! from and which import path it is known by.
//!
//! The flag is a debugging aid and is not meant to be depended on.

mod entry;
mod error;
mod parse;

pub use entry::{Entry, Redirect};
pub use error::ImportcfgError;
pub use parse::MAGIC;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Where an enabled table was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportcfgSource {
    /// File path (None when built from raw bytes)
    pub path: Option<PathBuf>,
    /// SHA-256 digest of the raw file bytes
    pub digest: String,
}

/// The override table.
///
/// `Default` is the disabled state: every lookup misses. Once loaded the table
/// is never mutated; setting the flag again replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugImportcfg {
    pkgs: Option<HashMap<String, Entry>>,
    source: Option<ImportcfgSource>,
}

impl DebugImportcfg {
    /// Apply one occurrence of the flag.
    ///
    /// An empty value disables the table. Any other value is a file path to
    /// load. On error the current table is left as it was.
    pub fn set(&mut self, value: &str) -> Result<(), ImportcfgError> {
        if value.is_empty() {
            *self = Self::default();
            return Ok(());
        }
        *self = Self::load(value)?;
        Ok(())
    }

    /// Read and parse an override file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImportcfgError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| ImportcfgError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut table = Self::from_bytes(&data)?;
        if let Some(ref mut source) = table.source {
            source.path = Some(path.to_path_buf());
        }

        tracing::debug!(
            path = %path.display(),
            entries = table.len(),
            "loaded debug importcfg"
        );
        Ok(table)
    }

    /// Parse the contents of an override file, magic header included.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ImportcfgError> {
        let pkgs = parse::parse_table(data)?;
        Ok(Self {
            pkgs: Some(pkgs),
            source: Some(ImportcfgSource {
                path: None,
                digest: parse::digest(data),
            }),
        })
    }

    /// Whether a file has been loaded.
    pub fn is_enabled(&self) -> bool {
        self.pkgs.is_some()
    }

    /// Number of packages in the table (0 when disabled).
    pub fn len(&self) -> usize {
        self.pkgs.as_ref().map_or(0, HashMap::len)
    }

    /// True when disabled or loaded from an empty object.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path and digest of the loaded file (None when disabled).
    pub fn source(&self) -> Option<&ImportcfgSource> {
        self.source.as_ref()
    }

    /// Registered import paths, sorted.
    pub fn import_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .pkgs
            .iter()
            .flat_map(|pkgs| pkgs.keys().map(String::as_str))
            .collect();
        paths.sort_unstable();
        paths
    }

    /// The raw entry for an import path.
    pub fn entry(&self, import_path: &str) -> Option<&Entry> {
        self.pkgs.as_ref()?.get(import_path)
    }

    /// Find the override for `path`, imported from `parent` (by import path).
    ///
    /// With no parent, `path` itself must be in the table and keeps its name.
    /// With a parent, the parent's `Import` map renames `path`, and the new
    /// name must in turn be in the table. Any miss along the way, or a
    /// disabled table, returns `None`.
    pub fn lookup(&self, parent: Option<&str>, path: &str) -> Option<Redirect<'_>> {
        let pkgs = self.pkgs.as_ref()?;

        let Some(parent) = parent else {
            let (import_path, entry) = pkgs.get_key_value(path)?;
            return Some(Redirect {
                dir: &entry.dir,
                import_path,
            });
        };

        let new_path = pkgs
            .get(parent)?
            .import
            .get(path)
            .filter(|p| !p.is_empty())?;
        let entry = pkgs.get(new_path)?;
        Some(Redirect {
            dir: &entry.dir,
            import_path: new_path,
        })
    }

    /// Like [`lookup`](Self::lookup), but as an owned `(dir, import_path)`
    /// pair with `("", "")` meaning no override.
    pub fn lookup_pair(&self, parent: Option<&str>, path: &str) -> (String, String) {
        self.lookup(parent, path)
            .map(Redirect::into_pair)
            .unwrap_or_default()
    }
}
