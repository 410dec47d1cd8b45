//! Error types for loading the override table.

use std::io;
use std::path::PathBuf;

/// Errors returned while setting the debug importcfg flag.
///
/// Lookups never fail; a missed lookup is reported as "no override".
#[derive(Debug, thiserror::Error)]
pub enum ImportcfgError {
    /// The override file could not be read.
    #[error("open {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Bad magic header or a body that is not the expected JSON shape.
    #[error("malformed syntax")]
    Syntax,
}

impl ImportcfgError {
    /// True for the fixed "malformed syntax" error.
    pub fn is_syntax(&self) -> bool {
        matches!(self, ImportcfgError::Syntax)
    }
}
