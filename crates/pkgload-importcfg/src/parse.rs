//! Override file decoding.

use crate::entry::Entry;
use crate::error::ImportcfgError;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Required first line of every override file.
pub const MAGIC: &[u8] = b"# debug-deprecated-importcfg\n";

/// Decode a complete override file (header included).
///
/// Entries whose value is `null` are dropped, and a top-level `null` yields an
/// empty table.
pub(crate) fn parse_table(data: &[u8]) -> Result<HashMap<String, Entry>, ImportcfgError> {
    let body = data.strip_prefix(MAGIC).ok_or(ImportcfgError::Syntax)?;

    let raw: Option<HashMap<String, Option<Entry>>> =
        serde_json::from_slice(body).map_err(|_| ImportcfgError::Syntax)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(path, entry)| entry.map(|e| (path, e)))
        .collect())
}

/// SHA-256 of the raw file bytes, hex encoded.
pub(crate) fn digest(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
