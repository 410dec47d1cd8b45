//! Table entry types.

use serde::de::{Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use std::collections::HashMap;
use std::fmt;

/// One package in the override table.
///
/// Decoding is more lenient than a derived `Deserialize`:
/// - field names match ASCII case-insensitively (`Dir`, `dir`, `DIR`)
/// - a repeated field is not an error; a later `Dir` wins and a later
///   `Import` object is merged into the earlier one
/// - absent fields and `null` import targets are `""`
/// - `"Dir": null` leaves the directory unchanged
/// - `"Import": null` clears the map
/// - unknown fields are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Source directory for the package.
    pub dir: String,

    /// Local import name -> redirected import path.
    pub import: HashMap<String, String>,
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EntryVisitor)
    }
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = Entry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with Dir and Import fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Entry, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entry = Entry::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("Dir") {
                if let Some(dir) = map.next_value::<Option<String>>()? {
                    entry.dir = dir;
                }
            } else if key.eq_ignore_ascii_case("Import") {
                match map.next_value::<Option<HashMap<String, Option<String>>>>()? {
                    Some(import) => entry.import.extend(
                        import
                            .into_iter()
                            .map(|(name, target)| (name, target.unwrap_or_default())),
                    ),
                    None => entry.import.clear(),
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(entry)
    }
}

/// A successful lookup: the directory to load from and the import path the
/// package should be known by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect<'a> {
    /// Directory to load the package from (may be empty).
    pub dir: &'a str,
    /// Import path the package is known by.
    pub import_path: &'a str,
}

impl Redirect<'_> {
    /// Owned `(dir, import_path)` pair.
    pub fn into_pair(self) -> (String, String) {
        (self.dir.to_string(), self.import_path.to_string())
    }
}
