use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::error::CatalogError;
use super::model::CatalogEntry;

/// Read access to the track catalog.
///
/// The catalog itself is an external collaborator; this trait is the only
/// surface the rest of the app sees. Queries are pull-based: a screen asks
/// for a category's entries when it mounts and rebuilds its playlist from
/// the answer.
pub trait CatalogStore {
    /// Known categories, in catalog order, deduplicated.
    fn categories(&self) -> Vec<String>;

    /// Entries whose category equals `category`, in catalog order.
    fn entries_in(&self, category: &str) -> Vec<CatalogEntry>;
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "track")]
    tracks: Vec<CatalogEntry>,
}

/// A catalog backed by a TOML file of `[[track]]` tables.
pub struct TomlCatalog {
    entries: Vec<CatalogEntry>,
}

impl TomlCatalog {
    /// Load a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file: CatalogFile = toml::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            entries: file.tracks,
        })
    }

    /// Build a catalog from already-materialized entries (e.g. a directory
    /// import).
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CatalogStore for TomlCatalog {
    fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !seen.iter().any(|c| c == &entry.category) {
                seen.push(entry.category.clone());
            }
        }
        seen
    }

    fn entries_in(&self, category: &str) -> Vec<CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect()
    }
}
