use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The entry has no playable media URI. Not retried; the entry is
    /// excluded from playback and surfaced as a user-visible notice.
    #[error("catalog entry {id} ({title}) has no playable media")]
    MissingMedia { id: String, title: String },

    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
