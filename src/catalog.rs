//! Catalog module: track catalog entries, resolution and stores.
//!
//! The catalog is the read-only source of playable tracks, grouped by
//! category (instrument or exercise style). Entries come either from a
//! TOML catalog file or from scanning a media directory.

mod error;
mod import;
mod model;
mod resolve;
mod store;

pub use error::CatalogError;
pub use import::scan_media_dir;
pub use model::{CatalogEntry, Track};
pub use resolve::{resolve, resolve_all, ResolvedPlaylist};
pub use store::{CatalogStore, TomlCatalog};

#[cfg(test)]
mod tests;
