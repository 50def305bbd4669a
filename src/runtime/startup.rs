use std::path::Path;

use crate::app::App;
use crate::catalog::{CatalogError, CatalogStore, TomlCatalog, scan_media_dir};
use crate::config;

/// Build a catalog from the command-line source argument.
///
/// A path to a `.toml` file is loaded as a catalog file; a directory is
/// imported by scanning it for audio files.
pub fn open_catalog(source: &str, settings: &config::Settings) -> Result<TomlCatalog, CatalogError> {
    let path = Path::new(source);
    if path.is_dir() {
        let entries = scan_media_dir(path, &settings.catalog);
        Ok(TomlCatalog::from_entries(entries))
    } else {
        TomlCatalog::load(path)
    }
}

/// Seed the app from settings and mount the first category.
pub fn apply_startup_defaults(app: &mut App, catalog: &dyn CatalogStore, settings: &config::Settings) {
    app.follow_playback = settings.ui.follow_playback;

    if let Some(category) = app.current_category().map(str::to_string) {
        let entries = catalog.entries_in(&category);
        app.mount_category(0, &entries);
    }
}
