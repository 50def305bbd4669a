//! Directory import: build catalog entries by scanning local media files.
//!
//! This mirrors the catalog's admin upload flow: each audio file found
//! becomes an entry, with title/singer/duration probed from its tags when
//! available. The category is the first directory component under the scan
//! root, falling back to the configured default for loose files.

use std::path::Path;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use walkdir::WalkDir;

use crate::config::CatalogSettings;

use super::model::CatalogEntry;

fn is_audio_file(path: &Path, settings: &CatalogSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn category_for(root: &Path, path: &Path, settings: &CatalogSettings) -> String {
    path.strip_prefix(root)
        .ok()
        .and_then(|rel| {
            let mut components = rel.components();
            let first = components.next()?;
            // A lone filename means the file sits directly under the root.
            components.next()?;
            first.as_os_str().to_str().map(|s| s.to_string())
        })
        .unwrap_or_else(|| settings.default_category.clone())
}

/// Scan `dir` for audio files and produce catalog entries for them.
pub fn scan_media_dir(dir: &Path, settings: &CatalogSettings) -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            let default_title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string();

            let mut title = default_title;
            let mut singer: Option<String> = None;
            let mut duration_secs: Option<u64> = None;

            if let Ok(tagged) = lofty::read_from_path(path) {
                let secs = tagged.properties().duration().as_secs();
                if secs > 0 {
                    duration_secs = Some(secs);
                }

                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = tag.get_string(ItemKey::TrackTitle) {
                        if !v.trim().is_empty() {
                            title = v.to_string();
                        }
                    }
                    if let Some(v) = tag.get_string(ItemKey::TrackArtist) {
                        let v = v.trim();
                        if !v.is_empty() {
                            singer = Some(v.to_string());
                        }
                    }
                }
            }

            let uri = path.display().to_string();
            entries.push(CatalogEntry {
                id: uri.clone(),
                title,
                singer,
                media_uri: Some(uri),
                duration_secs,
                category: category_for(dir, path, settings),
            });
        }
    }

    entries.sort_by(|a, b| {
        (a.category.to_lowercase(), a.title.to_lowercase())
            .cmp(&(b.category.to_lowercase(), b.title.to_lowercase()))
    });
    entries
}
