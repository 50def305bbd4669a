//! Track source resolution: turn raw catalog entries into playable tracks.

use std::time::Duration;

use log::warn;

use super::error::CatalogError;
use super::model::{make_display, CatalogEntry, Track};

/// Resolve a single catalog entry into a playable [`Track`].
///
/// Fails with [`CatalogError::MissingMedia`] when the entry has no media
/// URI; callers must not attempt playback for such entries. A duration of
/// zero is treated as unknown.
pub fn resolve(entry: &CatalogEntry) -> Result<Track, CatalogError> {
    let uri = match entry.media_uri.as_deref().map(str::trim) {
        Some(u) if !u.is_empty() => u.to_string(),
        _ => {
            return Err(CatalogError::MissingMedia {
                id: entry.id.clone(),
                title: entry.title.clone(),
            });
        }
    };

    let duration = entry
        .duration_secs
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs);

    Ok(Track {
        id: entry.id.clone(),
        uri,
        title: entry.title.clone(),
        singer: entry.singer.clone(),
        duration,
        display: make_display(&entry.title, entry.singer.as_deref()),
    })
}

/// The outcome of resolving a batch of entries: the playable tracks in
/// catalog order, plus how many entries were excluded for missing media.
pub struct ResolvedPlaylist {
    pub tracks: Vec<Track>,
    pub excluded: usize,
}

/// Resolve all entries, dropping the unplayable ones.
pub fn resolve_all(entries: &[CatalogEntry]) -> ResolvedPlaylist {
    let mut tracks = Vec::with_capacity(entries.len());
    let mut excluded = 0;

    for entry in entries {
        match resolve(entry) {
            Ok(track) => tracks.push(track),
            Err(e) => {
                warn!("excluding unplayable catalog entry: {e}");
                excluded += 1;
            }
        }
    }

    ResolvedPlaylist { tracks, excluded }
}
