use std::time::Duration;

use serde::Deserialize;

/// A raw catalog row as stored by the catalog backend.
///
/// Entries are not guaranteed to be playable: the media URI may be missing
/// (e.g. an upload that never finished) and the duration may be absent or
/// zero when unknown. Resolution into a [`Track`] happens in
/// [`resolve`](super::resolve).
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub singer: Option<String>,
    #[serde(default)]
    pub media_uri: Option<String>,
    #[serde(default)]
    pub duration_secs: Option<u64>,
    pub category: String,
}

/// A resolved, playable track. Immutable once produced.
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique within a playlist; catalog document id or derived from path.
    pub id: String,
    /// Playable URI. For the rodio backend this is a local path.
    pub uri: String,
    pub title: String,
    pub singer: Option<String>,
    /// Nominal duration; `None` when the catalog did not know it.
    pub duration: Option<Duration>,
    pub display: String,
}

/// Build a display string: "Singer - Title" when a singer is known.
pub(super) fn make_display(title: &str, singer: Option<&str>) -> String {
    match singer {
        Some(s) if !s.trim().is_empty() => format!("{} - {}", s.trim(), title),
        _ => title.to_string(),
    }
}

#[cfg(test)]
mod model_tests {
    use super::*;

    #[test]
    fn make_display_prefers_singer_dash_title() {
        assert_eq!(make_display("Calm Waters", Some("Mira")), "Mira - Calm Waters");
        assert_eq!(make_display("Calm Waters", Some("  Mira  ")), "Mira - Calm Waters");
        assert_eq!(make_display("Calm Waters", None), "Calm Waters");
        assert_eq!(make_display("Calm Waters", Some("")), "Calm Waters");
        assert_eq!(make_display("Calm Waters", Some("   ")), "Calm Waters");
    }
}
