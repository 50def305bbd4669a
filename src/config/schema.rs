use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/adagio/config.toml` or `~/.config/adagio/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ADAGIO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub catalog: CatalogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playback: PlaybackSettings::default(),
            controls: ControlsSettings::default(),
            ui: UiSettings::default(),
            catalog: CatalogSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How often the playing position is published (milliseconds).
    pub progress_interval_ms: u64,
    /// Whether the next playlist track starts when the current one ends.
    pub autoplay_next: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: 1000,
            autoplay_next: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Whether the cursor starts in "follow playback" mode.
    pub follow_playback: bool,

    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Which time fields to show for the status line, and in what order.
    ///
    /// Example: ["elapsed", "total", "remaining"]
    pub now_playing_time_fields: Vec<TimeField>,

    /// Separator used to join `now_playing_time_fields`.
    pub now_playing_time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            follow_playback: true,
            header_text: " ~ adagio: slow music, slow breath ~ ".to_string(),
            now_playing_time_fields: vec![TimeField::Elapsed, TimeField::Total, TimeField::Remaining],
            now_playing_time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeField {
    Elapsed,
    Total,
    Remaining,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Category assigned to tracks found directly under the scanned root.
    pub default_category: String,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            default_category: "Library".to_string(),
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}
