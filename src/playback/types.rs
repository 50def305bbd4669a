//! Playback-related small types shared across the subsystem.

use std::fmt;
use std::time::Duration;

use crate::catalog::Track;

use super::error::TransportError;

/// The transport state machine's observable states.
///
/// `Loaded` and `Paused` are equivalent for what they allow (`play`/`seek`);
/// they are distinguished only for observability.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransportState {
    /// Nothing loaded; the only valid operations are `load` and `stop`.
    Idle,
    /// A track is loaded and positioned at the start, not yet playing.
    Loaded,
    Playing,
    Paused,
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportState::Idle => "idle",
            TransportState::Loaded => "loaded",
            TransportState::Playing => "playing",
            TransportState::Paused => "paused",
        };
        f.write_str(s)
    }
}

/// Commands accepted by the playback thread.
#[derive(Debug)]
pub enum PlayerCmd {
    /// Load and start playing `track`. The token orders this request among
    /// all loads so a superseded one can be discarded.
    Play { track: Track, token: u64 },
    /// Toggle pause/resume.
    TogglePause,
    /// Seek to an absolute position in seconds (clamped to the track).
    SeekTo(i64),
    /// Seek relative to the current position (positive or negative).
    SeekBy(i64),
    /// Stop playback and release the loaded resource.
    Stop,
    /// Shut the playback thread down.
    Quit,
}

/// Events published by the playback session to the view layer.
#[derive(Debug)]
pub enum SessionEvent {
    StateChanged(TransportState),
    /// The duration of the loaded track became known.
    DurationKnown(Duration),
    /// Periodic position publish while playing, or an explicit seek result.
    PositionUpdate(Duration),
    /// A new track became the session's active track.
    TrackChanged { id: String },
    /// The active track played to its end and the session went idle.
    TrackEnded { id: String },
    LoadError(TransportError),
}
