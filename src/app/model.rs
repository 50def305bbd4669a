//! Application model types: `App` and `NowPlaying`.
//!
//! The `App` struct holds the current category view, resolved playlist,
//! selection and playback flags used by the UI and runtime. It is the
//! single consumer of [`SessionEvent`]s on the UI side.

use std::time::Duration;

use crate::catalog::{CatalogEntry, resolve_all};
use crate::playback::{SessionEvent, TransportState};
use crate::playlist::Playlist;

/// What the playback thread last told us it is playing.
#[derive(Debug, Clone)]
pub struct NowPlaying {
    pub track_id: String,
    pub position: Duration,
    pub duration: Option<Duration>,
}

/// The main application model.
pub struct App {
    pub categories: Vec<String>,
    pub category_idx: usize,
    pub playlist: Playlist,
    pub selected: usize,
    pub playback: TransportState,
    pub now_playing: Option<NowPlaying>,
    pub notice: Option<String>,
    pub follow_playback: bool,
}

impl App {
    /// Create a new `App` over the given category list. The playlist is
    /// empty until a category is mounted.
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            categories,
            category_idx: 0,
            playlist: Playlist::default(),
            selected: 0,
            playback: TransportState::Idle,
            now_playing: None,
            notice: None,
            follow_playback: true,
        }
    }

    pub fn current_category(&self) -> Option<&str> {
        self.categories.get(self.category_idx).map(String::as_str)
    }

    /// Switch to category `idx` and resolve its entries into the playlist.
    /// Entries without playable media are excluded; the user is told how
    /// many were dropped via the notice line.
    pub fn mount_category(&mut self, idx: usize, entries: &[CatalogEntry]) {
        if idx < self.categories.len() {
            self.category_idx = idx;
        }

        let resolved = resolve_all(entries);
        if resolved.excluded > 0 {
            self.notice = Some(format!(
                "{} track(s) hidden: no playable media",
                resolved.excluded
            ));
        }
        self.playlist = Playlist::new(resolved.tracks);
        self.selected = 0;
    }

    pub fn has_tracks(&self) -> bool {
        !self.playlist.is_empty()
    }

    pub fn selected_track(&self) -> Option<&crate::catalog::Track> {
        self.playlist.get(self.selected)
    }

    /// Move selection to the next track, wrapping at the end.
    pub fn next(&mut self) {
        let len = self.playlist.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection to the previous track, wrapping at the start.
    pub fn prev(&mut self) {
        let len = self.playlist.len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.playlist.len().saturating_sub(1);
    }

    /// Id of the track the playback thread currently owns, if any.
    pub fn now_playing_id(&self) -> Option<&str> {
        self.now_playing.as_ref().map(|np| np.track_id.as_str())
    }

    /// Fold one playback event into the model.
    pub fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::StateChanged(state) => {
                self.playback = state;
                if state == TransportState::Idle {
                    self.now_playing = None;
                }
            }
            SessionEvent::TrackChanged { id } => {
                if self.follow_playback {
                    if let Some(idx) = self.playlist.position_of(&id) {
                        self.selected = idx;
                    }
                }
                self.now_playing = Some(NowPlaying {
                    track_id: id,
                    position: Duration::ZERO,
                    duration: None,
                });
            }
            SessionEvent::DurationKnown(d) => {
                if let Some(np) = self.now_playing.as_mut() {
                    np.duration = Some(d);
                }
            }
            SessionEvent::PositionUpdate(pos) => {
                if let Some(np) = self.now_playing.as_mut() {
                    np.position = pos;
                }
            }
            SessionEvent::TrackEnded { .. } => {
                // StateChanged(Idle) precedes this and already cleared
                // now_playing; the runtime uses the id for auto-advance.
            }
            SessionEvent::LoadError(e) => {
                self.notice = Some(format!("playback error: {e}"));
            }
        }
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }
}
