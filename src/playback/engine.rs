//! The transport engine: a state machine over one loaded audio resource.
//!
//! States: `Idle -> Loaded -> Playing <-> Paused`, with `stop` collapsing
//! any state back to `Idle`. Exactly one underlying media handle is alive
//! at any moment; `load` releases the previous handle before acquiring the
//! next one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::catalog::Track;

use super::backend::{MediaBackend, MediaHandle};
use super::clock::Clock;
use super::error::TransportError;
use super::types::TransportState;

/// Result of a completed load.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded { duration: Option<Duration> },
    /// A newer load request superseded this one while it was in flight; its
    /// result was discarded and the engine was left untouched.
    Stale,
}

pub struct TransportEngine<B: MediaBackend, C: Clock> {
    backend: B,
    clock: C,
    media: Option<B::Media>,
    track: Option<Track>,
    state: TransportState,
    duration: Option<Duration>,
    // Wall-clock start of the current playing stretch plus time accumulated
    // across previous stretches; position = accumulated + (now - started_at).
    started_at: Option<Instant>,
    accumulated: Duration,
    // Latest issued load token; loads carrying an older token are stale.
    load_serial: Arc<AtomicU64>,
}

impl<B: MediaBackend, C: Clock> TransportEngine<B, C> {
    pub fn new(backend: B, clock: C, load_serial: Arc<AtomicU64>) -> Self {
        Self {
            backend,
            clock,
            media: None,
            track: None,
            state: TransportState::Idle,
            duration: None,
            started_at: None,
            accumulated: Duration::ZERO,
            load_serial,
        }
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    /// Load `track`, releasing any previously loaded resource first.
    ///
    /// `token` is the request token handed out when the load was issued; if
    /// a newer token exists by the time the media is ready, the result is
    /// discarded and `Ok(LoadOutcome::Stale)` is returned. On failure the
    /// engine is left in `Idle`.
    pub fn load(&mut self, track: Track, token: u64) -> Result<LoadOutcome, TransportError> {
        // Destructive-first: the previous resource is fully stopped and
        // released before the acquire begins.
        self.release();

        let media = self.backend.open(&track, Duration::ZERO)?;

        if token != self.load_serial.load(Ordering::SeqCst) {
            let mut media = media;
            media.stop();
            return Ok(LoadOutcome::Stale);
        }

        let duration = media.duration().or(track.duration);
        self.media = Some(media);
        self.track = Some(track);
        self.duration = duration;
        self.state = TransportState::Loaded;
        Ok(LoadOutcome::Loaded { duration })
    }

    /// `Loaded|Paused -> Playing`; no-op when already playing.
    pub fn play(&mut self) -> Result<(), TransportError> {
        match self.state {
            TransportState::Playing => Ok(()),
            TransportState::Loaded | TransportState::Paused => {
                if let Some(m) = self.media.as_mut() {
                    m.play();
                }
                self.started_at = Some(self.clock.now());
                self.state = TransportState::Playing;
                Ok(())
            }
            TransportState::Idle => Err(TransportError::InvalidState {
                op: "play",
                state: self.state,
            }),
        }
    }

    /// `Playing -> Paused`; no-op in `Loaded|Paused`.
    pub fn pause(&mut self) -> Result<(), TransportError> {
        match self.state {
            TransportState::Playing => {
                if let Some(m) = self.media.as_mut() {
                    m.pause();
                }
                if let Some(st) = self.started_at.take() {
                    self.accumulated += self.clock.now().saturating_duration_since(st);
                }
                self.state = TransportState::Paused;
                Ok(())
            }
            TransportState::Loaded | TransportState::Paused => Ok(()),
            TransportState::Idle => Err(TransportError::InvalidState {
                op: "pause",
                state: self.state,
            }),
        }
    }

    /// Reposition to `target_secs`, clamped to `[0, duration]`, preserving
    /// the play/pause state. Duration counts as zero until it is known.
    pub fn seek_to(&mut self, target_secs: i64) -> Result<Duration, TransportError> {
        if self.state == TransportState::Idle {
            return Err(TransportError::InvalidState {
                op: "seek",
                state: self.state,
            });
        }
        let Some(track) = self.track.clone() else {
            return Err(TransportError::InvalidState {
                op: "seek",
                state: self.state,
            });
        };

        let max_secs = self.duration.map(|d| d.as_secs()).unwrap_or(0) as i64;
        let clamped = Duration::from_secs(target_secs.clamp(0, max_secs) as u64);

        // Sinks cannot reposition in place; rebuild one at the target offset.
        if let Some(mut m) = self.media.take() {
            m.stop();
        }
        let mut media = match self.backend.open(&track, clamped) {
            Ok(m) => m,
            Err(e) => {
                self.release();
                return Err(e);
            }
        };

        if self.state == TransportState::Playing {
            media.play();
            self.started_at = Some(self.clock.now());
        } else {
            self.started_at = None;
        }
        self.accumulated = clamped;
        self.media = Some(media);
        Ok(clamped)
    }

    /// Any state `-> Idle`, releasing the resource. Idempotent.
    pub fn stop(&mut self) {
        self.release();
    }

    /// Best-effort instantaneous position, clamped to the known duration.
    pub fn position(&self) -> Duration {
        let live = match (self.state, self.started_at) {
            (TransportState::Playing, Some(st)) => self.clock.now().saturating_duration_since(st),
            _ => Duration::ZERO,
        };
        let pos = self.accumulated + live;
        match self.duration {
            Some(d) => pos.min(d),
            None => pos,
        }
    }

    /// True when the playing media has drained to its end.
    pub fn finished(&self) -> bool {
        self.state == TransportState::Playing
            && self.media.as_ref().map(|m| m.finished()).unwrap_or(false)
    }

    fn release(&mut self) {
        if let Some(mut m) = self.media.take() {
            m.stop();
        }
        self.track = None;
        self.duration = None;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.state = TransportState::Idle;
    }
}
