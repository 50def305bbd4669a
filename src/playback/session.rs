//! The playback session: engine + progress reporter + lifecycle guard.
//!
//! A session is the single mutable "what is currently loaded" unit. All of
//! its operations run on the playback thread; outcomes are pushed to the
//! view layer as [`SessionEvent`]s. The guard invariants live here: the
//! reporter is cancelled before any load, and teardown stops everything
//! unconditionally.

use std::sync::mpsc::Sender;

use log::{debug, warn};

use crate::catalog::Track;

use super::backend::MediaBackend;
use super::clock::Clock;
use super::engine::{LoadOutcome, TransportEngine};
use super::error::TransportError;
use super::progress::ProgressReporter;
use super::types::{SessionEvent, TransportState};

pub struct PlaybackSession<B: MediaBackend, C: Clock + Clone> {
    engine: TransportEngine<B, C>,
    reporter: ProgressReporter,
    clock: C,
    events: Sender<SessionEvent>,
}

impl<B: MediaBackend, C: Clock + Clone> PlaybackSession<B, C> {
    pub fn new(
        engine: TransportEngine<B, C>,
        reporter: ProgressReporter,
        clock: C,
        events: Sender<SessionEvent>,
    ) -> Self {
        Self {
            engine,
            reporter,
            clock,
            events,
        }
    }

    pub fn state(&self) -> TransportState {
        self.engine.state()
    }

    /// True while a progress poll anchor exists for this session.
    pub fn is_polling(&self) -> bool {
        self.reporter.is_active()
    }

    /// Load `track` and start playing it. The previous resource (and its
    /// reporter anchor) is gone before the new acquire begins.
    pub fn play_track(&mut self, track: Track, token: u64) {
        self.reporter.stop();
        let id = track.id.clone();

        match self.engine.load(track, token) {
            Err(e) => {
                warn!("load failed for {id}: {e}");
                self.emit(SessionEvent::LoadError(e));
                self.emit(SessionEvent::StateChanged(TransportState::Idle));
            }
            Ok(LoadOutcome::Stale) => {
                debug!("discarding stale load result for {id}");
            }
            Ok(LoadOutcome::Loaded { duration }) => {
                self.emit(SessionEvent::TrackChanged { id });
                if let Some(d) = duration {
                    self.emit(SessionEvent::DurationKnown(d));
                }
                if self.engine.play().is_ok() {
                    self.reporter.start(self.clock.now());
                    self.emit(SessionEvent::StateChanged(TransportState::Playing));
                }
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.engine.state() {
            TransportState::Playing => {
                if self.engine.pause().is_ok() {
                    self.reporter.stop();
                    self.emit(SessionEvent::StateChanged(TransportState::Paused));
                }
            }
            TransportState::Loaded | TransportState::Paused => {
                if self.engine.play().is_ok() {
                    self.reporter.start(self.clock.now());
                    self.emit(SessionEvent::StateChanged(TransportState::Playing));
                }
            }
            TransportState::Idle => {
                debug!("pause/resume ignored: nothing loaded");
            }
        }
    }

    /// Absolute seek; the clamped position is published immediately.
    pub fn seek_to(&mut self, target_secs: i64) {
        match self.engine.seek_to(target_secs) {
            Ok(pos) => self.emit(SessionEvent::PositionUpdate(pos)),
            Err(TransportError::InvalidState { .. }) => {
                debug!("seek ignored: nothing loaded");
            }
            Err(e) => {
                warn!("seek failed: {e}");
                self.reporter.stop();
                self.emit(SessionEvent::LoadError(e));
                self.emit(SessionEvent::StateChanged(TransportState::Idle));
            }
        }
    }

    /// Relative seek from the current position.
    pub fn seek_by(&mut self, delta_secs: i64) {
        let current = self.engine.position().as_secs() as i64;
        self.seek_to(current + delta_secs);
    }

    /// Teardown: stop unconditionally, cancel the reporter. Idempotent.
    pub fn stop(&mut self) {
        self.reporter.stop();
        if self.engine.state() != TransportState::Idle {
            self.engine.stop();
            self.emit(SessionEvent::StateChanged(TransportState::Idle));
        }
    }

    /// Periodic tick from the playback thread: publish owed position
    /// updates and detect end-of-track.
    pub fn tick(&mut self) {
        if self.engine.state() != TransportState::Playing {
            return;
        }

        if self.engine.finished() {
            let ended = self.engine.current_track().map(|t| t.id.clone());
            self.reporter.stop();
            self.engine.stop();
            self.emit(SessionEvent::StateChanged(TransportState::Idle));
            if let Some(id) = ended {
                self.emit(SessionEvent::TrackEnded { id });
            }
            return;
        }

        let due = self.reporter.due_ticks(self.clock.now());
        for _ in 0..due {
            self.emit(SessionEvent::PositionUpdate(self.engine.position()));
        }
    }

    fn emit(&self, event: SessionEvent) {
        // The receiver disappearing just means the UI is gone; playback
        // teardown follows via the command channel.
        let _ = self.events.send(event);
    }
}
