use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use log::error;

use super::backend::RodioBackend;
use super::clock::MonotonicClock;
use super::engine::TransportEngine;
use super::progress::ProgressReporter;
use super::session::PlaybackSession;
use super::types::{PlayerCmd, SessionEvent};

pub(super) fn spawn_playback_thread(
    rx: Receiver<PlayerCmd>,
    events: Sender<SessionEvent>,
    load_serial: Arc<AtomicU64>,
    progress_interval: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let backend = match RodioBackend::new() {
            Ok(b) => b,
            Err(e) => {
                error!("audio backend unavailable: {e}");
                let _ = events.send(SessionEvent::LoadError(e));
                return;
            }
        };

        let engine = TransportEngine::new(backend, MonotonicClock, load_serial);
        let mut session = PlaybackSession::new(
            engine,
            ProgressReporter::new(progress_interval),
            MonotonicClock,
            events,
        );

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    PlayerCmd::Play { track, token } => session.play_track(track, token),
                    PlayerCmd::TogglePause => session.toggle_pause(),
                    PlayerCmd::SeekTo(secs) => session.seek_to(secs),
                    PlayerCmd::SeekBy(delta) => session.seek_by(delta),
                    PlayerCmd::Stop => session.stop(),
                    PlayerCmd::Quit => {
                        session.stop();
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic progress publication and end-of-track check.
                    session.tick();
                }
                Err(RecvTimeoutError::Disconnected) => {
                    session.stop();
                    break;
                }
            }
        }
    })
}
