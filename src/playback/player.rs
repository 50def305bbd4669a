use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::catalog::Track;

use super::thread::spawn_playback_thread;
use super::types::{PlayerCmd, SessionEvent};

/// Facade over the playback thread.
///
/// One `Player` owns one playback session. Dropping it is the teardown
/// path for the hosting screen: the session is stopped and the thread
/// joined, so no audio outlives the owner.
pub struct Player {
    tx: Sender<PlayerCmd>,
    events: Mutex<Option<Receiver<SessionEvent>>>,
    load_serial: Arc<AtomicU64>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    pub fn new(progress_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCmd>();
        let (event_tx, event_rx) = mpsc::channel::<SessionEvent>();
        let load_serial = Arc::new(AtomicU64::new(0));

        let join = spawn_playback_thread(rx, event_tx, load_serial.clone(), progress_interval);

        Self {
            tx,
            events: Mutex::new(Some(event_rx)),
            load_serial,
            join: Mutex::new(Some(join)),
        }
    }

    /// Take the session event receiver. Yields `Some` exactly once.
    pub fn take_events(&self) -> Option<Receiver<SessionEvent>> {
        self.events.lock().ok().and_then(|mut g| g.take())
    }

    /// Load and play `track`, superseding any load still in flight.
    pub fn play(&self, track: Track) {
        let token = self.load_serial.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.tx.send(PlayerCmd::Play { track, token });
    }

    pub fn toggle_pause(&self) {
        let _ = self.tx.send(PlayerCmd::TogglePause);
    }

    pub fn seek_to(&self, target_secs: i64) {
        let _ = self.tx.send(PlayerCmd::SeekTo(target_secs));
    }

    pub fn seek_by(&self, delta_secs: i64) {
        let _ = self.tx.send(PlayerCmd::SeekBy(delta_secs));
    }

    pub fn stop(&self) {
        let _ = self.tx.send(PlayerCmd::Stop);
    }

    /// Stop playback and join the playback thread. Idempotent.
    pub fn shutdown(&self) {
        let _ = self.tx.send(PlayerCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.shutdown();
    }
}
