//! Playback module: transport engine, playback session and player facade.
//!
//! The engine is a small state machine over a single loaded media resource;
//! the session wraps it with progress reporting and lifecycle guarantees;
//! the player runs a session on a dedicated thread behind a command channel.

mod backend;
mod clock;
mod engine;
mod error;
mod player;
mod progress;
mod session;
mod thread;
mod types;

pub use backend::{MediaBackend, MediaHandle, RodioBackend};
pub use clock::{Clock, MonotonicClock};
pub use engine::{LoadOutcome, TransportEngine};
pub use error::TransportError;
pub use player::Player;
pub use progress::ProgressReporter;
pub use session::PlaybackSession;
pub use types::{PlayerCmd, SessionEvent, TransportState};
