use thiserror::Error;

use super::types::TransportState;

#[derive(Debug, Error)]
pub enum TransportError {
    /// No usable audio output device. Raised once at startup.
    #[error("no audio output device available: {0}")]
    Device(String),

    /// Malformed or unreachable media. Not retried automatically; the user
    /// may retry by re-selecting the track.
    #[error("failed to load media from {uri}: {reason}")]
    MediaLoad { uri: String, reason: String },

    /// Operation requested in a state that does not support it. Production
    /// call sites treat this as a no-op; tests assert on it.
    #[error("{op} is not valid while {state}")]
    InvalidState {
        op: &'static str,
        state: TransportState,
    },
}
