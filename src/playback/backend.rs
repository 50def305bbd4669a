//! Media backend trait and the default `rodio` implementation.
//!
//! The backend opens a track into a paused handle positioned at a given
//! offset. Seeking rebuilds the handle at the target offset, so even
//! `Duration::ZERO` goes through `skip_duration`.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::catalog::Track;

use super::error::TransportError;

/// A loaded, exclusively-owned audio resource.
pub trait MediaHandle {
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Duration as parsed from the media itself, when the format exposes it.
    fn duration(&self) -> Option<Duration>;
    /// True once the media has drained to its end.
    fn finished(&self) -> bool;
}

/// Opens tracks into media handles. The trait is the seam between the
/// transport engine and the audio stack; tests substitute a fake.
pub trait MediaBackend {
    type Media: MediaHandle;

    /// Open `track` positioned at `start_at`, paused.
    fn open(&self, track: &Track, start_at: Duration) -> Result<Self::Media, TransportError>;
}

pub struct RodioMedia {
    sink: Sink,
    duration: Option<Duration>,
}

impl MediaHandle for RodioMedia {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn stop(&mut self) {
        self.sink.stop();
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn finished(&self) -> bool {
        self.sink.empty()
    }
}

/// Default backend: decode local files with `rodio` onto the default output
/// stream. Track URIs are treated as local paths; a streaming backend would
/// implement [`MediaBackend`] instead.
pub struct RodioBackend {
    stream: OutputStream,
}

impl RodioBackend {
    pub fn new() -> Result<Self, TransportError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| TransportError::Device(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl MediaBackend for RodioBackend {
    type Media = RodioMedia;

    fn open(&self, track: &Track, start_at: Duration) -> Result<RodioMedia, TransportError> {
        let file = File::open(&track.uri).map_err(|e| TransportError::MediaLoad {
            uri: track.uri.clone(),
            reason: e.to_string(),
        })?;

        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| TransportError::MediaLoad {
                uri: track.uri.clone(),
                reason: e.to_string(),
            })?;
        let duration = decoder.total_duration();

        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        let source = decoder.skip_duration(start_at);

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();

        Ok(RodioMedia { sink, duration })
    }
}
