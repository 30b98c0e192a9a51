//! Utilities for creating `rodio` sinks from `Track` values.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position. Failures are returned to
//! the engine loop, which signals them instead of crashing the thread.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::library::Track;

#[derive(Debug)]
pub(super) enum SinkError {
    Open(io::Error),
    Decode(rodio::decoder::DecoderError),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Open(e) => write!(f, "cannot open file: {e}"),
            SinkError::Decode(e) => write!(f, "cannot decode file: {e}"),
        }
    }
}

/// Create a paused `Sink` for `track` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    track: &Track,
    start_at: Duration,
) -> Result<Sink, SinkError> {
    let file = File::open(&track.path).map_err(SinkError::Open)?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(SinkError::Decode)?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
