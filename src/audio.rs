//! Playback engine: a `rodio`-backed worker thread driven by commands.
//!
//! The UI talks to the engine through `AudioPlayer::send` and observes it
//! through the shared `PlaybackHandle`.

mod cursor;
mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;

#[cfg(test)]
mod tests;
