//! Engine-facing small types and handles.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::library::Track;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopMode {
    /// Do not wrap at the end of the playlist.
    NoLoop,
    /// Wrap around to the start of the playlist.
    LoopAll,
    /// Repeat the current track when it ends.
    LoopOne,
}

impl Default for LoopMode {
    fn default() -> Self {
        Self::LoopAll
    }
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Start the track at `index`, seeking to `start_at` first.
    Play { index: usize, start_at: Duration },
    /// Pause playback, keeping the current track and position.
    Pause,
    /// Resume a paused track.
    Resume,
    /// Stop playback and clear the current track.
    Stop,
    /// Advance the playlist cursor (wraps under loop-all) and play.
    Next,
    /// Retreat the playlist cursor (wraps under loop-all) and play.
    Prev,
    /// Append tracks to the end of the engine's playlist.
    Append(Vec<Track>),
    /// Set the loop mode used at playlist boundaries and on track end.
    SetLoopMode(LoopMode),
    /// Set output volume, 0-100.
    SetVolume(u8),
    /// Seek the current track to an absolute position.
    SeekTo(Duration),
    /// Quit the engine thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Currently playing (or paused) track index, if any.
    pub index: Option<usize>,
    /// Playback offset into the current track.
    pub position: Duration,
    /// Total duration of the current track, when known.
    pub duration: Option<Duration>,
    /// Whether playback is currently active.
    pub playing: bool,
    /// Short note about the last engine-side failure, if any.
    pub last_error: Option<String>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
