//! Application model types: `App` and `PlaybackState`.

use std::time::Duration;

use crate::audio::{LoopMode, PlaybackHandle};
use crate::library::Track;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The main application model.
///
/// `tracks` is the track table: row `i` is playlist entry `i`, an invariant
/// kept by growing both sides append-only from the same batch.
pub struct App {
    pub tracks: Vec<Track>,
    /// Table selection (the highlighted row).
    pub selected: usize,
    /// Playlist cursor: last-known current track, kept across a stop.
    pub cursor: usize,
    pub playback: PlaybackState,
    pub playback_handle: Option<PlaybackHandle>,

    pub loop_mode: LoopMode,

    /// Output volume 0-100; 0 doubles as "muted".
    pub volume: u8,
    /// Last non-zero volume, restored on unmute.
    last_volume: u8,

    /// Scrub target while the user is dragging the seek bar; position sync
    /// into the UI is suspended while this is set.
    pub seek_target: Option<Duration>,

    /// Add-prompt state (the file-picker analog).
    pub add_mode: bool,
    pub add_input: String,

    pub metadata_window: bool,
}

impl App {
    /// Create a new `App` with the provided list of `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            selected: 0,
            cursor: 0,
            playback: PlaybackState::Stopped,
            playback_handle: None,
            loop_mode: LoopMode::default(),
            volume: 50,
            last_volume: 50,
            seek_target: None,
            add_mode: false,
            add_input: String::new(),
            metadata_window: false,
        }
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// Return true if the playlist contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Cycle `loop_mode` through `NoLoop -> LoopAll -> LoopOne`.
    pub fn cycle_loop_mode(&mut self) {
        self.loop_mode = match self.loop_mode {
            LoopMode::NoLoop => LoopMode::LoopAll,
            LoopMode::LoopAll => LoopMode::LoopOne,
            LoopMode::LoopOne => LoopMode::NoLoop,
        };
    }

    /// The track under the playlist cursor, if any.
    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.cursor)
    }

    /// Move the playlist cursor, clamped into range.
    pub fn set_cursor(&mut self, idx: usize) {
        if self.tracks.is_empty() {
            self.cursor = 0;
        } else {
            self.cursor = idx.min(self.tracks.len() - 1);
        }
    }

    /// Append a batch of tracks to the table (rows and playlist entries grow
    /// together, preserving index correspondence).
    pub fn append_tracks(&mut self, batch: Vec<Track>) {
        self.tracks.extend(batch);
    }

    // ---- volume -----------------------------------------------------------

    /// Set the volume. Non-zero values update the remembered "last non-zero
    /// volume"; an explicit 0 mutes without touching it.
    pub fn set_volume(&mut self, volume: u8) -> u8 {
        let volume = volume.min(100);
        if volume != 0 {
            self.last_volume = volume;
        }
        self.volume = volume;
        self.volume
    }

    pub fn volume_up(&mut self, step: u8) -> u8 {
        self.set_volume(self.volume.saturating_add(step))
    }

    pub fn volume_down(&mut self, step: u8) -> u8 {
        self.set_volume(self.volume.saturating_sub(step))
    }

    /// Toggle mute: non-zero volume goes to 0, zero restores the remembered
    /// value. Returns the new volume to hand to the engine.
    pub fn toggle_mute(&mut self) -> u8 {
        if self.volume != 0 {
            self.volume = 0;
        } else {
            self.volume = self.last_volume;
        }
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.volume == 0
    }

    // ---- selection --------------------------------------------------------

    /// Move selection to the next row, wrapping at the end.
    pub fn select_next(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.tracks.len();
    }

    /// Move selection to the previous row, wrapping at the start.
    pub fn select_prev(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.tracks.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.tracks.len().saturating_sub(1);
    }

    // ---- seek scrubbing ---------------------------------------------------

    /// Enter seek mode: remember the scrub target, starting at `from`.
    pub fn begin_seek(&mut self, from: Duration) {
        self.seek_target = Some(from);
    }

    pub fn is_seeking(&self) -> bool {
        self.seek_target.is_some()
    }

    /// Move the scrub target forward, clamped to `max` when known.
    pub fn scrub_forward(&mut self, step: Duration, max: Option<Duration>) {
        if let Some(t) = self.seek_target.as_mut() {
            let mut next = *t + step;
            if let Some(max) = max {
                next = next.min(max);
            }
            *t = next;
        }
    }

    pub fn scrub_back(&mut self, step: Duration) {
        if let Some(t) = self.seek_target.as_mut() {
            *t = t.saturating_sub(step);
        }
    }

    /// Leave seek mode, yielding the committed target (if still in it).
    pub fn take_seek_target(&mut self) -> Option<Duration> {
        self.seek_target.take()
    }

    pub fn cancel_seek(&mut self) {
        self.seek_target = None;
    }

    // ---- add prompt -------------------------------------------------------

    pub fn enter_add_mode(&mut self) {
        self.add_mode = true;
        self.add_input.clear();
    }

    pub fn cancel_add_mode(&mut self) {
        self.add_mode = false;
        self.add_input.clear();
    }

    pub fn push_add_char(&mut self, c: char) {
        self.add_input.push(c);
    }

    pub fn pop_add_char(&mut self) {
        self.add_input.pop();
    }

    /// Leave add mode, yielding whatever the user typed.
    pub fn take_add_input(&mut self) -> String {
        self.add_mode = false;
        std::mem::take(&mut self.add_input)
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }
}
