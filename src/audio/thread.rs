use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::library::Track;

use super::cursor::{advance, retreat};
use super::sink::create_sink_at;
use super::types::{AudioCmd, LoopMode, PlaybackHandle};

/// Everything the engine thread owns: the output stream, its copy of the
/// playlist and the transport state mirrored into `info`.
struct Engine {
    stream: OutputStream,
    tracks: Vec<Track>,
    info: PlaybackHandle,
    sink: Option<Sink>,
    /// Currently loaded track, `None` when stopped.
    index: Option<usize>,
    /// Playlist cursor; survives a stop so Play can pick up where it was.
    cursor: usize,
    paused: bool,
    started_at: Option<Instant>,
    accumulated: Duration,
    loop_mode: LoopMode,
    volume: f32,
}

impl Engine {
    fn position(&self) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn play(&mut self, i: usize, start_at: Duration) {
        if i >= self.tracks.len() {
            return;
        }
        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }

        let track = &self.tracks[i];
        let start_at = match track.duration {
            Some(d) => start_at.min(d),
            None => start_at,
        };

        match create_sink_at(&self.stream, track, start_at) {
            Ok(new_sink) => {
                new_sink.set_volume(self.volume);
                new_sink.play();
                self.sink = Some(new_sink);
                self.index = Some(i);
                self.cursor = i;
                self.paused = false;
                self.started_at = Some(Instant::now());
                self.accumulated = start_at;

                if let Ok(mut info) = self.info.lock() {
                    info.index = Some(i);
                    info.position = start_at;
                    info.duration = track.duration;
                    info.playing = true;
                    info.last_error = None;
                }
            }
            Err(e) => {
                let msg = format!("{}: {e}", track.display);
                self.stop();
                if let Ok(mut info) = self.info.lock() {
                    info.last_error = Some(msg);
                }
            }
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }
        self.sink = None;
        self.index = None;
        self.paused = false;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        if let Ok(mut info) = self.info.lock() {
            info.index = None;
            info.position = Duration::ZERO;
            info.duration = None;
            info.playing = false;
        }
    }

    fn pause(&mut self) {
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        if self.paused {
            return;
        }
        s.pause();
        self.accumulated = self.position();
        self.started_at = None;
        self.paused = true;
        if let Ok(mut info) = self.info.lock() {
            info.playing = false;
            info.position = self.accumulated;
        }
    }

    fn resume(&mut self) {
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        if !self.paused {
            return;
        }
        s.play();
        self.started_at = Some(Instant::now());
        self.paused = false;
        if let Ok(mut info) = self.info.lock() {
            info.playing = true;
        }
    }

    /// Absolute seek: rebuild the sink and skip into the file, preserving
    /// the paused/playing state.
    fn seek_to(&mut self, target: Duration) {
        let Some(i) = self.index else {
            return;
        };
        if self.sink.is_none() {
            return;
        }

        let track = &self.tracks[i];
        let target = match track.duration {
            Some(d) => target.min(d),
            None => target,
        };

        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }

        match create_sink_at(&self.stream, track, target) {
            Ok(new_sink) => {
                new_sink.set_volume(self.volume);
                if self.paused {
                    self.started_at = None;
                } else {
                    new_sink.play();
                    self.started_at = Some(Instant::now());
                }
                self.sink = Some(new_sink);
                self.accumulated = target;
                if let Ok(mut info) = self.info.lock() {
                    info.position = target;
                }
            }
            Err(e) => {
                let msg = format!("{}: {e}", track.display);
                self.stop();
                if let Ok(mut info) = self.info.lock() {
                    info.last_error = Some(msg);
                }
            }
        }
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = f32::from(volume.min(100)) / 100.0;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.volume);
        }
    }

    fn publish_position(&self) {
        if self.sink.is_none() || self.paused {
            return;
        }
        if let Ok(mut info) = self.info.lock() {
            info.position = self.position();
        }
    }

    /// Called when the current sink drained on its own.
    fn auto_advance(&mut self) {
        match self.loop_mode {
            LoopMode::LoopOne => {
                if let Some(i) = self.index {
                    self.play(i, Duration::ZERO);
                }
            }
            mode => match advance(self.cursor, self.tracks.len(), mode) {
                Some(next) => self.play(next, Duration::ZERO),
                None => self.stop(),
            },
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = sink.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    tracks: Vec<Track>,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    volume: u8,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut engine = Engine {
            stream,
            tracks,
            info: playback_info,
            sink: None,
            index: None,
            cursor: 0,
            paused: false,
            started_at: None,
            accumulated: Duration::ZERO,
            loop_mode: LoopMode::default(),
            volume: f32::from(volume.min(100)) / 100.0,
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Play { index, start_at } => {
                        engine.play(index, start_at);
                    }
                    AudioCmd::Pause => {
                        engine.pause();
                    }
                    AudioCmd::Resume => {
                        engine.resume();
                    }
                    AudioCmd::Stop => {
                        engine.stop();
                    }
                    AudioCmd::Next => {
                        let next = advance(engine.cursor, engine.tracks.len(), engine.loop_mode);
                        if let Some(next) = next {
                            engine.play(next, Duration::ZERO);
                        }
                    }
                    AudioCmd::Prev => {
                        let prev = retreat(engine.cursor, engine.tracks.len(), engine.loop_mode);
                        if let Some(prev) = prev {
                            engine.play(prev, Duration::ZERO);
                        }
                    }
                    AudioCmd::Append(batch) => {
                        engine.tracks.extend(batch);
                    }
                    AudioCmd::SetLoopMode(m) => {
                        engine.loop_mode = m;
                    }
                    AudioCmd::SetVolume(v) => {
                        engine.set_volume(v);
                    }
                    AudioCmd::SeekTo(target) => {
                        engine.seek_to(target);
                    }
                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = engine.sink {
                            // Fade out gently before stopping.
                            fade_out_sink(s, fade_out_ms);
                            s.stop();
                        }
                        // Update shared state so UI/MPRIS don't keep showing Playing.
                        if let Ok(mut info) = engine.info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    engine.publish_position();

                    // Periodic check for a drained sink (end of track).
                    let drained = engine
                        .sink
                        .as_ref()
                        .map(|s| !engine.paused && s.empty())
                        .unwrap_or(false);
                    if drained {
                        engine.auto_advance();
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
