use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState};
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;
use crate::library;
use crate::mpris::ControlCmd;
use crate::mpris::MprisHandle;
use crate::position::PositionStore;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known playing index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            pending_gg: false,
            last_mpris_index: None,
            last_mpris_playback: app.playback,
        }
    }
}

/// One coherent read of the engine's shared state.
fn engine_snapshot(app: &App) -> (Option<usize>, Duration, Option<Duration>) {
    if let Some(handle) = app.playback_handle.as_ref() {
        if let Ok(info) = handle.lock() {
            return (info.index, info.position, info.duration);
        }
    }
    (None, Duration::ZERO, None)
}

/// Upsert the saved offset for the track the engine currently holds.
fn record_current_position(app: &App, store: &mut PositionStore) {
    let (index, position, _) = engine_snapshot(app);
    if let Some(i) = index {
        if let Some(track) = app.tracks.get(i) {
            store.record(&track.url(), position);
        }
    }
}

/// Play: a no-op while already playing, resume when paused, otherwise start
/// the playlist cursor's track from its saved offset (if one exists).
fn press_play(app: &mut App, audio_tx: &mpsc::Sender<AudioCmd>, store: &PositionStore) {
    match app.playback {
        PlaybackState::Playing => {}
        PlaybackState::Paused => {
            let _ = audio_tx.send(AudioCmd::Resume);
            app.playback = PlaybackState::Playing;
        }
        PlaybackState::Stopped => {
            if !app.has_tracks() {
                return;
            }
            let index = app.cursor;
            let start_at = app
                .tracks
                .get(index)
                .and_then(|t| store.offset_for(&t.url()))
                .unwrap_or(Duration::ZERO);
            let _ = audio_tx.send(AudioCmd::Play { index, start_at });
            app.playback = PlaybackState::Playing;
        }
    }
}

/// Pause saves the offset first, so a later Play on this track resumes here.
fn press_pause(app: &mut App, audio_tx: &mpsc::Sender<AudioCmd>, store: &mut PositionStore) {
    match app.playback {
        PlaybackState::Playing => {
            record_current_position(app, store);
            let _ = audio_tx.send(AudioCmd::Pause);
            app.playback = PlaybackState::Paused;
        }
        PlaybackState::Paused => {
            let _ = audio_tx.send(AudioCmd::Resume);
            app.playback = PlaybackState::Playing;
        }
        PlaybackState::Stopped => {}
    }
}

/// Stop discards the saved offset: the track starts over next time.
fn press_stop(app: &mut App, audio_tx: &mpsc::Sender<AudioCmd>, store: &mut PositionStore) {
    let (index, _, _) = engine_snapshot(app);
    if let Some(i) = index {
        if let Some(track) = app.tracks.get(i) {
            store.forget(&track.url());
        }
    }
    let _ = audio_tx.send(AudioCmd::Stop);
    app.playback = PlaybackState::Stopped;
    app.cancel_seek();
}

/// Next saves the outgoing track's offset before advancing.
fn press_next(app: &mut App, audio_tx: &mpsc::Sender<AudioCmd>, store: &mut PositionStore) {
    if !app.has_tracks() {
        return;
    }
    record_current_position(app, store);
    let _ = audio_tx.send(AudioCmd::Next);
    app.playback = PlaybackState::Playing;
}

/// Previous does not save: stepping back intentionally abandons the offset.
fn press_prev(app: &mut App, audio_tx: &mpsc::Sender<AudioCmd>) {
    if !app.has_tracks() {
        return;
    }
    let _ = audio_tx.send(AudioCmd::Prev);
    app.playback = PlaybackState::Playing;
}

/// Main terminal event loop: handles input, UI drawing, sync with the audio
/// thread and MPRIS. Returns `Ok(())` when shutdown is requested.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    store: &mut PositionStore,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let audio_tx = audio_player.sender();

    loop {
        // Sync transport state from the engine. The engine is authoritative:
        // it moves on its own via auto-advance and end-of-playlist.
        let mut playback_index_snapshot: Option<usize> = None;
        if let Some(handle) = app.playback_handle.as_ref().cloned() {
            if let Ok(info) = handle.lock() {
                playback_index_snapshot = info.index;
                app.playback = match (info.index, info.playing) {
                    (Some(_), true) => PlaybackState::Playing,
                    (Some(_), false) => PlaybackState::Paused,
                    (None, _) => PlaybackState::Stopped,
                };
            }
        }
        if let Some(idx) = playback_index_snapshot {
            app.set_cursor(idx);
        }

        // Keep MPRIS in sync even when changes come from media keys or auto-advance.
        if playback_index_snapshot != state.last_mpris_index
            || app.playback != state.last_mpris_playback
        {
            update_mpris(mpris, app);
            state.last_mpris_index = playback_index_snapshot;
            state.last_mpris_playback = app.playback;
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, app, audio_player, &audio_tx, mpris, store)? {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(
                    key,
                    settings,
                    app,
                    audio_player,
                    &audio_tx,
                    control_tx,
                    store,
                    state,
                )? {
                    break;
                }
            }
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    audio_tx: &mpsc::Sender<AudioCmd>,
    mpris: &MprisHandle,
    store: &mut PositionStore,
) -> Result<bool, Box<dyn std::error::Error>> {
    match cmd {
        ControlCmd::Quit => {
            record_current_position(app, store);
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        ControlCmd::Play => {
            press_play(app, audio_tx, store);
        }
        ControlCmd::Pause => {
            if app.playback == PlaybackState::Playing {
                press_pause(app, audio_tx, store);
            }
        }
        ControlCmd::PlayPause => match app.playback {
            PlaybackState::Stopped => press_play(app, audio_tx, store),
            PlaybackState::Playing | PlaybackState::Paused => press_pause(app, audio_tx, store),
        },
        ControlCmd::Stop => {
            press_stop(app, audio_tx, store);
        }
        ControlCmd::Next => {
            press_next(app, audio_tx, store);
        }
        ControlCmd::Prev => {
            press_prev(app, audio_tx);
        }
    }
    update_mpris(mpris, app);

    Ok(false)
}

#[allow(clippy::too_many_arguments)]
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    audio_tx: &mpsc::Sender<AudioCmd>,
    control_tx: &mpsc::Sender<ControlCmd>,
    store: &mut PositionStore,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    // The add prompt swallows all input until committed or cancelled.
    if app.add_mode {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => {
                app.cancel_add_mode();
            }
            KeyCode::Backspace => {
                app.pop_add_char();
            }
            KeyCode::Enter => {
                let input = app.take_add_input();
                let input = input.trim();
                if !input.is_empty() {
                    let batch = library::expand(Path::new(input), &settings.library);
                    if !batch.is_empty() {
                        app.append_tracks(batch.clone());
                        let _ = audio_tx.send(AudioCmd::Append(batch));
                    }
                }
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_add_char(c);
                }
            }
            _ => {}
        }
        return Ok(false);
    }

    // Seek mode: h/l move the scrub target, Enter commits, Esc abandons.
    if app.is_seeking() {
        state.pending_gg = false;
        let (_, _, duration) = engine_snapshot(app);
        let step = Duration::from_secs(settings.controls.seek_step_seconds);
        match key.code {
            KeyCode::Esc => {
                app.cancel_seek();
            }
            KeyCode::Char('h') | KeyCode::Left => {
                app.scrub_back(step);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                app.scrub_forward(step, duration);
            }
            KeyCode::Enter => {
                if let Some(target) = app.take_seek_target() {
                    let _ = audio_tx.send(AudioCmd::SeekTo(target));
                }
            }
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            record_current_position(app, store);
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        KeyCode::Char('a') => {
            state.pending_gg = false;
            app.enter_add_mode();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.select_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.select_prev();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.select_last();
        }
        KeyCode::Enter => {
            // Playing a row by hand starts it from the top; only the Play
            // action resumes from a saved offset.
            state.pending_gg = false;
            if app.has_tracks() {
                let _ = audio_tx.send(AudioCmd::Play {
                    index: app.selected,
                    start_at: Duration::ZERO,
                });
                app.playback = PlaybackState::Playing;
            }
        }
        KeyCode::Char('p') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Play);
        }
        KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('x') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Stop);
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('s') => {
            state.pending_gg = false;
            let (index, position, _) = engine_snapshot(app);
            if index.is_some() {
                app.begin_seek(position);
            }
        }
        KeyCode::Char('r') => {
            state.pending_gg = false;
            app.cycle_loop_mode();
            let _ = audio_tx.send(AudioCmd::SetLoopMode(app.loop_mode));
        }
        KeyCode::Char('m') => {
            state.pending_gg = false;
            let volume = app.toggle_mute();
            let _ = audio_tx.send(AudioCmd::SetVolume(volume));
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.pending_gg = false;
            let volume = app.volume_up(settings.controls.volume_step);
            let _ = audio_tx.send(AudioCmd::SetVolume(volume));
        }
        KeyCode::Char('-') => {
            state.pending_gg = false;
            let volume = app.volume_down(settings.controls.volume_step);
            let _ = audio_tx.send(AudioCmd::SetVolume(volume));
        }
        KeyCode::Char('K') => {
            state.pending_gg = false;
            app.toggle_metadata_window();
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    Ok(false)
}

#[cfg(test)]
mod tests;
