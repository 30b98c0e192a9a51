use super::*;
use crate::audio::PlaybackInfo;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

fn t(name: &str) -> crate::library::Track {
    crate::library::Track {
        path: std::path::PathBuf::from(format!("/music/{name}.mp3")),
        title: name.into(),
        artist: None,
        album: None,
        duration: None,
        display: name.into(),
    }
}

/// An app wired to a hand-built engine snapshot, plus the command channel's
/// receiving end and an empty store in a fresh directory.
fn fixture(
    tracks: Vec<crate::library::Track>,
    info: PlaybackInfo,
) -> (
    App,
    mpsc::Sender<AudioCmd>,
    Receiver<AudioCmd>,
    PositionStore,
    tempfile::TempDir,
) {
    let dir = tempdir().unwrap();
    let store = PositionStore::load(dir.path().join("position.txt"));

    let mut app = App::new(tracks);
    app.set_playback_handle(Arc::new(Mutex::new(info)));

    let (tx, rx) = mpsc::channel::<AudioCmd>();
    (app, tx, rx, store, dir)
}

fn playing_at(index: usize, position: Duration) -> PlaybackInfo {
    PlaybackInfo {
        index: Some(index),
        position,
        duration: None,
        playing: true,
        last_error: None,
    }
}

#[test]
fn play_is_a_no_op_while_already_playing() {
    let (mut app, tx, rx, store, _dir) =
        fixture(vec![t("a"), t("b")], playing_at(0, Duration::from_secs(10)));
    app.playback = PlaybackState::Playing;
    app.selected = 1;

    press_play(&mut app, &tx, &store);

    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(app.playback, PlaybackState::Playing);
}

#[test]
fn play_resumes_a_paused_track() {
    let (mut app, tx, rx, store, _dir) =
        fixture(vec![t("a")], playing_at(0, Duration::from_secs(10)));
    app.playback = PlaybackState::Paused;

    press_play(&mut app, &tx, &store);

    assert!(matches!(rx.try_recv(), Ok(AudioCmd::Resume)));
    assert_eq!(app.playback, PlaybackState::Playing);
}

#[test]
fn play_from_stopped_starts_the_cursor_track_at_its_saved_offset() {
    let (mut app, tx, rx, mut store, _dir) = fixture(
        vec![t("a"), t("b")],
        PlaybackInfo::default(),
    );
    app.playback = PlaybackState::Stopped;
    app.set_cursor(1);
    // The selection sits elsewhere; Play follows the playlist cursor.
    app.selected = 0;
    store.record(&app.tracks[1].url(), Duration::from_secs(95));

    press_play(&mut app, &tx, &store);

    match rx.try_recv() {
        Ok(AudioCmd::Play { index, start_at }) => {
            assert_eq!(index, 1);
            assert_eq!(start_at, Duration::from_secs(95));
        }
        other => panic!("expected Play, got {other:?}"),
    }
    assert_eq!(app.playback, PlaybackState::Playing);
}

#[test]
fn play_from_stopped_without_a_saved_offset_starts_at_zero() {
    let (mut app, tx, rx, store, _dir) = fixture(vec![t("a")], PlaybackInfo::default());
    app.playback = PlaybackState::Stopped;

    press_play(&mut app, &tx, &store);

    match rx.try_recv() {
        Ok(AudioCmd::Play { index, start_at }) => {
            assert_eq!(index, 0);
            assert_eq!(start_at, Duration::ZERO);
        }
        other => panic!("expected Play, got {other:?}"),
    }
}

#[test]
fn pause_records_the_outgoing_offset() {
    let (mut app, tx, rx, mut store, _dir) =
        fixture(vec![t("a")], playing_at(0, Duration::from_secs(42)));
    app.playback = PlaybackState::Playing;

    press_pause(&mut app, &tx, &mut store);

    assert!(matches!(rx.try_recv(), Ok(AudioCmd::Pause)));
    assert_eq!(
        store.offset_for(&app.tracks[0].url()),
        Some(Duration::from_secs(42))
    );
    assert_eq!(app.playback, PlaybackState::Paused);
}

#[test]
fn pause_then_play_resumes_rather_than_restarting() {
    let (mut app, tx, rx, mut store, _dir) =
        fixture(vec![t("a")], playing_at(0, Duration::from_secs(42)));
    app.playback = PlaybackState::Playing;

    press_pause(&mut app, &tx, &mut store);
    press_play(&mut app, &tx, &store);

    assert!(matches!(rx.try_recv(), Ok(AudioCmd::Pause)));
    assert!(matches!(rx.try_recv(), Ok(AudioCmd::Resume)));
    assert_eq!(app.playback, PlaybackState::Playing);
}

#[test]
fn stop_forgets_the_saved_offset() {
    let (mut app, tx, rx, mut store, _dir) =
        fixture(vec![t("a")], playing_at(0, Duration::from_secs(30)));
    app.playback = PlaybackState::Playing;
    store.record(&app.tracks[0].url(), Duration::from_secs(30));

    press_stop(&mut app, &tx, &mut store);

    assert!(matches!(rx.try_recv(), Ok(AudioCmd::Stop)));
    assert_eq!(store.offset_for(&app.tracks[0].url()), None);
    assert_eq!(app.playback, PlaybackState::Stopped);
}

#[test]
fn next_records_the_outgoing_offset_before_advancing() {
    let (mut app, tx, rx, mut store, _dir) =
        fixture(vec![t("a"), t("b")], playing_at(0, Duration::from_secs(17)));
    app.playback = PlaybackState::Playing;

    press_next(&mut app, &tx, &mut store);

    assert!(matches!(rx.try_recv(), Ok(AudioCmd::Next)));
    assert_eq!(
        store.offset_for(&app.tracks[0].url()),
        Some(Duration::from_secs(17))
    );
}

#[test]
fn previous_does_not_record_an_offset() {
    let (mut app, tx, rx, store, _dir) =
        fixture(vec![t("a"), t("b")], playing_at(1, Duration::from_secs(17)));
    app.playback = PlaybackState::Playing;

    press_prev(&mut app, &tx);

    assert!(matches!(rx.try_recv(), Ok(AudioCmd::Prev)));
    assert!(store.is_empty());
}

#[test]
fn stop_when_nothing_is_loaded_keeps_other_offsets() {
    let (mut app, tx, _rx, mut store, _dir) =
        fixture(vec![t("a"), t("b")], PlaybackInfo::default());
    app.playback = PlaybackState::Stopped;
    store.record(&app.tracks[1].url(), Duration::from_secs(5));

    press_stop(&mut app, &tx, &mut store);

    assert_eq!(
        store.offset_for(&app.tracks[1].url()),
        Some(Duration::from_secs(5))
    );
}
