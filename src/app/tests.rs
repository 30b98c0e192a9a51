use super::*;
use crate::audio::LoopMode;
use crate::library::Track;
use std::time::Duration;

fn t(title: &str) -> Track {
    Track {
        path: std::path::PathBuf::from(format!("/music/{title}.mp3")),
        title: title.into(),
        artist: None,
        album: None,
        duration: None,
        display: title.into(),
    }
}

#[test]
fn mute_then_unmute_restores_the_pre_mute_volume() {
    let mut app = App::new(vec![t("A")]);
    app.set_volume(65);

    assert_eq!(app.toggle_mute(), 0);
    assert!(app.is_muted());

    assert_eq!(app.toggle_mute(), 65);
    assert!(!app.is_muted());
}

#[test]
fn explicit_zero_volume_does_not_clobber_the_remembered_value() {
    let mut app = App::new(vec![t("A")]);
    app.set_volume(42);
    app.set_volume(0);
    assert!(app.is_muted());

    // Unmute restores the last non-zero value, not the zero.
    assert_eq!(app.toggle_mute(), 42);
}

#[test]
fn volume_steps_clamp_and_keep_the_remembered_value() {
    let mut app = App::new(vec![t("A")]);
    app.set_volume(98);
    assert_eq!(app.volume_up(5), 100);

    app.set_volume(3);
    assert_eq!(app.volume_down(5), 0);
    // Stepping down to zero mutes; the remembered value is the last non-zero.
    assert_eq!(app.toggle_mute(), 3);
}

#[test]
fn append_tracks_preserves_row_to_entry_correspondence() {
    let mut app = App::new(Vec::new());
    app.append_tracks(vec![t("One"), t("Two")]);
    app.append_tracks(vec![t("Three")]);

    assert_eq!(app.tracks.len(), 3);
    assert_eq!(app.tracks[0].title, "One");
    assert_eq!(app.tracks[1].title, "Two");
    assert_eq!(app.tracks[2].title, "Three");
    assert!(app.tracks[2].path.ends_with("Three.mp3"));
}

#[test]
fn selection_wraps_both_ways() {
    let mut app = App::new(vec![t("A"), t("B"), t("C")]);
    app.select_prev();
    assert_eq!(app.selected, 2);
    app.select_next();
    assert_eq!(app.selected, 0);
    app.select_next();
    assert_eq!(app.selected, 1);
    app.select_last();
    assert_eq!(app.selected, 2);
    app.select_first();
    assert_eq!(app.selected, 0);
}

#[test]
fn selection_on_empty_table_is_inert() {
    let mut app = App::new(Vec::new());
    app.select_next();
    app.select_prev();
    assert_eq!(app.selected, 0);
}

#[test]
fn cursor_is_clamped_into_range() {
    let mut app = App::new(vec![t("A"), t("B")]);
    app.set_cursor(7);
    assert_eq!(app.cursor, 1);
    assert_eq!(app.current_track().unwrap().title, "B");

    let mut empty = App::new(Vec::new());
    empty.set_cursor(3);
    assert_eq!(empty.cursor, 0);
    assert!(empty.current_track().is_none());
}

#[test]
fn scrub_target_moves_within_bounds_and_commits_once() {
    let mut app = App::new(vec![t("A")]);
    assert!(!app.is_seeking());

    app.begin_seek(Duration::from_secs(10));
    assert!(app.is_seeking());

    app.scrub_forward(Duration::from_secs(5), Some(Duration::from_secs(12)));
    assert_eq!(app.seek_target, Some(Duration::from_secs(12)));

    app.scrub_back(Duration::from_secs(20));
    assert_eq!(app.seek_target, Some(Duration::ZERO));

    assert_eq!(app.take_seek_target(), Some(Duration::ZERO));
    assert!(!app.is_seeking());
    assert_eq!(app.take_seek_target(), None);
}

#[test]
fn cancel_seek_discards_the_target() {
    let mut app = App::new(vec![t("A")]);
    app.begin_seek(Duration::from_secs(3));
    app.cancel_seek();
    assert!(!app.is_seeking());
    assert_eq!(app.take_seek_target(), None);
}

#[test]
fn add_prompt_edits_and_yields_its_input() {
    let mut app = App::new(Vec::new());
    app.enter_add_mode();
    for c in "/music".chars() {
        app.push_add_char(c);
    }
    app.pop_add_char();
    assert_eq!(app.add_input, "/musi");

    let input = app.take_add_input();
    assert_eq!(input, "/musi");
    assert!(!app.add_mode);
    assert!(app.add_input.is_empty());

    app.enter_add_mode();
    app.push_add_char('x');
    app.cancel_add_mode();
    assert!(app.add_input.is_empty());
}

#[test]
fn cycle_loop_mode_cycles_three_states() {
    let mut app = App::new(vec![t("A")]);
    assert_eq!(app.loop_mode, LoopMode::LoopAll);

    app.cycle_loop_mode();
    assert_eq!(app.loop_mode, LoopMode::LoopOne);

    app.cycle_loop_mode();
    assert_eq!(app.loop_mode, LoopMode::NoLoop);

    app.cycle_loop_mode();
    assert_eq!(app.loop_mode, LoopMode::LoopAll);
}
