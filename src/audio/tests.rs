use super::cursor::{advance, retreat};
use super::types::LoopMode;

#[test]
fn advance_steps_forward_within_the_playlist() {
    assert_eq!(advance(0, 3, LoopMode::NoLoop), Some(1));
    assert_eq!(advance(1, 3, LoopMode::LoopOne), Some(2));
}

#[test]
fn advance_wraps_from_last_to_first_under_loop_all() {
    assert_eq!(advance(2, 3, LoopMode::LoopAll), Some(0));
    assert_eq!(advance(2, 3, LoopMode::NoLoop), None);
    assert_eq!(advance(2, 3, LoopMode::LoopOne), None);
}

#[test]
fn retreat_wraps_from_first_to_last_under_loop_all() {
    assert_eq!(retreat(0, 3, LoopMode::LoopAll), Some(2));
    assert_eq!(retreat(0, 3, LoopMode::NoLoop), None);
    assert_eq!(retreat(2, 3, LoopMode::LoopAll), Some(1));
}

#[test]
fn empty_playlist_never_steps() {
    assert_eq!(advance(0, 0, LoopMode::LoopAll), None);
    assert_eq!(retreat(0, 0, LoopMode::LoopAll), None);
}

#[test]
fn out_of_range_cursor_is_clamped() {
    // A stale cursor past the end retreats back into range.
    assert_eq!(retreat(9, 3, LoopMode::NoLoop), Some(2));
    assert_eq!(advance(9, 3, LoopMode::LoopAll), Some(0));
}
