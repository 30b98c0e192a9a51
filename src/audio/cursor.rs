//! Pure playlist-cursor stepping.
//!
//! Manual next/prev wrap only under loop-all; repeat-one behaves like
//! no-loop for manual steps (auto-advance handles repeat-one itself).

use super::types::LoopMode;

/// The index after `cursor`, or `None` when the playlist ends here.
pub(crate) fn advance(cursor: usize, len: usize, loop_mode: LoopMode) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if cursor + 1 < len {
        return Some(cursor + 1);
    }
    match loop_mode {
        LoopMode::LoopAll => Some(0),
        LoopMode::NoLoop | LoopMode::LoopOne => None,
    }
}

/// The index before `cursor`, or `None` when the playlist ends here.
pub(crate) fn retreat(cursor: usize, len: usize, loop_mode: LoopMode) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if cursor > 0 {
        return Some((cursor - 1).min(len - 1));
    }
    match loop_mode {
        LoopMode::LoopAll => Some(len - 1),
        LoopMode::NoLoop | LoopMode::LoopOne => None,
    }
}
