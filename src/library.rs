//! Track model and file-adding helpers.
//!
//! Tracks enter the playlist through `library::expand`, which accepts a
//! single media file or a directory and probes each file for metadata.

mod add;
mod model;

pub use add::*;
pub use model::*;
