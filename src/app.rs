//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the track table, the
//! playlist cursor, volume state and the transient UI modes.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
