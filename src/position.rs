//! Per-track playback position persistence.
//!
//! The store maps a track URL to its last-known offset and survives across
//! sessions through a single flat file with a load-once/save-once lifecycle.

mod store;

pub use store::*;

#[cfg(test)]
mod tests;
