use std::path::{Path, PathBuf};

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Track, make_display};

/// Extension filter for the add prompt (the file-picker analog).
pub fn is_media_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Probe one file for tags. Unreadable tags are not an error: the track
/// falls back to its file stem and plays (or fails) like any other.
pub fn probe(path: &Path) -> Track {
    // Canonical paths keep position-store URLs stable across sessions.
    let path: PathBuf = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration = None;

    let tagged = Probe::open(&path)
        .ok()
        .and_then(|p| p.guess_file_type().ok())
        .and_then(|p| p.read().ok());
    if let Some(tagged) = tagged {
        duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.title() {
                if !v.trim().is_empty() {
                    title = v.to_string();
                }
            }
            if let Some(v) = tag.artist() {
                let v = v.trim();
                if !v.is_empty() {
                    artist = Some(v.to_string());
                }
            }
            if let Some(v) = tag.album() {
                let v = v.trim();
                if !v.is_empty() {
                    album = Some(v.to_string());
                }
            }
        }
    }

    let display = make_display(&title, artist.as_deref());

    Track {
        path,
        title,
        artist,
        album,
        duration,
        display,
    }
}

/// Expand user input into tracks: a matching file yields one track, a
/// directory yields every matching file under it (sorted by display name).
/// Anything else yields nothing.
pub fn expand(input: &Path, settings: &LibrarySettings) -> Vec<Track> {
    if input.is_file() {
        if is_media_file(input, settings) {
            return vec![probe(input)];
        }
        return Vec::new();
    }

    if !input.is_dir() {
        return Vec::new();
    }

    let mut walker = WalkDir::new(input).follow_links(settings.follow_links);
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut tracks: Vec<Track> = walker
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file() && is_media_file(e.path(), settings))
        .map(|e| probe(e.path()))
        .collect();

    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    tracks
}
