use std::path::PathBuf;
use std::time::Duration;

/// One playlist entry. Row `i` of the track table is always `tracks[i]`.
#[derive(Clone, Debug)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    pub display: String,
}

impl Track {
    /// The `file://` URL used as the key into the position store.
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Build a display string from metadata, preferring `Artist - Title`.
pub(crate) fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), title),
        _ => title.to_string(),
    }
}
