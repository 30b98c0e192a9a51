use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// On-disk shape of the store: a TOML table of URL -> offset (milliseconds).
#[derive(Debug, Default, Serialize, Deserialize)]
struct PositionFile {
    #[serde(default)]
    positions: HashMap<String, u64>,
}

/// URL -> last-known playback offset, loaded once at startup and written
/// once at shutdown. At most one entry per URL.
pub struct PositionStore {
    path: PathBuf,
    map: HashMap<String, u64>,
}

impl PositionStore {
    /// Read the store from `path`. A missing or unparsable file yields an
    /// empty store. The file is removed after a successful read; until the
    /// next save, the in-memory map is the only copy.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let map = match fs::read_to_string(&path) {
            Ok(text) => match toml::from_str::<PositionFile>(&text) {
                Ok(file) => {
                    let _ = fs::remove_file(&path);
                    file.positions
                }
                Err(_) => HashMap::new(),
            },
            Err(_) => HashMap::new(),
        };

        Self { path, map }
    }

    /// Write the store back to its path, overwriting any prior content.
    pub fn save(&self) -> io::Result<()> {
        let file = PositionFile {
            positions: self.map.clone(),
        };
        let text = toml::to_string(&file).map_err(io::Error::other)?;
        fs::write(&self.path, text)
    }

    /// Upsert the offset for `url`.
    pub fn record(&mut self, url: &str, offset: Duration) {
        self.map.insert(url.to_string(), offset.as_millis() as u64);
    }

    /// Drop any saved offset for `url`.
    pub fn forget(&mut self, url: &str) {
        self.map.remove(url);
    }

    /// Saved offset for `url`, if any. Absent means "start from zero".
    pub fn offset_for(&self, url: &str) -> Option<Duration> {
        self.map.get(url).map(|&ms| Duration::from_millis(ms))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn file_path(&self) -> &Path {
        &self.path
    }
}
