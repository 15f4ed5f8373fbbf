use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::{APP_DIR_NAME, HIGH_SCORE_KEY};

const SCORE_FILE_NAME: &str = "scores.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(rename = "snake-high-score")]
    high_score: u32,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Loads the stored high score from `path`.
///
/// Returns `Ok(None)` when nothing has been stored yet.
pub fn load_high_score(path: &Path) -> io::Result<Option<u32>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| Some(file.high_score))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Stores `score` under the high-score key, creating parent directories.
pub fn save_high_score(path: &Path, score: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}

/// Best score seen so far, persisted whenever it improves.
///
/// A failed load or save drops back to in-memory tracking for the rest of
/// the run.
#[derive(Debug, Clone)]
pub struct HighScoreTracker {
    best: u32,
    path: Option<PathBuf>,
}

impl HighScoreTracker {
    /// Seeds the tracker from the score file at `path`.
    #[must_use]
    pub fn load(path: PathBuf) -> Self {
        match load_high_score(&path) {
            Ok(stored) => {
                let best = stored.unwrap_or(0);
                info!("{HIGH_SCORE_KEY} loaded from {}: {best}", path.display());
                Self {
                    best,
                    path: Some(path),
                }
            }
            Err(error) => {
                warn!(
                    "cannot read {}; high score kept in memory: {error}",
                    path.display()
                );
                Self::in_memory()
            }
        }
    }

    /// Tracker that never touches the filesystem.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            best: 0,
            path: None,
        }
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    /// Records `score`; returns true when it set a new best.
    pub fn observe(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }

        self.best = score;
        if let Some(path) = &self.path {
            if let Err(error) = save_high_score(path, score) {
                warn!(
                    "cannot save high score to {}; continuing in memory: {error}",
                    path.display()
                );
                self.path = None;
            }
        }
        true
    }
}
