//! Best-score persistence
//!
//! A single best score, stored as a small JSON record. Backends:
//! - `MemoryStore`: tests and headless runs
//! - `FileStore`: native, JSON file on disk
//! - `LocalStorageStore`: wasm, browser LocalStorage

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::HighScoreStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score record is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stored best-score record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u64,
}

/// Keeps the best score in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u64>,
}

impl MemoryStore {
    pub fn with_score(score: u64) -> Self {
        Self { best: Some(score) }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Option<u64> {
        self.best
    }

    fn save(&mut self, score: u64) {
        self.best = Some(score);
    }
}

/// JSON file on disk
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_CONFIG_HOME/fruit-drop/highscore.json`, falling back to
    /// `~/.config`, then the working directory
    pub fn default_location() -> Self {
        let base = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|xdg| !xdg.is_empty())
            .map(std::path::PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|home| std::path::PathBuf::from(home).join(".config"))
            })
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        Self::new(base.join("fruit-drop").join("highscore.json"))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn read(&self) -> Result<Option<BestScore>, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    pub fn write(&self, best: BestScore) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(&best)?)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileStore {
    fn load(&self) -> Option<u64> {
        match self.read() {
            Ok(Some(best)) => {
                log::info!("Loaded high score {} from {}", best.score, self.path.display());
                Some(best.score)
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                None
            }
            Err(e) => {
                log::warn!("Ignoring high score file: {}", e);
                None
            }
        }
    }

    fn save(&mut self, score: u64) {
        match self.write(BestScore { score }) {
            Ok(()) => log::info!("High score {} saved", score),
            Err(e) => log::warn!("Failed to save high score: {}", e),
        }
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "fruit_drop_highscore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Option<u64> {
        let json = Self::storage()?.get_item(Self::STORAGE_KEY).ok().flatten()?;
        match serde_json::from_str::<BestScore>(&json) {
            Ok(best) => {
                log::info!("Loaded high score {}", best.score);
                Some(best.score)
            }
            Err(e) => {
                log::warn!("Ignoring stored high score: {}", e);
                None
            }
        }
    }

    fn save(&mut self, score: u64) {
        if let Some(storage) = Self::storage() {
            if let Ok(json) = serde_json::to_string(&BestScore { score }) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High score {} saved", score);
            }
        }
    }
}
