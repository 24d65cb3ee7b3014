//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. Any field may be overridden from JSON;
//! missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runtime-tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Boundary line; a settled body reaching above it starts the game-over timer
    pub line_y: f32,
    pub launcher_y: f32,

    // === Physics (per tick) ===
    pub gravity: f32,
    pub friction: f32,
    pub ground_bounce: f32,
    pub restitution: f32,

    // === Timing (ms) ===
    pub click_cooldown_ms: f64,
    pub game_over_hold_ms: f64,
    pub merge_spawn_delay_ms: f64,

    // === Queue ===
    pub max_queue_size: usize,
    /// Drops are drawn from the first `spawn_pool` catalog entries
    pub spawn_pool: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            line_y: LINE_Y,
            launcher_y: LAUNCHER_Y,

            gravity: GRAVITY,
            friction: FRICTION,
            ground_bounce: GROUND_BOUNCE,
            restitution: RESTITUTION,

            click_cooldown_ms: CLICK_COOLDOWN_MS,
            game_over_hold_ms: GAME_OVER_HOLD_MS,
            merge_spawn_delay_ms: MERGE_SPAWN_DELAY_MS,

            max_queue_size: MAX_QUEUE_SIZE,
            spawn_pool: SPAWN_POOL,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "fruit_drop_tuning";

    /// Load tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.field_width, 600.0);
        assert_eq!(tuning.field_height, 850.0);
        assert_eq!(tuning.line_y, 100.0);
        assert_eq!(tuning.max_queue_size, 10);
        assert_eq!(tuning.spawn_pool, 4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "max_queue_size": 3 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.max_queue_size, 3);
        assert_eq!(tuning.click_cooldown_ms, CLICK_COOLDOWN_MS);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Tuning::from_json("{ gravity: }"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_json_survives_write_and_read() {
        let mut tuning = Tuning::default();
        tuning.line_y = 140.0;
        let loaded = Tuning::from_json(&tuning.to_json().unwrap()).unwrap();
        assert_eq!(loaded, tuning);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("fruit_drop_missing_tuning.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(Tuning::load_from(&path), Err(TuningError::Io(_))));
    }
}
