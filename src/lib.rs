//! Fruit Drop - simulation core of a Suika-style merging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (catalog, bodies, collisions, world)
//! - `game`: Controller orchestrating spawns, merges, score and game over
//! - `platform`: Host-facing collaborator traits, storage and time
//! - `highscores`: Best-score persistence backends
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::Controller;
#[cfg(not(target_arch = "wasm32"))]
pub use highscores::FileStore;
pub use highscores::MemoryStore;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 850.0;

    /// Height of the boundary line (y grows downward)
    pub const LINE_Y: f32 = 100.0;

    /// Launcher sits at a fixed height above the field
    pub const LAUNCHER_Y: f32 = 40.0;

    /// Per-tick downward acceleration (one tick = one frame)
    pub const GRAVITY: f32 = 0.2;
    /// Horizontal damping on ground contact
    pub const FRICTION: f32 = 0.98;
    /// Vertical velocity multiplier on ground contact (soft bounce)
    pub const GROUND_BOUNCE: f32 = -0.1;
    /// Normal-component damping for body-body collisions
    pub const RESTITUTION: f32 = 0.5;
    /// Vertical speed every new body starts with
    pub const INITIAL_FALL_SPEED: f32 = 5.0;

    /// Minimum time between accepted drops
    pub const CLICK_COOLDOWN_MS: f64 = 700.0;
    /// Time a settled body may stay above the line before the run ends
    pub const GAME_OVER_HOLD_MS: f64 = 2000.0;
    /// Delay between a merge and its child appearing
    pub const MERGE_SPAWN_DELAY_MS: f64 = 100.0;

    /// Target length of the upcoming-piece queue
    pub const MAX_QUEUE_SIZE: usize = 10;
    /// Drops are drawn uniformly from the first N catalog entries
    pub const SPAWN_POOL: usize = 4;
}
