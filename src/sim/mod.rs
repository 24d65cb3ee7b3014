//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must be pure and deterministic:
//! - Fixed per-tick constants, no wall-clock delta
//! - Stable iteration order (by body ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod catalog;
pub mod collision;
pub mod queue;
pub mod schedule;
pub mod state;
pub mod world;

pub use body::{Body, BodyId, Launcher};
pub use catalog::{Catalog, CatalogError, PieceKind, PieceType};
pub use collision::{Contact, circle_contact, resolve_pair};
pub use queue::PieceQueue;
pub use schedule::{ScheduledSpawn, SpawnSchedule};
pub use state::{GameState, RngState};
pub use world::{Merge, StepReport, World};
