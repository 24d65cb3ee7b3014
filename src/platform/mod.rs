//! Platform abstraction layer
//!
//! The simulation core talks to its host only through these traits:
//! - Drawing (`Renderer`)
//! - Score readouts (`ScoreDisplay`)
//! - Best-score persistence (`HighScoreStore`)
//! - End-of-game popup (`GameOverNotifier`)
//!
//! Pointer and click events are pushed in by the host calling the controller.

pub mod time;

use glam::Vec2;

use crate::sim::{Body, Launcher, PieceType};

/// Axis-aligned rectangle in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Draws the field. Called once per frame after the simulation tick.
pub trait Renderer {
    fn clear(&mut self, rect: Rect);
    fn draw_body(&mut self, body: &Body, piece: &PieceType);
    fn draw_launcher(&mut self, launcher: &Launcher, piece: &PieceType);
    /// On-deck piece in the side window
    fn draw_preview(&mut self, piece: &PieceType);
}

/// Score readouts. Called after every score change.
pub trait ScoreDisplay {
    fn show(&mut self, score: u64);
    fn show_final(&mut self, score: u64);
    fn show_high(&mut self, score: u64);
}

/// Persistent best score
pub trait HighScoreStore {
    fn load(&self) -> Option<u64>;
    fn save(&mut self, score: u64);
}

/// Invoked once per transition into game over
pub trait GameOverNotifier {
    fn on_game_over(&mut self);
}

/// Collaborator that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct Noop;

impl ScoreDisplay for Noop {
    fn show(&mut self, _score: u64) {}
    fn show_final(&mut self, _score: u64) {}
    fn show_high(&mut self, _score: u64) {}
}

impl GameOverNotifier for Noop {
    fn on_game_over(&mut self) {}
}

impl Renderer for Noop {
    fn clear(&mut self, _rect: Rect) {}
    fn draw_body(&mut self, _body: &Body, _piece: &PieceType) {}
    fn draw_launcher(&mut self, _launcher: &Launcher, _piece: &PieceType) {}
    fn draw_preview(&mut self, _piece: &PieceType) {}
}

/// The host-side collaborators a controller reports to
pub struct Hooks {
    pub display: Box<dyn ScoreDisplay>,
    pub store: Box<dyn HighScoreStore>,
    pub notifier: Box<dyn GameOverNotifier>,
}

impl Hooks {
    pub fn new(
        display: Box<dyn ScoreDisplay>,
        store: Box<dyn HighScoreStore>,
        notifier: Box<dyn GameOverNotifier>,
    ) -> Self {
        Self {
            display,
            store,
            notifier,
        }
    }
}

impl Default for Hooks {
    /// No display, in-memory store, no notifier
    fn default() -> Self {
        Self::new(
            Box::new(Noop),
            Box::new(crate::highscores::MemoryStore::default()),
            Box::new(Noop),
        )
    }
}
