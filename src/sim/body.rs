//! Circular bodies and the launcher
//!
//! A body is created by a drop or a merge and destroyed when consumed by a
//! merge. Its radius never changes after creation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::PieceKind;
use crate::consts::INITIAL_FALL_SPEED;

/// Stable body identity (never reused within a world)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// A falling or settled piece
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    pub kind: PieceKind,
    /// Set on first ground or body contact, never cleared
    pub landed: bool,
    /// Host time (ms) when the body was first seen above the line
    pub crossed_line_at: Option<f64>,
    /// Visual spin, no physics effect
    pub rotation: f32,
}

impl Body {
    pub fn new(id: BodyId, kind: PieceKind, radius: f32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(0.0, INITIAL_FALL_SPEED),
            radius,
            kind,
            landed: false,
            crossed_line_at: None,
            rotation: 0.0,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Apply gravity and horizontal motion for one tick.
    ///
    /// Vertical motion is applied by [`Body::resolve_ground`].
    pub fn integrate(&mut self, gravity: f32) {
        self.vel.y += gravity;
        self.pos.x += self.vel.x;
        self.rotation += self.vel.x / self.radius;
    }

    /// Clamp against the floor, then apply vertical velocity.
    ///
    /// The velocity step runs even on the tick that clamps, so a body resting
    /// on the floor gets one post-clamp nudge from its damped bounce.
    pub fn resolve_ground(&mut self, floor_y: f32, friction: f32, bounce: f32) {
        if self.pos.y + self.radius >= floor_y {
            self.pos.y = floor_y - self.radius;
            self.vel.x *= friction;
            self.vel.y *= bounce;
            if !self.landed {
                log::trace!("body {} landed on floor", self.id.0);
                self.landed = true;
            }
        }
        self.pos.y += self.vel.y;
    }

    /// Keep the body between the side walls
    pub fn resolve_walls(&mut self, left_x: f32, right_x: f32) {
        if self.pos.x - self.radius <= left_x {
            self.pos.x = left_x + self.radius;
            self.vel.x = self.vel.x.abs();
        }
        if self.pos.x + self.radius >= right_x {
            self.pos.x = right_x - self.radius;
            self.vel.x = -self.vel.x.abs();
        }
    }

    /// True if the body has settled and its top edge is at or above the line
    pub fn has_crossed_line(&self, line_y: f32) -> bool {
        self.landed && self.pos.y - self.radius <= line_y
    }

    /// Midpoint between two body centers
    pub fn midpoint(&self, other: &Body) -> Vec2 {
        (self.pos + other.pos) * 0.5
    }
}

/// The player-controlled drop indicator. Not simulated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Launcher {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PieceKind,
}

impl Launcher {
    pub fn new(kind: PieceKind, radius: f32, pos: Vec2) -> Self {
        Self { pos, radius, kind }
    }

    /// Follow the pointer, clamped so the piece stays inside the field.
    /// Returns the clamped x.
    pub fn follow(&mut self, x: f32, field_width: f32) -> f32 {
        self.pos.x = x.max(self.radius).min(field_width - self.radius);
        self.pos.x
    }
}
