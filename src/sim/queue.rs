//! Upcoming-piece queue
//!
//! Plain FIFO. The controller decides what goes in and how long it gets.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::catalog::PieceKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PieceQueue {
    items: VecDeque<PieceKind>,
}

impl PieceQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, kind: PieceKind) {
        self.items.push_back(kind);
    }

    pub fn dequeue(&mut self) -> Option<PieceKind> {
        self.items.pop_front()
    }

    /// Front of the queue (the launcher's piece)
    pub fn peek(&self) -> Option<PieceKind> {
        self.items.front().copied()
    }

    /// Random-access peek; index 1 is the on-deck preview
    pub fn get(&self, index: usize) -> Option<PieceKind> {
        self.items.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.items.iter().copied()
    }

    /// Append random kinds from `[0, pool)` until the queue holds `target`
    /// entries. Returns how many were added.
    pub fn refill<R: Rng>(&mut self, rng: &mut R, target: usize, pool: usize) -> usize {
        let pool = pool.max(1);
        let mut added = 0;
        while self.items.len() < target {
            self.items.push_back(PieceKind(rng.random_range(0..pool)));
            added += 1;
        }
        added
    }
}
