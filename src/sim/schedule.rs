//! Delayed merge spawns
//!
//! A merge produces its child a fixed time after the two parents vanish. The
//! pending child is tagged with the epoch of the world it was scheduled in, so
//! a reset during the delay turns it into a no-op.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::PieceKind;

/// A child body waiting to be inserted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSpawn {
    /// Epoch of the world that produced the merge
    pub epoch: u64,
    /// Host time (ms) at which the child appears
    pub due_ms: f64,
    pub kind: PieceKind,
    pub pos: Vec2,
}

/// Pending spawns in scheduling order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnSchedule {
    pending: Vec<ScheduledSpawn>,
}

impl SpawnSchedule {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, spawn: ScheduledSpawn) {
        self.pending.push(spawn);
    }

    /// Remove and return every spawn due at `now_ms`, earliest first.
    /// Spawns due at the same time keep their scheduling order.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<ScheduledSpawn> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|s| s.due_ms <= now_ms);
        self.pending = pending;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(epoch: u64, due_ms: f64, kind: usize) -> ScheduledSpawn {
        ScheduledSpawn {
            epoch,
            due_ms,
            kind: PieceKind(kind),
            pos: Vec2::ZERO,
        }
    }

    #[test]
    fn test_take_due_splits_by_time() {
        let mut schedule = SpawnSchedule::new();
        schedule.schedule(spawn(0, 200.0, 1));
        schedule.schedule(spawn(0, 100.0, 2));
        schedule.schedule(spawn(0, 300.0, 3));

        assert!(schedule.take_due(50.0).is_empty());

        let due = schedule.take_due(200.0);
        let kinds: Vec<_> = due.iter().map(|s| s.kind.0).collect();
        assert_eq!(kinds, vec![2, 1]);
        assert_eq!(schedule.len(), 1);

        assert_eq!(schedule.take_due(1000.0).len(), 1);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_same_due_time_keeps_order() {
        let mut schedule = SpawnSchedule::new();
        schedule.schedule(spawn(0, 100.0, 5));
        schedule.schedule(spawn(0, 100.0, 4));
        let kinds: Vec<_> = schedule.take_due(100.0).iter().map(|s| s.kind.0).collect();
        assert_eq!(kinds, vec![5, 4]);
    }
}
