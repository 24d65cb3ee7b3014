//! Physics world
//!
//! Owns every active body and advances them one fixed tick at a time. Merges
//! are detected here but the resulting child is not inserted; the step reports
//! it so the caller can schedule the delayed spawn against this world's epoch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId};
use super::catalog::{Catalog, PieceKind};
use super::collision::{circle_contact, resolve_pair};
use crate::tuning::Tuning;

/// A merge detected during a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merge {
    pub parents: (BodyId, BodyId),
    /// Kind of the child to spawn
    pub kind: PieceKind,
    /// Midpoint of the parents at detection time
    pub pos: Vec2,
}

/// What happened during one step
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    pub merges: Vec<Merge>,
}

/// The set of simulated bodies for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Generation counter; a reset replaces the world with a higher epoch
    epoch: u64,
    /// Active bodies, sorted by id
    bodies: Vec<Body>,
    next_id: u32,
}

impl World {
    pub fn new(epoch: u64) -> Self {
        Self {
            epoch,
            bodies: Vec::new(),
            next_id: 1,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Insert a new body of `kind` centered at `pos`
    pub fn spawn(&mut self, catalog: &Catalog, kind: PieceKind, pos: Vec2) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::new(id, kind, catalog.get(kind).radius, pos));
        id
    }

    /// Advance every body by one tick.
    ///
    /// Bodies are processed in id order. Each one integrates, resolves the
    /// floor and walls, then collides against every other live body, so each
    /// overlapping pair is visited once from each side. A body claimed by a
    /// merge is no longer simulated or collided with once the pass that
    /// claimed it finishes; all claimed bodies are removed at the end.
    pub fn step(&mut self, tuning: &Tuning, catalog: &Catalog) -> StepReport {
        let mut report = StepReport::default();
        let count = self.bodies.len();
        let mut doomed = vec![false; count];

        for i in 0..count {
            if doomed[i] {
                continue;
            }

            {
                let body = &mut self.bodies[i];
                body.integrate(tuning.gravity);
                body.resolve_ground(tuning.field_height, tuning.friction, tuning.ground_bounce);
                body.resolve_walls(0.0, tuning.field_width);
            }

            let mut claimed: Vec<usize> = Vec::new();
            for j in 0..count {
                if j == i || doomed[j] {
                    continue;
                }

                let (a, b) = pair_mut(&mut self.bodies, i, j);
                let Some(contact) = circle_contact(a.pos, a.radius(), b.pos, b.radius()) else {
                    continue;
                };

                if !a.landed {
                    log::trace!("body {} landed on body {}", a.id.0, b.id.0);
                    a.landed = true;
                }

                if a.kind == b.kind && !claimed.contains(&i) && !claimed.contains(&j) {
                    claimed.push(i);
                    claimed.push(j);
                    let merge = Merge {
                        parents: (a.id, b.id),
                        kind: catalog.next(a.kind),
                        pos: a.midpoint(b),
                    };
                    log::debug!(
                        "merge {} + {} -> {} at ({:.1}, {:.1})",
                        a.id.0,
                        b.id.0,
                        catalog.get(merge.kind).name,
                        merge.pos.x,
                        merge.pos.y
                    );
                    report.merges.push(merge);
                }

                resolve_pair(a, b, &contact, tuning.restitution);
            }

            for idx in claimed {
                doomed[idx] = true;
            }
        }

        if doomed.iter().any(|&d| d) {
            let mut flags = doomed.into_iter();
            self.bodies.retain(|_| !flags.next().unwrap_or(false));
        }

        report
    }
}

/// Mutable references to two distinct bodies
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PieceType;

    fn setup() -> (World, Tuning, Catalog) {
        (World::new(0), Tuning::default(), Catalog::default())
    }

    fn kind(catalog: &Catalog, name: &str) -> PieceKind {
        catalog.kind_named(name).unwrap()
    }

    #[test]
    fn test_empty_step() {
        let (mut world, tuning, catalog) = setup();
        let report = world.step(&tuning, &catalog);
        assert!(report.merges.is_empty());
        assert!(world.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let (mut world, _, catalog) = setup();
        let a = world.spawn(&catalog, PieceKind(0), Vec2::new(100.0, 40.0));
        let b = world.spawn(&catalog, PieceKind(0), Vec2::new(300.0, 40.0));
        assert!(a < b);
        assert_eq!(world.get(b).unwrap().radius(), 15.0);
    }

    #[test]
    fn test_single_body_falls_and_lands() {
        let (mut world, tuning, catalog) = setup();
        let id = world.spawn(&catalog, kind(&catalog, "grape"), Vec2::new(300.0, 40.0));

        for _ in 0..300 {
            world.step(&tuning, &catalog);
        }

        let body = world.get(id).unwrap();
        assert!(body.landed);
        assert!((body.pos.y - (850.0 - 30.0)).abs() < 2.0);
    }

    #[test]
    fn test_cherries_merge_into_grape() {
        let (mut world, tuning, catalog) = setup();
        let cherry = kind(&catalog, "cherry");
        let a = world.spawn(&catalog, cherry, Vec2::new(300.0, 400.0));
        let b = world.spawn(&catalog, cherry, Vec2::new(310.0, 400.0));

        let report = world.step(&tuning, &catalog);

        assert!(world.get(a).is_none());
        assert!(world.get(b).is_none());
        assert!(world.is_empty());

        assert_eq!(report.merges.len(), 1);
        let merge = &report.merges[0];
        assert_eq!(merge.parents, (a, b));
        assert_eq!(catalog.get(merge.kind).name, "grape");
        // `a` moved down 5.2 before the pair was tested
        assert!((merge.pos.x - 305.0).abs() < 1e-3);
        assert!((merge.pos.y - 402.6).abs() < 1e-3);
    }

    #[test]
    fn test_last_kind_merges_into_first() {
        let (mut world, tuning, _) = setup();
        let catalog = Catalog::new(vec![
            PieceType::new("small", 10.0, 0, 1),
            PieceType::new("large", 20.0, 0, 2),
        ])
        .unwrap();
        world.spawn(&catalog, PieceKind(1), Vec2::new(300.0, 400.0));
        world.spawn(&catalog, PieceKind(1), Vec2::new(320.0, 400.0));

        let report = world.step(&tuning, &catalog);
        assert_eq!(report.merges.len(), 1);
        assert_eq!(report.merges[0].kind, PieceKind(0));
    }

    #[test]
    fn test_one_merge_per_body_per_frame() {
        let (mut world, tuning, catalog) = setup();
        let cherry = kind(&catalog, "cherry");
        world.spawn(&catalog, cherry, Vec2::new(300.0, 400.0));
        world.spawn(&catalog, cherry, Vec2::new(310.0, 400.0));
        let third = world.spawn(&catalog, cherry, Vec2::new(305.0, 410.0));

        let report = world.step(&tuning, &catalog);

        assert_eq!(report.merges.len(), 1);
        assert_eq!(world.len(), 1);
        assert_eq!(world.bodies()[0].id, third);
    }

    #[test]
    fn test_different_kinds_collide_without_merging() {
        let (mut world, tuning, catalog) = setup();
        let a = world.spawn(&catalog, kind(&catalog, "cherry"), Vec2::new(300.0, 400.0));
        let b = world.spawn(&catalog, kind(&catalog, "grape"), Vec2::new(330.0, 400.0));

        let report = world.step(&tuning, &catalog);

        assert!(report.merges.is_empty());
        assert_eq!(world.len(), 2);
        assert!(world.get(a).unwrap().landed, "contact counts as landing");
        assert!(world.get(a).unwrap().pos.x < world.get(b).unwrap().pos.x);
    }

    #[test]
    fn test_coincident_bodies_stay_finite() {
        let (mut world, tuning, catalog) = setup();
        let a = world.spawn(&catalog, kind(&catalog, "cherry"), Vec2::new(300.0, 400.0));
        world.spawn(&catalog, kind(&catalog, "grape"), Vec2::new(300.0, 400.0));
        // Cancel this tick's gravity so `a` is still on top of its neighbour
        world.bodies_mut()[0].vel = Vec2::new(0.0, -tuning.gravity);

        for _ in 0..5 {
            world.step(&tuning, &catalog);
        }

        assert!(world.get(a).unwrap().landed);
        for body in world.bodies() {
            assert!(body.pos.is_finite(), "position went non-finite: {:?}", body.pos);
            assert!(body.vel.is_finite(), "velocity went non-finite: {:?}", body.vel);
        }
    }

    #[test]
    fn test_crowded_world_settles() {
        let (mut world, tuning, catalog) = setup();
        for i in 0..12 {
            let x = 60.0 + (i % 6) as f32 * 90.0;
            let y = 40.0 + (i / 6) as f32 * 120.0;
            world.spawn(&catalog, PieceKind(2 + i % 3), Vec2::new(x, y));
        }

        for _ in 0..600 {
            world.step(&tuning, &catalog);
        }

        assert!(!world.is_empty());
        for body in world.bodies() {
            assert!(body.pos.is_finite() && body.vel.is_finite());
            assert!(body.landed);
        }
    }
}
