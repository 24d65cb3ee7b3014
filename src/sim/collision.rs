//! Body-body collision detection and response
//!
//! Bodies are circles. Response is an unequal-mass elastic exchange along the
//! contact normal, using `radius³` as mass, damped by a restitution factor,
//! followed by a symmetric positional correction.

use glam::Vec2;

use super::body::Body;

/// Squared distance below which two centers are treated as coincident
const MIN_DISTANCE_SQ: f32 = 1e-8;

/// Result of a circle-circle overlap test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from `b` toward `a`, or `None` if the centers coincide
    pub normal: Option<Vec2>,
    /// Center distance
    pub distance: f32,
    /// `ra + rb - distance`, positive while overlapping
    pub overlap: f32,
}

/// Test two circles for overlap
pub fn circle_contact(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> Option<Contact> {
    let delta = pos_a - pos_b;
    let distance = delta.length();
    let reach = radius_a + radius_b;
    if distance >= reach {
        return None;
    }

    let normal = if delta.length_squared() > MIN_DISTANCE_SQ {
        Some(delta / distance)
    } else {
        None
    };

    Some(Contact {
        normal,
        distance,
        overlap: reach - distance,
    })
}

/// Exchange normal velocity between `a` and `b` and push them apart.
///
/// Coincident centers have no defined normal; the pair is left untouched for
/// this tick.
pub fn resolve_pair(a: &mut Body, b: &mut Body, contact: &Contact, restitution: f32) {
    let Some(normal) = contact.normal else {
        return;
    };
    let tangent = Vec2::new(-normal.y, normal.x);

    let v1n = a.vel.dot(normal);
    let v1t = a.vel.dot(tangent);
    let v2n = b.vel.dot(normal);
    let v2t = b.vel.dot(tangent);

    let mass_a = a.radius().powi(3);
    let mass_b = b.radius().powi(3);
    let ratio = mass_b / (mass_a + mass_b);

    let v1n_after = (v1n * (1.0 - ratio) + 2.0 * ratio * v2n) / (1.0 + ratio);
    let v2n_after = (v2n * (1.0 - ratio) + 2.0 * ratio * v1n) / (1.0 + ratio);

    a.vel = normal * (v1n_after * restitution) + tangent * v1t;
    b.vel = normal * (v2n_after * restitution) + tangent * v2t;

    let push = normal * (contact.overlap / 2.0);
    a.pos += push;
    b.pos -= push;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BodyId, PieceKind};

    fn body(id: u32, x: f32, y: f32, radius: f32, vel: Vec2) -> Body {
        let mut body = Body::new(BodyId(id), PieceKind(0), radius, Vec2::new(x, y));
        body.vel = vel;
        body
    }

    #[test]
    fn test_contact_miss_and_touch() {
        assert!(circle_contact(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0).is_none());

        let contact = circle_contact(Vec2::ZERO, 10.0, Vec2::new(15.0, 0.0), 10.0).unwrap();
        assert!((contact.overlap - 5.0).abs() < 1e-6);
        assert_eq!(contact.normal, Some(Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn test_coincident_centers_have_no_normal() {
        let contact = circle_contact(Vec2::new(5.0, 5.0), 10.0, Vec2::new(5.0, 5.0), 10.0).unwrap();
        assert!(contact.normal.is_none());
        assert!((contact.overlap - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_resolve_skips_coincident_pair() {
        let mut a = body(1, 50.0, 50.0, 10.0, Vec2::new(1.0, 2.0));
        let mut b = body(2, 50.0, 50.0, 10.0, Vec2::new(-3.0, 4.0));
        let contact = circle_contact(a.pos, a.radius(), b.pos, b.radius()).unwrap();
        resolve_pair(&mut a, &mut b, &contact, 0.5);

        assert_eq!(a.pos, Vec2::new(50.0, 50.0));
        assert_eq!(a.vel, Vec2::new(1.0, 2.0));
        assert_eq!(b.vel, Vec2::new(-3.0, 4.0));
        assert!(a.pos.is_finite() && b.pos.is_finite());
    }

    #[test]
    fn test_equal_mass_head_on() {
        // Equal radii: ratio 0.5, so v1n' = (0.5 v1n + v2n) / 1.5
        let mut a = body(1, 0.0, 0.0, 10.0, Vec2::new(6.0, 0.0));
        let mut b = body(2, 15.0, 0.0, 10.0, Vec2::new(-6.0, 0.0));
        let contact = circle_contact(a.pos, a.radius(), b.pos, b.radius()).unwrap();
        resolve_pair(&mut a, &mut b, &contact, 0.5);

        // normal points from b to a (-x); v1n = -6, v2n = 6
        // v1n' = (-3 + 6) / 1.5 = 2 -> *0.5 = 1 along -x
        assert!((a.vel.x + 1.0).abs() < 1e-5);
        assert!((b.vel.x - 1.0).abs() < 1e-5);
        assert!(a.vel.y.abs() < 1e-5 && b.vel.y.abs() < 1e-5);

        // Pushed apart by overlap/2 each
        assert!((a.pos.x + 2.5).abs() < 1e-5);
        assert!((b.pos.x - 17.5).abs() < 1e-5);
    }

    #[test]
    fn test_tangential_velocity_preserved() {
        let mut a = body(1, 0.0, 0.0, 10.0, Vec2::new(0.0, 3.0));
        let mut b = body(2, 15.0, 0.0, 20.0, Vec2::new(0.0, -2.0));
        let contact = circle_contact(a.pos, a.radius(), b.pos, b.radius()).unwrap();
        resolve_pair(&mut a, &mut b, &contact, 0.5);

        // Motion is purely tangential to an x-axis normal
        assert!((a.vel.y - 3.0).abs() < 1e-5);
        assert!((b.vel.y + 2.0).abs() < 1e-5);
        assert!(a.vel.x.abs() < 1e-5 && b.vel.x.abs() < 1e-5);
    }

    #[test]
    fn test_moving_body_hands_off_momentum() {
        let mut small = body(1, 0.0, 0.0, 10.0, Vec2::new(5.0, 0.0));
        let mut big = body(2, 35.0, 0.0, 30.0, Vec2::ZERO);
        let contact = circle_contact(small.pos, small.radius(), big.pos, big.radius()).unwrap();
        resolve_pair(&mut small, &mut big, &contact, 0.5);

        assert!(small.vel.x.abs() < 1.0, "striker should nearly stop");
        assert!(big.vel.x > 0.0);
        assert!(big.vel.x < 5.0 * 0.5);
    }
}
