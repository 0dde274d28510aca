//! Player-versus-world collision resolution
//!
//! A proposed position is pushed out of every overlapping collider in
//! registry order, then clamped onto the playable disk. Pushes compound
//! without re-checking earlier colliders; at forest obstacle density a
//! single pass is enough. The resolver itself is pure geometry - it reports
//! which pumpkins were penetrated and leaves the state flip to the owner.

use glam::{Vec2, Vec3, Vec3Swizzles};

use super::collider::{ColliderKind, ColliderRegistry};
use crate::consts::PUSH_EPSILON;

/// Outcome of resolving a proposed move
#[derive(Debug, Clone)]
pub struct ResolvedMove {
    /// Final position, outside all colliders and inside the world disk
    pub position: Vec3,
    /// Pumpkin indices whose colliders were penetrated, in registry order
    pub pumpkin_contacts: Vec<usize>,
}

/// Push `proposed` out of every overlapping collider, then clamp it to the
/// world disk. The vertical component passes through untouched.
pub fn resolve(
    registry: &ColliderRegistry,
    proposed: Vec3,
    player_radius: f32,
    world_radius: f32,
) -> ResolvedMove {
    let mut position = proposed;
    let mut pumpkin_contacts = Vec::new();

    for collider in registry.colliders() {
        let delta = position.xz() - collider.center;
        let dist = delta.length();
        let min_dist = player_radius + collider.radius;
        if dist < min_dist {
            // Separation direction is undefined at zero distance
            let dir = if dist > 0.0 { delta / dist } else { Vec2::X };
            let push = (min_dist - dist) + PUSH_EPSILON;
            position.x += dir.x * push;
            position.z += dir.y * push;

            if let ColliderKind::Pumpkin { index } = collider.kind {
                pumpkin_contacts.push(index);
            }
        }
    }

    position = clamp_to_world(position, world_radius - player_radius);

    ResolvedMove {
        position,
        pumpkin_contacts,
    }
}

/// Project a position onto the disk of radius `limit`, preserving its angle
/// around the origin. The vertical component passes through untouched.
pub fn clamp_to_world(mut p: Vec3, limit: f32) -> Vec3 {
    let planar = p.xz().length();
    if planar > limit {
        let angle = p.z.atan2(p.x);
        p.x = angle.cos() * limit;
        p.z = angle.sin() * limit;
    }
    p
}
