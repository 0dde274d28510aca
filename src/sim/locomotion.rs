//! Stick-driven smooth locomotion
//!
//! Per-frame analog input becomes a proposed horizontal move in the camera's
//! reference frame. The vertical component is always terrain-locked (the
//! player is a viewpoint glued to the ground, not a falling body), and the
//! horizontal component goes through collision resolution before it commits.

use glam::{Vec2, Vec3};

use super::collider::ColliderRegistry;
use super::collision;
use super::heightfield::HeightField;
use super::state::Player;
use crate::config::WorldConfig;
use crate::consts::{EYE_HEIGHT, STICK_DEAD_ZONE};
use crate::horizontal_forward;

/// Dead-zone filter for one analog axis; non-finite input reads as centered
#[inline]
pub fn filter_axis(value: f32) -> f32 {
    if !value.is_finite() || value.abs() < STICK_DEAD_ZONE {
        0.0
    } else {
        value
    }
}

/// Horizontal forward/right basis for a camera yaw
#[inline]
pub fn movement_basis(yaw: f32) -> (Vec3, Vec3) {
    let forward = horizontal_forward(yaw);
    let right = forward.cross(Vec3::Y);
    (forward, right)
}

/// Advance the player by one frame of stick input.
///
/// Returns the pumpkin contacts reported by the resolver so the owner can
/// apply touch state.
pub fn step(
    terrain: &HeightField,
    registry: &ColliderRegistry,
    player: &mut Player,
    stick: Vec2,
    camera_yaw: f32,
    dt: f32,
    config: &WorldConfig,
) -> Vec<usize> {
    let x = filter_axis(stick.x);
    let y = filter_axis(stick.y);
    if x == 0.0 && y == 0.0 {
        return Vec::new();
    }

    let yaw = if camera_yaw.is_finite() { camera_yaw } else { 0.0 };
    let (forward, right) = movement_basis(yaw);

    // Stick-forward is negative y on VR thumbsticks
    let mut proposed = player.position
        + forward * (-y * config.walk_speed * dt)
        + right * (x * config.strafe_speed * dt);
    proposed.y = terrain.height_at(proposed.x, proposed.z) + EYE_HEIGHT;

    let resolved = collision::resolve(registry, proposed, player.radius, config.world_radius());

    let mut position = resolved.position;
    // Re-snap after pushes so the terrain lock holds at the final spot
    position.y = terrain.height_at(position.x, position.z) + EYE_HEIGHT;
    player.position = position;

    resolved.pumpkin_contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_RADIUS;
    use crate::sim::collider::{Collider, ColliderKind, SpawnClearing};
    use glam::Vec3Swizzles;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::FRAC_PI_2;

    fn flat_world() -> (HeightField, ColliderRegistry) {
        (
            HeightField::from_heights(40.0, 40, Vec::new()),
            ColliderRegistry::new(),
        )
    }

    fn player_at_origin() -> Player {
        Player {
            position: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            radius: PLAYER_RADIUS,
        }
    }

    #[test]
    fn test_filter_axis_dead_zone() {
        assert_eq!(filter_axis(0.0), 0.0);
        assert_eq!(filter_axis(0.119), 0.0);
        assert_eq!(filter_axis(-0.119), 0.0);
        assert_eq!(filter_axis(0.12), 0.12);
        assert_eq!(filter_axis(-0.8), -0.8);
        assert_eq!(filter_axis(f32::NAN), 0.0);
        assert_eq!(filter_axis(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_movement_basis() {
        let (forward, right) = movement_basis(0.0);
        assert!((forward - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
        assert!((right - Vec3::X).length() < 1e-6);

        // Quarter turn left: forward swings to -x
        let (forward, _) = movement_basis(FRAC_PI_2);
        assert!((forward - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_no_input_is_a_no_op() {
        let (terrain, registry) = flat_world();
        let mut player = player_at_origin();
        let before = player.position;
        let contacts = step(
            &terrain,
            &registry,
            &mut player,
            Vec2::new(0.05, -0.1),
            0.3,
            0.016,
            &WorldConfig::default(),
        );
        assert_eq!(player.position, before);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_walk_forward_speed() {
        let (terrain, registry) = flat_world();
        let mut player = player_at_origin();
        let config = WorldConfig::default();
        // Stick pushed fully forward at yaw 0 moves along -z at walk speed
        step(
            &terrain,
            &registry,
            &mut player,
            Vec2::new(0.0, -1.0),
            0.0,
            0.1,
            &config,
        );
        assert!((player.position.z - (-config.walk_speed * 0.1)).abs() < 1e-5);
        assert!(player.position.x.abs() < 1e-6);
        assert_eq!(player.position.y, EYE_HEIGHT);
    }

    #[test]
    fn test_strafe_speed() {
        let (terrain, registry) = flat_world();
        let mut player = player_at_origin();
        let config = WorldConfig::default();
        step(
            &terrain,
            &registry,
            &mut player,
            Vec2::new(1.0, 0.0),
            0.0,
            0.1,
            &config,
        );
        assert!((player.position.x - config.strafe_speed * 0.1).abs() < 1e-5);
        assert!(player.position.z.abs() < 1e-6);
    }

    #[test]
    fn test_terrain_lock_on_slope() {
        // Plane y = 0.5 * x over [-10, 10]
        let mut heights = Vec::new();
        for _j in 0..21 {
            for i in 0..21 {
                heights.push((i as f32 - 10.0) * 0.5);
            }
        }
        let terrain = HeightField::from_heights(20.0, 20, heights);
        let registry = ColliderRegistry::new();
        let mut player = player_at_origin();
        let config = WorldConfig::default();

        step(
            &terrain,
            &registry,
            &mut player,
            Vec2::new(1.0, 0.0),
            0.0,
            0.5,
            &config,
        );
        let expected = terrain.height_at(player.position.x, player.position.z) + EYE_HEIGHT;
        assert_eq!(player.position.y, expected);
        assert!(player.position.y > EYE_HEIGHT, "walked uphill");
    }

    #[test]
    fn test_blocked_by_tree() {
        let (terrain, _) = flat_world();
        let mut registry = ColliderRegistry::new();
        let mut rng = Pcg32::seed_from_u64(0);
        let clearing = SpawnClearing {
            center: Vec2::new(500.0, 500.0),
            radius: 0.1,
        };
        registry.place(
            &mut rng,
            1,
            &clearing,
            |_, _| Vec2::new(0.0, -0.5),
            |_, _, at| Collider {
                center: at,
                radius: 0.6,
                kind: ColliderKind::Tree,
            },
        );

        let mut player = player_at_origin();
        let config = WorldConfig::default();
        step(
            &terrain,
            &registry,
            &mut player,
            Vec2::new(0.0, -1.0),
            0.0,
            0.05,
            &config,
        );
        let dist = (player.position.xz() - Vec2::new(0.0, -0.5)).length();
        assert!(dist >= PLAYER_RADIUS + 0.6, "stopped at the trunk");
    }

    #[test]
    fn test_contained_at_world_edge() {
        let terrain = HeightField::from_heights(300.0, 64, Vec::new());
        let registry = ColliderRegistry::new();
        let config = WorldConfig::default();
        let mut player = Player {
            position: Vec3::new(config.movement_limit() - 0.01, EYE_HEIGHT, 0.0),
            radius: config.player_radius,
        };
        // Strafe outward for a while; the disk boundary must hold
        for _ in 0..100 {
            step(
                &terrain,
                &registry,
                &mut player,
                Vec2::new(1.0, 0.0),
                0.0,
                0.05,
                &config,
            );
        }
        assert!(player.position.xz().length() <= config.movement_limit() + 1e-3);
    }
}
