//! World generation and tuning parameters
//!
//! The whole world is a pure function of this struct: same config, same
//! forest. Defaults come from `consts`; hosts that persist a config can
//! round-trip it through serde.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Everything the simulation needs to build and run a world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Seed for the noise permutation and the placement RNG
    pub seed: u32,

    // === Terrain ===
    /// Terrain side length (meters)
    pub world_size: f32,
    /// Terrain grid cells per side
    pub terrain_resolution: usize,
    /// Elevation scale applied to the octave sum
    pub terrain_max_height: f32,

    // === Scatter ===
    pub tree_count: usize,
    pub pumpkin_count: usize,
    /// Base tree collider radius (scaled per tree)
    pub tree_radius: f32,
    pub pumpkin_radius: f32,
    /// Width of the pumpkin ring band past `PUMPKIN_RING_INNER`
    pub pumpkin_area: f32,
    /// Obstacle-free disk radius around the spawn
    pub spawn_clearing_radius: f32,

    // === Player ===
    pub player_radius: f32,
    /// Smooth locomotion speeds (m/s)
    pub walk_speed: f32,
    pub strafe_speed: f32,

    // === Teleport ===
    pub arc_steps: usize,
    pub arc_speed: f32,
    pub arc_gravity: f32,
    /// Steepest terrain a teleport may land on (degrees)
    pub max_slope_deg: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: WORLD_SEED,
            world_size: WORLD_SIZE,
            terrain_resolution: TERRAIN_RES,
            terrain_max_height: TERRAIN_MAX_H,
            tree_count: TREE_COUNT,
            pumpkin_count: PUMPKIN_COUNT,
            tree_radius: TREE_RADIUS,
            pumpkin_radius: PUMPKIN_RADIUS,
            pumpkin_area: PUMPKIN_AREA,
            spawn_clearing_radius: SPAWN_CLEAR_RADIUS,
            player_radius: PLAYER_RADIUS,
            walk_speed: WALK_SPEED,
            strafe_speed: STRAFE_SPEED,
            arc_steps: ARC_STEPS,
            arc_speed: ARC_SPEED,
            arc_gravity: ARC_GRAVITY,
            max_slope_deg: MAX_SLOPE_DEG,
        }
    }
}

impl WorldConfig {
    /// Playable disk radius
    pub fn world_radius(&self) -> f32 {
        self.world_size * 0.5 - WORLD_EDGE_MARGIN
    }

    /// How far from the origin the player's center may travel
    pub fn movement_limit(&self) -> f32 {
        self.world_radius() - self.player_radius
    }
}
