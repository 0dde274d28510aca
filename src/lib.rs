//! Nightgrove - spatial simulation core for a VR night-forest walkthrough
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, collisions, locomotion, teleport)
//! - `config`: World generation and tuning parameters
//!
//! The crate owns all spatial state and math; rendering, audio, and XR session
//! plumbing live in the host and talk to the simulation through `FrameInput`,
//! the per-frame `tick`, and read accessors on `WorldSimulation`.

pub mod config;
pub mod sim;

pub use config::WorldConfig;
pub use sim::{FrameInput, SimEvent, WorldSimulation, tick};

use glam::Vec3;

/// World generation and movement constants
pub mod consts {
    /// Terrain side length (meters)
    pub const WORLD_SIZE: f32 = 260.0;
    /// Terrain grid cells per side
    pub const TERRAIN_RES: usize = 256;
    /// Elevation scale applied to the octave sum
    pub const TERRAIN_MAX_H: f32 = 2.6;
    /// Margin between the terrain edge and the playable disk
    pub const WORLD_EDGE_MARGIN: f32 = 1.0;
    /// Playable disk radius
    pub const WORLD_RADIUS: f32 = WORLD_SIZE * 0.5 - WORLD_EDGE_MARGIN;
    /// Default noise/placement seed
    pub const WORLD_SEED: u32 = 2025;

    /// Tree colliders scattered over the terrain
    pub const TREE_COUNT: usize = 520;
    /// Pumpkin colliders (and grave markers) placed on rings
    pub const PUMPKIN_COUNT: usize = 56;
    /// Base tree collider radius, scaled per tree
    pub const TREE_RADIUS: f32 = 0.6;
    /// Per-tree scale range
    pub const TREE_SCALE_MIN: f32 = 0.8;
    pub const TREE_SCALE_MAX: f32 = 2.6;
    /// Pumpkin collider radius
    pub const PUMPKIN_RADIUS: f32 = 0.45;
    /// Pumpkin anchor height above the terrain
    pub const PUMPKIN_RAISE: f32 = 0.4;
    /// Pumpkin ring start radius and band width
    pub const PUMPKIN_RING_INNER: f32 = 10.0;
    pub const PUMPKIN_AREA: f32 = 80.0;

    /// Candle flicker: base level, sine rate/amplitude, jitter amplitude,
    /// and the clamp range of the final intensity
    pub const CANDLE_BASE: f32 = 1.1;
    pub const CANDLE_RATE: f32 = 5.4;
    pub const CANDLE_WAVE: f32 = 0.38;
    pub const CANDLE_JITTER: f32 = 0.18;
    pub const CANDLE_MIN: f32 = 0.9;
    pub const CANDLE_MAX: f32 = 2.0;
    /// Per-pumpkin flicker phase range, drawn once at build
    pub const FLICKER_PHASE_MAX: f32 = 1000.0;

    /// Grave scatter ring and pose spreads
    pub const GRAVE_RING_INNER: f32 = 15.0;
    pub const GRAVE_AREA: f32 = 60.0;
    pub const GRAVE_ANGLE_JITTER: f32 = 0.5;
    pub const GRAVE_YAW_SPREAD: f32 = 0.8;
    pub const GRAVE_TILT_SPREAD: f32 = 0.1;
    pub const GRAVE_SCALE_MIN: f32 = 0.9;
    pub const GRAVE_SCALE_SPREAD: f32 = 0.3;

    /// Player capsule radius
    pub const PLAYER_RADIUS: f32 = 0.35;
    /// Viewpoint height above the terrain surface
    pub const EYE_HEIGHT: f32 = 1.6;
    /// Player spawn (x, z); y is terrain-locked
    pub const SPAWN_X: f32 = 0.0;
    pub const SPAWN_Z: f32 = 3.0;
    /// Obstacle-free disk radius around the spawn
    pub const SPAWN_CLEAR_RADIUS: f32 = 6.0;
    /// Rejected candidates respawn on a ring this far past the clearing
    pub const CLEARING_RING_PAD: f32 = 2.0;
    /// Width of the respawn ring band
    pub const CLEARING_RING_EXTENT: f32 = 20.0;

    /// Smooth locomotion speeds (m/s)
    pub const WALK_SPEED: f32 = 5.5;
    pub const STRAFE_SPEED: f32 = 4.8;
    /// Per-axis analog stick dead zone
    pub const STICK_DEAD_ZONE: f32 = 0.12;
    /// Frame delta clamp (seconds) to bound integration error after stalls
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Maximum teleport arc samples per aim frame
    pub const ARC_STEPS: usize = 40;
    /// Initial arc speed (m/s) along the aim direction
    pub const ARC_SPEED: f32 = 7.5;
    /// Downward arc acceleration (m/s²)
    pub const ARC_GRAVITY: f32 = 9.8;
    /// Fixed arc integration sub-step (seconds)
    pub const ARC_SUBSTEP: f32 = 1.0 / 60.0;
    /// Steepest terrain a teleport may land on
    pub const MAX_SLOPE_DEG: f32 = 45.0;

    /// Extra separation applied after a collider push to defeat rounding
    pub const PUSH_EPSILON: f32 = 1e-3;
}

/// Horizontal forward vector for a camera yaw (scene convention: -Z at yaw 0)
#[inline]
pub fn horizontal_forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Slope of a surface normal in degrees from vertical
#[inline]
pub fn slope_degrees(normal: Vec3) -> f32 {
    normal.dot(Vec3::Y).clamp(-1.0, 1.0).acos().to_degrees()
}
