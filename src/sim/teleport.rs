//! Ballistic teleport aiming and commit
//!
//! While the trigger is held, the arc is re-integrated every frame from the
//! controller pose: fixed initial speed along the aim direction, constant
//! gravity, semi-implicit Euler at a fixed sub-step. The first terrain
//! crossing becomes the candidate landing; it is valid only on gentle enough
//! ground inside the world disk. Releasing the trigger commits a valid
//! landing (clamped and terrain-locked) or does nothing.

use glam::{Vec3, Vec3Swizzles};

use super::collision::clamp_to_world;
use super::heightfield::{HeightField, TerrainHit};
use crate::config::WorldConfig;
use crate::consts::{ARC_SUBSTEP, EYE_HEIGHT};
use crate::slope_degrees;

/// Trigger-driven aim state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeleportPhase {
    #[default]
    Idle,
    Aiming,
}

/// The teleport arc and its current landing candidate
#[derive(Debug, Clone, Default)]
pub struct TeleportArc {
    phase: TeleportPhase,
    /// Trajectory samples, at most the configured step budget
    samples: Vec<Vec3>,
    landing: Option<TerrainHit>,
    valid: bool,
}

impl TeleportArc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TeleportPhase {
        self.phase
    }

    pub fn is_aiming(&self) -> bool {
        self.phase == TeleportPhase::Aiming
    }

    /// Trajectory samples from the last aim update (for line rendering)
    pub fn samples(&self) -> &[Vec3] {
        &self.samples
    }

    /// Candidate landing from the last aim update, if the arc hit terrain
    pub fn landing(&self) -> Option<&TerrainHit> {
        self.landing.as_ref()
    }

    /// Whether the current landing may be committed (drives arc recoloring)
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Trigger pressed: start aiming
    pub fn begin_aim(&mut self) {
        self.phase = TeleportPhase::Aiming;
        self.clear();
    }

    /// Recompute the trajectory from the controller pose. Stale samples are
    /// always fully overwritten. No-op unless aiming.
    pub fn update_aim(
        &mut self,
        terrain: &HeightField,
        origin: Vec3,
        dir: Vec3,
        config: &WorldConfig,
    ) {
        if self.phase != TeleportPhase::Aiming {
            return;
        }
        self.clear();

        let dir = dir.normalize_or_zero();
        if dir == Vec3::ZERO {
            // Degenerate aim: no trajectory, nothing to land on
            return;
        }

        let mut position = origin;
        let mut velocity = dir * config.arc_speed;
        let gravity = Vec3::new(0.0, -config.arc_gravity, 0.0);

        for _ in 0..config.arc_steps {
            self.samples.push(position);
            velocity += gravity * ARC_SUBSTEP;
            let next = position + velocity * ARC_SUBSTEP;
            if let Some(hit) = terrain.intersect_segment(position, next) {
                self.valid = landing_is_valid(&hit, config);
                self.landing = Some(hit);
                break;
            }
            position = next;
        }
        // Budget exhausted without a hit: full arc, no landing, invalid
    }

    /// Trigger released: commit a valid landing, then return to idle.
    ///
    /// The committed position is the landing clamped onto the playable disk
    /// and terrain-locked at eye height. An invalid or absent landing makes
    /// release a no-op.
    pub fn release(
        &mut self,
        terrain: &HeightField,
        player_radius: f32,
        config: &WorldConfig,
    ) -> Option<Vec3> {
        let committed = if self.phase == TeleportPhase::Aiming && self.valid {
            self.landing.map(|hit| {
                let clamped = clamp_to_world(hit.point, config.world_radius() - player_radius);
                Vec3::new(
                    clamped.x,
                    terrain.height_at(clamped.x, clamped.z) + EYE_HEIGHT,
                    clamped.z,
                )
            })
        } else {
            None
        };
        self.phase = TeleportPhase::Idle;
        self.clear();
        committed
    }

    fn clear(&mut self) {
        self.samples.clear();
        self.landing = None;
        self.valid = false;
    }
}

/// Gentle enough ground, inside the world disk
fn landing_is_valid(hit: &TerrainHit, config: &WorldConfig) -> bool {
    slope_degrees(hit.normal) <= config.max_slope_deg
        && hit.point.xz().length() <= config.world_radius()
}
