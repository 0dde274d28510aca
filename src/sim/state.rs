//! World state and core simulation types
//!
//! Everything the simulation owns lives here: the baked terrain, the collider
//! registry, per-pumpkin and grave state, the teleport arc, and the player.
//! The world is built once from a seeded config and mutated only by ticks.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collider::{Collider, ColliderKind, ColliderRegistry, SpawnClearing};
use super::heightfield::HeightField;
use super::noise::NoiseField;
use super::teleport::TeleportArc;
use crate::config::WorldConfig;
use crate::consts::*;

/// The player's viewpoint body
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    /// Eye position; y is terrain-locked
    pub position: Vec3,
    pub radius: f32,
}

/// Per-pumpkin simulation state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PumpkinState {
    /// Presentation anchor: collider center at terrain height plus the raise
    pub anchor: Vec3,
    /// Flicker phase offset, drawn once at build
    pub phase: f32,
    /// Candle intensity, recomputed every frame
    pub candle: f32,
    /// Flips once on first player contact
    pub touched: bool,
}

/// Decorative grave pose; no collider
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GraveMarker {
    pub position: Vec3,
    pub yaw: f32,
    pub tilt: f32,
    pub scale: f32,
}

/// Notifications returned from a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A pumpkin was touched for the first time
    PumpkinTouched { index: usize },
}

/// Per-frame input sampled by the host
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Raw left-stick axes; the core applies the dead zone
    pub stick: Vec2,
    /// Camera yaw in radians (forward is -Z at yaw 0)
    pub camera_yaw: f32,
    /// Teleport controller aim pose
    pub aim_origin: Vec3,
    pub aim_dir: Vec3,
    /// Teleport trigger held this frame
    pub teleport_held: bool,
}

/// The simulated world: baked terrain, obstacles, entities, player
#[derive(Debug, Clone)]
pub struct WorldSimulation {
    pub config: WorldConfig,
    pub player: Player,
    pub(crate) heightfield: HeightField,
    pub(crate) colliders: ColliderRegistry,
    pub(crate) pumpkins: Vec<PumpkinState>,
    pub(crate) graves: Vec<GraveMarker>,
    pub(crate) teleport: TeleportArc,
    /// Simulation clock in seconds, dt-clamped
    pub(crate) time: f32,
    /// Frames ticked since build
    pub(crate) frame: u64,
    /// Pumpkins touched so far; each counts once
    touched_count: u32,
}

impl WorldSimulation {
    /// Build a world from the config: bake the terrain, scatter trees and
    /// pumpkins around the spawn clearing, bake pumpkin and grave state, and
    /// spawn the player terrain-locked. Deterministic per seed.
    pub fn new(config: WorldConfig) -> Self {
        let noise = NoiseField::new(config.seed);
        let heightfield = HeightField::generate(
            &noise,
            config.world_size,
            config.terrain_resolution,
            config.terrain_max_height,
        );

        let mut rng = Pcg32::seed_from_u64(config.seed as u64);
        let clearing = SpawnClearing {
            center: Vec2::new(SPAWN_X, SPAWN_Z),
            radius: config.spawn_clearing_radius,
        };

        let world_size = config.world_size;
        let tree_radius = config.tree_radius;
        let pumpkin_radius = config.pumpkin_radius;
        let pumpkin_area = config.pumpkin_area;
        let ring_count = config.pumpkin_count as f32;

        let mut colliders = ColliderRegistry::new();
        colliders.place(
            &mut rng,
            config.tree_count,
            &clearing,
            |rng, _| {
                Vec2::new(
                    (rng.random::<f32>() - 0.5) * world_size,
                    (rng.random::<f32>() - 0.5) * world_size,
                )
            },
            |rng, _, at| Collider {
                center: at,
                radius: tree_radius
                    * (TREE_SCALE_MIN + rng.random::<f32>() * (TREE_SCALE_MAX - TREE_SCALE_MIN)),
                kind: ColliderKind::Tree,
            },
        );
        colliders.place(
            &mut rng,
            config.pumpkin_count,
            &clearing,
            |rng, index| {
                let angle = index as f32 / ring_count * TAU;
                let r = PUMPKIN_RING_INNER + rng.random::<f32>() * pumpkin_area;
                Vec2::new(angle.cos(), angle.sin()) * r
            },
            |_, index, at| Collider {
                center: at,
                radius: pumpkin_radius,
                kind: ColliderKind::Pumpkin { index },
            },
        );

        // Pumpkins sit in the registry after all trees, ordered by index
        let mut pumpkins = Vec::with_capacity(config.pumpkin_count);
        for collider in colliders.colliders() {
            if let ColliderKind::Pumpkin { .. } = collider.kind {
                let (x, z) = (collider.center.x, collider.center.y);
                pumpkins.push(PumpkinState {
                    anchor: Vec3::new(x, heightfield.height_at(x, z) + PUMPKIN_RAISE, z),
                    phase: rng.random::<f32>() * FLICKER_PHASE_MAX,
                    candle: CANDLE_BASE,
                    touched: false,
                });
            }
        }

        let mut graves = Vec::with_capacity(config.pumpkin_count);
        for i in 0..config.pumpkin_count {
            let angle = i as f32 / ring_count * TAU + rng.random::<f32>() * GRAVE_ANGLE_JITTER;
            let r = GRAVE_RING_INNER + rng.random::<f32>() * GRAVE_AREA;
            let (x, z) = (angle.cos() * r, angle.sin() * r);
            graves.push(GraveMarker {
                position: Vec3::new(x, heightfield.height_at(x, z), z),
                yaw: (rng.random::<f32>() - 0.5) * GRAVE_YAW_SPREAD,
                tilt: (rng.random::<f32>() - 0.5) * GRAVE_TILT_SPREAD,
                scale: GRAVE_SCALE_MIN + rng.random::<f32>() * GRAVE_SCALE_SPREAD,
            });
        }

        let player = Player {
            position: Vec3::new(
                SPAWN_X,
                heightfield.height_at(SPAWN_X, SPAWN_Z) + EYE_HEIGHT,
                SPAWN_Z,
            ),
            radius: config.player_radius,
        };

        log::info!(
            "world built: seed {}, {} trees, {} pumpkins, {} graves",
            config.seed,
            config.tree_count,
            pumpkins.len(),
            graves.len()
        );

        Self {
            config,
            player,
            heightfield,
            colliders,
            pumpkins,
            graves,
            teleport: TeleportArc::new(),
            time: 0.0,
            frame: 0,
            touched_count: 0,
        }
    }

    /// Baked terrain surface
    pub fn heightfield(&self) -> &HeightField {
        &self.heightfield
    }

    /// World colliders in placement order (trees first, then pumpkins)
    pub fn colliders(&self) -> &ColliderRegistry {
        &self.colliders
    }

    pub fn pumpkins(&self) -> &[PumpkinState] {
        &self.pumpkins
    }

    pub fn graves(&self) -> &[GraveMarker] {
        &self.graves
    }

    /// Current teleport arc (phase, samples, landing, validity)
    pub fn arc(&self) -> &TeleportArc {
        &self.teleport
    }

    /// Pumpkins touched so far
    pub fn touched_count(&self) -> u32 {
        self.touched_count
    }

    /// Simulation clock in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Flip `touched` for each contacted pumpkin and emit an event for every
    /// first-time touch. Repeat contacts and out-of-range indices are ignored.
    pub(crate) fn apply_touches(&mut self, contacts: &[usize], events: &mut Vec<SimEvent>) {
        for &index in contacts {
            let Some(pumpkin) = self.pumpkins.get_mut(index) else {
                continue;
            };
            if !pumpkin.touched {
                pumpkin.touched = true;
                self.touched_count += 1;
                log::debug!("pumpkin {index} touched ({} total)", self.touched_count);
                events.push(SimEvent::PumpkinTouched { index });
            }
        }
    }

    /// Recompute every candle intensity for the current clock and frame
    pub(crate) fn update_candles(&mut self) {
        let (time, frame) = (self.time, self.frame);
        for (i, pumpkin) in self.pumpkins.iter_mut().enumerate() {
            let jitter = flicker_jitter(frame, i);
            pumpkin.candle = (CANDLE_BASE
                + (time * CANDLE_RATE + pumpkin.phase).sin() * CANDLE_WAVE
                + jitter * CANDLE_JITTER)
                .clamp(CANDLE_MIN, CANDLE_MAX);
        }
    }
}

/// Per-frame flicker jitter in [-0.5, 0.5), hashed from (frame, index) so
/// replays stay deterministic without drawing from the world RNG
#[inline]
fn flicker_jitter(frame: u64, index: usize) -> f32 {
    let h = (frame as u32)
        .wrapping_mul(2654435761)
        .wrapping_add((index as u32).wrapping_mul(7919));
    (h % 1000) as f32 / 1000.0 - 0.5
}
