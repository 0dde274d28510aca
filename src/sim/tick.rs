//! Per-frame simulation tick
//!
//! Advances the world once per rendered frame: locomotion, pumpkin touches,
//! the teleport state machine, and candle flicker. Deterministic for a given
//! input sequence.

use super::locomotion;
use super::state::{FrameInput, SimEvent, WorldSimulation};
use super::teleport::TeleportPhase;
use crate::consts::MAX_FRAME_DT;

/// Advance the world by one frame and return this frame's events.
///
/// `dt` is clamped to `[0, MAX_FRAME_DT]` so a stalled host cannot inject a
/// runaway integration step; non-finite deltas count as 0.
pub fn tick(world: &mut WorldSimulation, input: &FrameInput, dt: f32) -> Vec<SimEvent> {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    world.frame += 1;
    world.time += dt;

    let mut events = Vec::new();

    let contacts = locomotion::step(
        &world.heightfield,
        &world.colliders,
        &mut world.player,
        input.stick,
        input.camera_yaw,
        dt,
        &world.config,
    );
    world.apply_touches(&contacts, &mut events);

    // Trigger edges drive the teleport state machine; while held, the arc is
    // recomputed every frame from the current aim pose
    match (input.teleport_held, world.teleport.phase()) {
        (true, TeleportPhase::Idle) => {
            world.teleport.begin_aim();
            world.teleport.update_aim(
                &world.heightfield,
                input.aim_origin,
                input.aim_dir,
                &world.config,
            );
        }
        (true, TeleportPhase::Aiming) => {
            world.teleport.update_aim(
                &world.heightfield,
                input.aim_origin,
                input.aim_dir,
                &world.config,
            );
        }
        (false, TeleportPhase::Aiming) => {
            if let Some(position) =
                world
                    .teleport
                    .release(&world.heightfield, world.player.radius, &world.config)
            {
                world.player.position = position;
            }
        }
        (false, TeleportPhase::Idle) => {}
    }

    world.update_candles();

    events
}
