//! Deterministic spatial simulation
//!
//! All world logic lives here. This module must be pure and deterministic:
//! - Seeded RNG at world build only; ticks draw no randomness
//! - Stable collider order (trees first, then pumpkins by index)
//! - Clamped frame deltas, total queries with defined fallbacks
//! - No rendering or platform dependencies

pub mod collider;
pub mod collision;
pub mod heightfield;
pub mod locomotion;
pub mod noise;
pub mod state;
pub mod teleport;
pub mod tick;

pub use collider::{Collider, ColliderKind, ColliderRegistry, SpawnClearing};
pub use collision::{ResolvedMove, clamp_to_world, resolve};
pub use heightfield::{HeightField, TerrainHit};
pub use noise::NoiseField;
pub use state::{FrameInput, GraveMarker, Player, PumpkinState, SimEvent, WorldSimulation};
pub use teleport::{TeleportArc, TeleportPhase};
pub use tick::tick;
