//! Circular obstacles and their placement
//!
//! Trees and pumpkins share one collider shape (a disk in the horizontal
//! plane); the kind tag is what routes touch events later. Placement rejects
//! candidates inside the spawn clearing and resamples them onto a ring just
//! outside it, so the player never starts wedged in an obstacle.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{CLEARING_RING_EXTENT, CLEARING_RING_PAD};

/// What a collider belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColliderKind {
    Tree,
    /// Index into the world's pumpkin state list
    Pumpkin { index: usize },
}

/// A circular obstacle in the horizontal plane
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    /// Center on the (x, z) plane
    pub center: Vec2,
    pub radius: f32,
    pub kind: ColliderKind,
}

/// Obstacle-free disk around the player spawn
#[derive(Debug, Clone, Copy)]
pub struct SpawnClearing {
    pub center: Vec2,
    pub radius: f32,
}

impl SpawnClearing {
    pub fn contains(&self, p: Vec2) -> bool {
        (p - self.center).length() < self.radius
    }

    /// Replacement position on a ring just outside the clearing
    pub fn resample(&self, rng: &mut Pcg32) -> Vec2 {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let r = self.radius + CLEARING_RING_PAD + rng.random_range(0.0..CLEARING_RING_EXTENT);
        self.center + Vec2::new(angle.cos(), angle.sin()) * r
    }
}

/// Append-only set of world colliders
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColliderRegistry {
    colliders: Vec<Collider>,
}

impl ColliderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All colliders in placement order (trees first, then pumpkins)
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Place `count` colliders: draw a candidate position from `sample`,
    /// bounce it off the spawn clearing if needed, then let `build` shape
    /// the collider.
    pub fn place<S, B>(
        &mut self,
        rng: &mut Pcg32,
        count: usize,
        clearing: &SpawnClearing,
        mut sample: S,
        mut build: B,
    ) where
        S: FnMut(&mut Pcg32, usize) -> Vec2,
        B: FnMut(&mut Pcg32, usize, Vec2) -> Collider,
    {
        for index in 0..count {
            let mut at = sample(rng, index);
            if clearing.contains(at) {
                at = clearing.resample(rng);
            }
            self.colliders.push(build(rng, index, at));
        }
    }
}
