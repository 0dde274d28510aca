//! Baked terrain elevation and surface queries
//!
//! The terrain is a square grid of vertex elevations baked once from three
//! noise octaves. Queries treat it as the piecewise-linear surface over the
//! grid's triangles (each cell split along its anti-diagonal): barycentric
//! heights, per-face normals, and a marched segment intersection against the
//! same surface. Everything outside the domain falls back to height 0 and a
//! straight-up normal.

use glam::{Vec3, Vec3Swizzles};

use super::noise::NoiseField;

/// First terrain crossing of a segment
#[derive(Debug, Clone, Copy)]
pub struct TerrainHit {
    /// Crossing point, snapped onto the surface
    pub point: Vec3,
    /// Unit face normal at the crossing
    pub normal: Vec3,
}

/// Square terrain patch with baked vertex elevations
#[derive(Debug, Clone)]
pub struct HeightField {
    /// Cells per side
    resolution: usize,
    /// Cell side length
    step: f32,
    /// Half the domain side
    half: f32,
    /// `(resolution + 1)²` vertex heights, row-major by z then x
    heights: Vec<f32>,
}

/// Three-octave elevation profile, before the max-height scale
#[inline]
fn terrain_octaves(noise: &NoiseField, x: f32, z: f32) -> f32 {
    noise.sample(x * 0.02, z * 0.02) * 0.6
        + noise.sample(x * 0.05, z * 0.05) * 0.25
        + noise.sample(x * 0.1, z * 0.1) * 0.1
}

impl HeightField {
    /// Bake a terrain patch from a noise field
    pub fn generate(noise: &NoiseField, world_size: f32, resolution: usize, max_height: f32) -> Self {
        // A zero-cell field is meaningless; keep at least one cell
        let resolution = resolution.max(1);
        let step = world_size / resolution as f32;
        let half = world_size * 0.5;
        let verts = resolution + 1;

        let mut heights = Vec::with_capacity(verts * verts);
        for j in 0..verts {
            let z = j as f32 * step - half;
            for i in 0..verts {
                let x = i as f32 * step - half;
                heights.push(terrain_octaves(noise, x, z) * max_height);
            }
        }

        Self {
            resolution,
            step,
            half,
            heights,
        }
    }

    /// Build from pre-baked vertex heights (row-major by z then x).
    ///
    /// Expects `(resolution + 1)²` values; shorter data is padded with 0,
    /// longer data is truncated.
    pub fn from_heights(world_size: f32, resolution: usize, mut heights: Vec<f32>) -> Self {
        let resolution = resolution.max(1);
        let verts = resolution + 1;
        heights.resize(verts * verts, 0.0);
        Self {
            resolution,
            step: world_size / resolution as f32,
            half: world_size * 0.5,
            heights,
        }
    }

    /// Cells per side
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Domain side length
    pub fn size(&self) -> f32 {
        self.half * 2.0
    }

    /// Terrain elevation directly below `(x, z)`; 0 outside the domain
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let Some((i, j, fx, fz)) = self.cell(x, z) else {
            return 0.0;
        };
        let h00 = self.vertex(i, j);
        let h10 = self.vertex(i + 1, j);
        let h01 = self.vertex(i, j + 1);
        let h11 = self.vertex(i + 1, j + 1);

        if fx + fz <= 1.0 {
            h00 + (h10 - h00) * fx + (h01 - h00) * fz
        } else {
            h11 + (h01 - h11) * (1.0 - fx) + (h10 - h11) * (1.0 - fz)
        }
    }

    /// Unit normal of the face under `(x, z)`; +Y outside the domain
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        let Some((i, j, fx, fz)) = self.cell(x, z) else {
            return Vec3::Y;
        };
        let h00 = self.vertex(i, j);
        let h10 = self.vertex(i + 1, j);
        let h01 = self.vertex(i, j + 1);
        let h11 = self.vertex(i + 1, j + 1);

        // The y component is the (positive) cell step, so the length is
        // never zero
        let n = if fx + fz <= 1.0 {
            Vec3::new(h00 - h10, self.step, h00 - h01)
        } else {
            Vec3::new(h01 - h11, self.step, h10 - h11)
        };
        n.normalize()
    }

    /// First crossing of the segment `a -> b` through the surface, or `None`
    /// if the segment stays strictly above it.
    ///
    /// Crossings are detected from above only: a segment that starts at or
    /// below the surface reports no intersection. The segment is marched at
    /// no coarser than half a cell step horizontally, then the bracketing
    /// interval is tightened by bisection and the hit is snapped onto the
    /// surface.
    pub fn intersect_segment(&self, a: Vec3, b: Vec3) -> Option<TerrainHit> {
        let delta = b - a;
        if delta.length_squared() == 0.0 {
            return None;
        }
        if self.elevation_above(a) <= 0.0 {
            return None;
        }

        let horizontal = delta.xz().length();
        let steps = ((horizontal / (self.step * 0.5)).ceil() as usize).clamp(1, 256);

        let mut prev_t = 0.0f32;
        for k in 1..=steps {
            let t = k as f32 / steps as f32;
            if self.elevation_above(a + delta * t) <= 0.0 {
                // Bracketed a crossing; tighten it
                let (mut lo, mut hi) = (prev_t, t);
                for _ in 0..8 {
                    let mid = 0.5 * (lo + hi);
                    if self.elevation_above(a + delta * mid) > 0.0 {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }
                let p = a + delta * hi;
                let ground = self.height_at(p.x, p.z);
                return Some(TerrainHit {
                    point: Vec3::new(p.x, ground, p.z),
                    normal: self.normal_at(p.x, p.z),
                });
            }
            prev_t = t;
        }
        None
    }

    /// Height of `p` above the surface below it
    #[inline]
    fn elevation_above(&self, p: Vec3) -> f32 {
        p.y - self.height_at(p.x, p.z)
    }

    #[inline]
    fn vertex(&self, i: usize, j: usize) -> f32 {
        self.heights[j * (self.resolution + 1) + i]
    }

    /// Containing cell and the fractional position inside it.
    ///
    /// `None` outside the domain (NaN coordinates fail the bounds check and
    /// land here too).
    fn cell(&self, x: f32, z: f32) -> Option<(usize, usize, f32, f32)> {
        if !(x >= -self.half && x <= self.half && z >= -self.half && z <= self.half) {
            return None;
        }
        let gx = (x + self.half) / self.step;
        let gz = (z + self.half) / self.step;
        let i = (gx as usize).min(self.resolution - 1);
        let j = (gz as usize).min(self.resolution - 1);
        Some((i, j, gx - i as f32, gz - j as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{TERRAIN_MAX_H, TERRAIN_RES, WORLD_SEED, WORLD_SIZE};
    use crate::slope_degrees;

    fn flat(size: f32, resolution: usize) -> HeightField {
        HeightField::from_heights(size, resolution, Vec::new())
    }

    /// Plane `y = slope * x` over a 5x5 vertex grid, domain [-2, 2]
    fn ramp(slope: f32) -> HeightField {
        let mut heights = Vec::with_capacity(25);
        for _j in 0..5 {
            for i in 0..5 {
                heights.push((i as f32 - 2.0) * slope);
            }
        }
        HeightField::from_heights(4.0, 4, heights)
    }

    #[test]
    fn test_vertex_height_matches_octave_sum() {
        // The origin is a grid vertex at even resolutions, so the
        // interpolation must return the baked value bit-exactly
        let noise = NoiseField::new(WORLD_SEED);
        let field = HeightField::generate(&noise, WORLD_SIZE, TERRAIN_RES, TERRAIN_MAX_H);

        let direct = |x: f32, z: f32| {
            (noise.sample(x * 0.02, z * 0.02) * 0.6
                + noise.sample(x * 0.05, z * 0.05) * 0.25
                + noise.sample(x * 0.1, z * 0.1) * 0.1)
                * TERRAIN_MAX_H
        };

        assert_eq!(field.height_at(0.0, 0.0), direct(0.0, 0.0));
        // 65 = 64 * step, another exact vertex
        assert_eq!(field.height_at(65.0, -65.0), direct(65.0, -65.0));
    }

    #[test]
    fn test_generate_deterministic() {
        let a = HeightField::generate(&NoiseField::new(9), 100.0, 64, 2.0);
        let b = HeightField::generate(&NoiseField::new(9), 100.0, 64, 2.0);
        for i in 0..100 {
            let x = i as f32 * 0.97 - 48.0;
            let z = i as f32 * 0.41 - 20.0;
            assert_eq!(a.height_at(x, z), b.height_at(x, z));
            assert_eq!(a.normal_at(x, z), b.normal_at(x, z));
        }
    }

    #[test]
    fn test_outside_domain_fallbacks() {
        let noise = NoiseField::new(WORLD_SEED);
        let field = HeightField::generate(&noise, WORLD_SIZE, TERRAIN_RES, TERRAIN_MAX_H);
        assert_eq!(field.height_at(1000.0, 0.0), 0.0);
        assert_eq!(field.height_at(0.0, -131.0), 0.0);
        assert_eq!(field.normal_at(1000.0, 0.0), Vec3::Y);
        assert_eq!(field.height_at(f32::NAN, 0.0), 0.0);
        assert_eq!(field.normal_at(f32::NAN, f32::NAN), Vec3::Y);
    }

    #[test]
    fn test_height_continuous_across_cells() {
        let noise = NoiseField::new(WORLD_SEED);
        let field = HeightField::generate(&noise, WORLD_SIZE, TERRAIN_RES, TERRAIN_MAX_H);
        let mut prev = field.height_at(-20.0, 7.3);
        for k in 1..400 {
            let x = -20.0 + k as f32 * 0.1;
            let h = field.height_at(x, 7.3);
            assert!((h - prev).abs() < 0.5, "height jump at x={x}");
            prev = h;
        }
    }

    #[test]
    fn test_normals_unit_and_upward() {
        let noise = NoiseField::new(WORLD_SEED);
        let field = HeightField::generate(&noise, WORLD_SIZE, TERRAIN_RES, TERRAIN_MAX_H);
        for k in 0..100 {
            let x = k as f32 * 2.3 - 110.0;
            let z = k as f32 * 1.7 - 80.0;
            let n = field.normal_at(x, z);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.y > 0.0);
        }
    }

    #[test]
    fn test_flat_field_queries() {
        let field = flat(10.0, 10);
        assert_eq!(field.height_at(1.2, -3.4), 0.0);
        assert_eq!(field.normal_at(1.2, -3.4), Vec3::Y);

        let hit = field
            .intersect_segment(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0))
            .unwrap();
        assert_eq!(hit.point, Vec3::ZERO);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_segment_above_surface_misses() {
        let field = flat(10.0, 10);
        let hit = field.intersect_segment(Vec3::new(-4.0, 1.0, 0.0), Vec3::new(4.0, 0.5, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_degenerate_segment_misses() {
        let field = flat(10.0, 10);
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(field.intersect_segment(p, p).is_none());
    }

    #[test]
    fn test_segment_starting_below_misses() {
        let field = flat(10.0, 10);
        let hit = field.intersect_segment(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, -5.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_ramp_height_and_slope() {
        let field = ramp(1.0);
        // Barycentric interpolation reproduces a plane exactly
        assert!((field.height_at(0.5, 0.3) - 0.5).abs() < 1e-6);
        assert!((field.height_at(-1.25, 1.0) - (-1.25)).abs() < 1e-6);
        assert!((slope_degrees(field.normal_at(0.5, 0.3)) - 45.0).abs() < 1e-3);

        let steep = ramp(2.0);
        assert!(slope_degrees(steep.normal_at(0.5, 0.3)) > 60.0);
    }

    #[test]
    fn test_ramp_intersection_point() {
        let field = ramp(1.0);
        let hit = field
            .intersect_segment(Vec3::new(0.5, 3.0, 0.0), Vec3::new(0.5, -3.0, 0.0))
            .unwrap();
        assert!((hit.point.x - 0.5).abs() < 1e-4);
        assert!((hit.point.y - 0.5).abs() < 1e-3);
        assert!((slope_degrees(hit.normal) - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_short_height_data_pads_with_zero() {
        let field = HeightField::from_heights(4.0, 4, vec![1.0]);
        // Vertex (0,0) kept, everything else padded flat
        assert_eq!(field.height_at(-2.0, -2.0), 1.0);
        assert_eq!(field.height_at(2.0, 2.0), 0.0);
    }
}
