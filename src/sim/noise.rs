//! Seeded 2D gradient noise
//!
//! Classic permutation-table noise: hash the lattice cell corners, dot a
//! gradient from a 4-direction set against the corner offsets, blend with the
//! quintic fade. The permutation is shuffled by a Park-Miller LCG so a given
//! seed always produces the same field.

/// Immutable gradient-noise field
#[derive(Debug, Clone)]
pub struct NoiseField {
    /// 256-entry permutation, doubled to avoid wrapping on `+ 1` lookups
    perm: [u8; 512],
}

impl NoiseField {
    /// Build the permutation table from an integer seed
    pub fn new(seed: u32) -> Self {
        let mut perm = [0u8; 512];
        for (i, p) in perm.iter_mut().take(256).enumerate() {
            *p = i as u8;
        }

        // Fisher-Yates driven by the minimal-standard LCG. State fits u64;
        // the quotient is taken in f64 so the swap index never exceeds i.
        let mut state = seed as u64;
        for i in (1..=255usize).rev() {
            state = state * 16807 % 2147483647;
            let n = ((state as f64 / 2147483647.0) * (i as f64 + 1.0)) as usize;
            perm.swap(i, n);
        }

        for i in 0..256 {
            perm[256 + i] = perm[i];
        }

        Self { perm }
    }

    /// Sample the field at `(x, y)`; continuous, roughly [-1, 1]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let xf = x.floor();
        let yf = y.floor();
        // Saturating casts keep far-out-of-lattice inputs defined
        let xi = (xf as i32 & 255) as usize;
        let yi = (yf as i32 & 255) as usize;
        let x = x - xf;
        let y = y - yf;

        let u = fade(x);
        let v = fade(y);

        let a = self.perm[xi] as usize + yi;
        let b = self.perm[xi + 1] as usize + yi;

        lerp(
            lerp(grad(self.perm[a], x, y), grad(self.perm[b], x - 1.0, y), u),
            lerp(
                grad(self.perm[a + 1], x, y - 1.0),
                grad(self.perm[b + 1], x - 1.0, y - 1.0),
                u,
            ),
            v,
        )
    }
}

/// Quintic fade t³(t(6t-15)+10)
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Gradient from the 4-direction set, keyed by the low 2 bits of the hash
#[inline]
fn grad(hash: u8, x: f32, y: f32) -> f32 {
    match hash & 3 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        _ => -x - y,
    }
}
