//! Deterministic noise helpers for synthetic fields.
//!
//! No `thread_rng` and no dependency on the internals of `rand` RNGs, so
//! synthetic datasets stay stable across versions and platforms.

use crate::{normalize_longitude, LonLat, Real, Vec2, ARCSEC_PER_DEG};

/// Deterministic uniform on-sky noise in `[-max_abs_arcsec, +max_abs_arcsec]`
/// per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UniformSkyNoise {
    /// Base seed controlling the pseudo-random sequence.
    pub seed: u64,
    /// Maximum absolute per-axis noise (arcseconds on the sky).
    pub max_abs_arcsec: Real,
}

impl UniformSkyNoise {
    /// Sample a deterministic tangent-plane offset (degrees) for a
    /// `(field_idx, point_idx)` key.
    #[inline]
    pub fn sample(&self, field_idx: usize, point_idx: usize) -> Vec2 {
        let max_abs = self.max_abs_arcsec.abs() / ARCSEC_PER_DEG;
        if max_abs == 0.0 {
            return Vec2::zeros();
        }

        let key = mix_key(self.seed, field_idx, point_idx);
        let u = u64_to_unit_f64(splitmix64(key));
        let v = u64_to_unit_f64(splitmix64(key ^ 0x94D0_49BB_1331_11EB));

        // [0, 1) -> [-max_abs, +max_abs]
        Vec2::new((u - 0.5) * 2.0 * max_abs, (v - 0.5) * 2.0 * max_abs)
    }

    /// Perturb a sky position. The longitude offset is scaled by `1/cos(lat)`
    /// so both components are true angular offsets.
    pub fn apply(&self, field_idx: usize, point_idx: usize, sky: LonLat) -> LonLat {
        let d = self.sample(field_idx, point_idx);
        let cos_lat = sky.lat.to_radians().cos().max(1e-12);
        LonLat::new(
            normalize_longitude(sky.lon + d.x / cos_lat),
            (sky.lat + d.y).clamp(-90.0, 90.0),
        )
    }
}

#[inline]
fn mix_key(seed: u64, field_idx: usize, point_idx: usize) -> u64 {
    seed ^ (field_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (point_idx as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9)
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn u64_to_unit_f64(x: u64) -> Real {
    // top 53 bits -> [0, 1)
    (x >> 11) as Real * (1.0 / ((1u64 << 53) as Real))
}
