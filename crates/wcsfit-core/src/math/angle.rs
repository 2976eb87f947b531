//! Angle helpers for longitudes and angular differences in degrees.
//!
//! Longitudes wrap at 360°. Differences between two longitudes must be taken
//! modulo 360 and reduced to the representative nearest zero, otherwise a
//! residual between 359.9° and 0.1° would read as 359.8° instead of 0.2°.

use crate::Real;

/// Reduce an angular difference to the representative in `(-180, 180]`.
///
/// # Example
/// ```
/// use wcsfit_core::math::wrap_degrees;
///
/// assert!((wrap_degrees(359.5) - (-0.5)).abs() < 1e-12);
/// assert!((wrap_degrees(-190.0) - 170.0).abs() < 1e-12);
/// ```
pub fn wrap_degrees(delta: Real) -> Real {
    let mut d = delta % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Normalize a longitude into `[0, 360)`.
pub fn normalize_longitude(lon: Real) -> Real {
    let l = lon.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if l >= 360.0 {
        0.0
    } else {
        l
    }
}

/// Move `lon` onto the branch nearest `reference`.
///
/// The value is returned unchanged when it already lies within 180° of the
/// reference, so sets that do not straddle the 0°/360° seam keep their
/// exact input values.
pub fn unwrap_longitude(lon: Real, reference: Real) -> Real {
    let d = lon - reference;
    if d > 180.0 {
        lon - 360.0 * ((d + 180.0) / 360.0).floor()
    } else if d < -180.0 {
        lon + 360.0 * ((180.0 - d) / 360.0).floor()
    } else {
        lon
    }
}
