//! Mathematical utilities and type definitions.
//!
//! This module provides fundamental types used throughout the library
//! and angle helpers for working with spherical coordinates in degrees.

use nalgebra::{Matrix2, Point2, Vector2};

pub mod angle;

pub use angle::{normalize_longitude, unwrap_longitude, wrap_degrees};

/// Scalar type used throughout the library (currently `f64`).
pub type Real = f64;

/// 2D vector with [`Real`] components.
pub type Vec2 = Vector2<Real>;
/// 2D point with [`Real`] coordinates.
pub type Pt2 = Point2<Real>;
/// 2×2 matrix with [`Real`] entries.
pub type Mat2 = Matrix2<Real>;

/// Number of arcseconds in one degree.
pub const ARCSEC_PER_DEG: Real = 3600.0;

/// Build a [`Mat2`] from a row-major nested array.
pub fn mat2_from_rows(rows: &[[Real; 2]; 2]) -> Mat2 {
    Mat2::new(rows[0][0], rows[0][1], rows[1][0], rows[1][1])
}

/// Convert a [`Mat2`] into a row-major nested array.
pub fn mat2_to_rows(m: &Mat2) -> [[Real; 2]; 2] {
    [[m[(0, 0)], m[(0, 1)]], [m[(1, 0)], m[(1, 1)]]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mat2_rows_roundtrip() {
        let rows = [[1.0, 2.0], [3.0, 4.0]];
        let m = mat2_from_rows(&rows);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 0)], 3.0);
        assert_eq!(mat2_to_rows(&m), rows);
    }
}
