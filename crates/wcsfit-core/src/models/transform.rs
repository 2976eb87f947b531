use serde::{Deserialize, Serialize};

use super::gnomonic;
use crate::{mat2_from_rows, mat2_to_rows, LonLat, Mat2, Pt2, Real, SkyAxis};

/// Linear celestial transform: PC matrix plus reference pixel and sky point.
///
/// This is the numeric content of a `TAN` WCS without any frame or keyword
/// metadata. Initial guesses and refined solutions are both expressed as a
/// `LinearTransform`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTransform {
    /// Row-major `[[PC1_1, PC1_2], [PC2_1, PC2_2]]` in degrees per pixel.
    pub pc: Mat2,
    pub crpix: Pt2,
    pub crval: LonLat,
}

impl LinearTransform {
    pub fn new(pc: Mat2, crpix: Pt2, crval: LonLat) -> Self {
        Self { pc, crpix, crval }
    }

    pub fn from_rows(pc: [[Real; 2]; 2], crpix: Pt2, crval: LonLat) -> Self {
        Self::new(mat2_from_rows(&pc), crpix, crval)
    }

    pub fn pc_rows(&self) -> [[Real; 2]; 2] {
        mat2_to_rows(&self.pc)
    }

    /// Copy of `self` with one PC row replaced.
    pub fn with_row(&self, axis: SkyAxis, row: [Real; 2]) -> Self {
        let mut out = *self;
        let r = axis.pc_row();
        out.pc[(r, 0)] = row[0];
        out.pc[(r, 1)] = row[1];
        out
    }

    #[inline]
    pub fn pixel_to_sky(&self, pixel: &Pt2) -> LonLat {
        gnomonic::pixel_to_sky(pixel, &self.pc, &self.crpix, &self.crval)
    }

    /// Inverse mapping. `None` if PC is singular or the sky point is not
    /// in front of the tangent plane.
    pub fn sky_to_pixel(&self, sky: &LonLat) -> Option<Pt2> {
        let iwc = gnomonic::sky_to_intermediate(sky, &self.crval)?;
        let inv = self.pc.try_inverse()?;
        Some(self.crpix + inv * iwc)
    }
}
