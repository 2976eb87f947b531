use nalgebra::{DMatrix, DVector};
use wcsfit_core::{LinearTransform, LonLat, Pt2, Real, SkyAxis};

use crate::factors::sky::{sky_jacobian_row, sky_residual};
use crate::NllsProblem;

/// Simultaneous refinement of all four PC coefficients.
///
/// Parameters are `[PC1_1, PC1_2, PC2_1, PC2_2]`. Residuals are stacked:
/// the `n` longitude residuals first, then the `n` latitude residuals.
#[derive(Debug, Clone)]
pub struct JointRefineProblem<'a> {
    pixels: &'a [Pt2],
    observed: &'a [LonLat],
    base: LinearTransform,
}

impl<'a> JointRefineProblem<'a> {
    pub fn new(pixels: &'a [Pt2], observed: &'a [LonLat], base: LinearTransform) -> Self {
        debug_assert_eq!(pixels.len(), observed.len());
        Self {
            pixels,
            observed,
            base,
        }
    }

    pub fn initial_params(&self) -> DVector<Real> {
        let pc = &self.base.pc;
        DVector::from_row_slice(&[pc[(0, 0)], pc[(0, 1)], pc[(1, 0)], pc[(1, 1)]])
    }

    pub fn transform(&self, x: &DVector<Real>) -> LinearTransform {
        LinearTransform::from_rows(
            [[x[0], x[1]], [x[2], x[3]]],
            self.base.crpix,
            self.base.crval,
        )
    }
}

impl NllsProblem for JointRefineProblem<'_> {
    fn num_params(&self) -> usize {
        4
    }

    fn num_residuals(&self) -> usize {
        2 * self.pixels.len()
    }

    fn residuals(&self, x: &DVector<Real>) -> DVector<Real> {
        let t = self.transform(x);
        let n = self.pixels.len();
        let mut r = DVector::zeros(2 * n);
        for (i, (px, obs)) in self.pixels.iter().zip(self.observed).enumerate() {
            r[i] = sky_residual(&t, px, obs, SkyAxis::Longitude);
            r[n + i] = sky_residual(&t, px, obs, SkyAxis::Latitude);
        }
        r
    }

    fn jacobian(&self, x: &DVector<Real>) -> DMatrix<Real> {
        let t = self.transform(x);
        let n = self.pixels.len();
        let mut j = DMatrix::zeros(2 * n, 4);
        for (i, px) in self.pixels.iter().enumerate() {
            let lon = sky_jacobian_row(&t, px, SkyAxis::Longitude);
            let lat = sky_jacobian_row(&t, px, SkyAxis::Latitude);
            for k in 0..4 {
                j[(i, k)] = lon[k];
                j[(n + i, k)] = lat[k];
            }
        }
        j
    }
}
