use nalgebra::{DMatrix, DVector};
use wcsfit_core::{LinearTransform, LonLat, Pt2, Real, SkyAxis};

use crate::factors::sky::{sky_jacobian_row, sky_residual};
use crate::NllsProblem;

/// Refinement of the PC row driving `axis`, with the other row held fixed.
///
/// Parameters are `[PC{r}_1, PC{r}_2]` for row `r = axis.pc_row() + 1`;
/// residuals are one per correspondence on the selected axis.
#[derive(Debug, Clone)]
pub struct AxisRefineProblem<'a> {
    pixels: &'a [Pt2],
    observed: &'a [LonLat],
    base: LinearTransform,
    axis: SkyAxis,
}

impl<'a> AxisRefineProblem<'a> {
    /// `base` supplies the fixed row, CRPIX, CRVAL and the starting values
    /// of the free row.
    pub fn new(
        pixels: &'a [Pt2],
        observed: &'a [LonLat],
        base: LinearTransform,
        axis: SkyAxis,
    ) -> Self {
        debug_assert_eq!(pixels.len(), observed.len());
        Self {
            pixels,
            observed,
            base,
            axis,
        }
    }

    pub fn initial_params(&self) -> DVector<Real> {
        let r = self.axis.pc_row();
        DVector::from_row_slice(&[self.base.pc[(r, 0)], self.base.pc[(r, 1)]])
    }

    /// Transform with the free row set from `x`.
    pub fn transform(&self, x: &DVector<Real>) -> LinearTransform {
        self.base.with_row(self.axis, [x[0], x[1]])
    }
}

impl NllsProblem for AxisRefineProblem<'_> {
    fn num_params(&self) -> usize {
        2
    }

    fn num_residuals(&self) -> usize {
        self.pixels.len()
    }

    fn residuals(&self, x: &DVector<Real>) -> DVector<Real> {
        let t = self.transform(x);
        DVector::from_iterator(
            self.pixels.len(),
            self.pixels
                .iter()
                .zip(self.observed)
                .map(|(px, obs)| sky_residual(&t, px, obs, self.axis)),
        )
    }

    fn jacobian(&self, x: &DVector<Real>) -> DMatrix<Real> {
        let t = self.transform(x);
        let c0 = 2 * self.axis.pc_row();
        let mut j = DMatrix::zeros(self.pixels.len(), 2);
        for (i, px) in self.pixels.iter().enumerate() {
            let row = sky_jacobian_row(&t, px, self.axis);
            j[(i, 0)] = row[c0];
            j[(i, 1)] = row[c0 + 1];
        }
        j
    }
}
