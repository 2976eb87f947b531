use nalgebra::{DMatrix, DVector};
use wcsfit_core::Real;

/// Dense least-squares problem over a subset of the PC coefficients.
///
/// Parameters are PC entries in degrees per pixel. Residuals are predicted
/// minus observed sky coordinates in degrees, with longitude differences
/// already wrapped into `(-180, 180]`. CRPIX and CRVAL live inside the
/// problem and never appear in `x`.
pub trait NllsProblem {
    /// Free PC coefficients: 2 for one axis, 4 for the joint fit.
    fn num_params(&self) -> usize;
    /// One row per correspondence and fitted axis.
    fn num_residuals(&self) -> usize;

    fn residuals(&self, x: &DVector<Real>) -> DVector<Real>;
    /// Analytic `∂r/∂x`, `num_residuals × num_params`.
    fn jacobian(&self, x: &DVector<Real>) -> DMatrix<Real>;

    /// Root-mean-square residual in degrees.
    fn rms(&self, x: &DVector<Real>) -> Real {
        let n = self.num_residuals();
        if n == 0 {
            return 0.0;
        }
        (self.residuals(x).norm_squared() / n as Real).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveOptions {
    /// Iteration budget. The LM backend turns it into an evaluation cap of
    /// `max_iters * (n + 1)` for `n` free coefficients.
    pub max_iters: usize,
    pub ftol: Real,
    pub gtol: Real,
    pub xtol: Real,
    /// Log a per-solve summary at `info` level instead of `debug`.
    pub verbose: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_iters: 200,
            ftol: 1e-10,
            gtol: 1e-10,
            xtol: 1e-10,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    /// Residual evaluations spent by the backend.
    pub evaluations: usize,
    /// `0.5 * |r|²` at the returned parameters, in square degrees.
    pub final_cost: Real,
    pub converged: bool,
    /// Backend-specific termination reason, e.g. `Converged { .. }` or `LostPatience`.
    pub termination: String,
}

/// Anything that can minimize an [`NllsProblem`] from a starting PC guess.
pub trait NllsSolverBackend {
    fn solve<P: NllsProblem>(
        &self,
        problem: &P,
        x0: DVector<Real>,
        opts: &SolveOptions,
    ) -> (DVector<Real>, SolveReport);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offsets(Vec<Real>);

    impl NllsProblem for Offsets {
        fn num_params(&self) -> usize {
            1
        }

        fn num_residuals(&self) -> usize {
            self.0.len()
        }

        fn residuals(&self, x: &DVector<Real>) -> DVector<Real> {
            DVector::from_iterator(self.0.len(), self.0.iter().map(|o| x[0] - o))
        }

        fn jacobian(&self, _x: &DVector<Real>) -> DMatrix<Real> {
            DMatrix::from_element(self.0.len(), 1, 1.0)
        }
    }

    #[test]
    fn rms_over_residual_rows() {
        let p = Offsets(vec![1.0, -1.0, 3.0, -3.0]);
        let rms = p.rms(&DVector::from_element(1, 0.0));
        assert!((rms - 5.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(Offsets(Vec::new()).rms(&DVector::from_element(1, 2.0)), 0.0);
    }
}
