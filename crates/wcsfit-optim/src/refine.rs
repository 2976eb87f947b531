//! Nonlinear refinement of an initial linear transform.
//!
//! Two strategies share the same residual model:
//!
//! - [`refine_two_pass`]: longitude pass frees `PC1_1, PC1_2` with the
//!   latitude row held at its starting values, then a latitude pass frees
//!   `PC2_1, PC2_2` with the longitude row fixed at the pass-1 result.
//! - [`refine_joint`]: one four-parameter solve over the stacked residuals.
//!
//! A pass whose solver does not report success is an error. The unrefined
//! or partially refined transform is never returned in its place.

use std::fmt;

use log::{debug, warn};
use thiserror::Error;
use wcsfit_core::{LinearTransform, LonLat, Pt2, Real, SkyAxis, ARCSEC_PER_DEG};

use crate::problems::{AxisRefineProblem, JointRefineProblem};
use crate::{NllsProblem, NllsSolverBackend, SolveOptions, SolveReport};

/// Which solve a [`PassReport`] or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefineStage {
    Longitude,
    Latitude,
    Joint,
}

impl From<SkyAxis> for RefineStage {
    fn from(axis: SkyAxis) -> Self {
        match axis {
            SkyAxis::Longitude => RefineStage::Longitude,
            SkyAxis::Latitude => RefineStage::Latitude,
        }
    }
}

impl fmt::Display for RefineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RefineStage::Longitude => "longitude",
            RefineStage::Latitude => "latitude",
            RefineStage::Joint => "joint",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RefineError {
    #[error("got {pixels} pixel positions but {sky} sky positions")]
    LengthMismatch { pixels: usize, sky: usize },
    #[error("{stage} refinement did not converge after {evaluations} evaluations ({termination})")]
    Convergence {
        stage: RefineStage,
        evaluations: usize,
        termination: String,
    },
}

/// Outcome of one solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    pub stage: RefineStage,
    /// Free parameters before the solve.
    pub initial: Vec<Real>,
    /// Free parameters after the solve.
    pub refined: Vec<Real>,
    pub solve: SolveReport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefineOutcome {
    pub transform: LinearTransform,
    pub passes: Vec<PassReport>,
}

fn check_lengths(pixels: &[Pt2], sky: &[LonLat]) -> Result<(), RefineError> {
    if pixels.len() != sky.len() {
        return Err(RefineError::LengthMismatch {
            pixels: pixels.len(),
            sky: sky.len(),
        });
    }
    Ok(())
}

fn run_pass<P: NllsProblem, B: NllsSolverBackend>(
    stage: RefineStage,
    problem: &P,
    x0: nalgebra::DVector<Real>,
    backend: &B,
    opts: &SolveOptions,
) -> Result<(nalgebra::DVector<Real>, PassReport), RefineError> {
    let initial = x0.as_slice().to_vec();
    let rms_before = problem.rms(&x0) * ARCSEC_PER_DEG;
    let (x, solve) = backend.solve(problem, x0, opts);
    if !solve.converged {
        warn!(
            "{stage} pass failed after {} evaluations: {}",
            solve.evaluations, solve.termination
        );
        return Err(RefineError::Convergence {
            stage,
            evaluations: solve.evaluations,
            termination: solve.termination,
        });
    }
    debug!(
        "{stage} pass: {initial:?} -> {:?} rms {rms_before:.4}\" -> {:.4}\" evals={}",
        x.as_slice(),
        problem.rms(&x) * ARCSEC_PER_DEG,
        solve.evaluations
    );
    let report = PassReport {
        stage,
        initial,
        refined: x.as_slice().to_vec(),
        solve,
    };
    Ok((x, report))
}

fn refine_axis<B: NllsSolverBackend>(
    pixels: &[Pt2],
    sky: &[LonLat],
    base: LinearTransform,
    axis: SkyAxis,
    backend: &B,
    opts: &SolveOptions,
) -> Result<(LinearTransform, PassReport), RefineError> {
    let problem = AxisRefineProblem::new(pixels, sky, base, axis);
    let x0 = problem.initial_params();
    let (x, report) = run_pass(axis.into(), &problem, x0, backend, opts)?;
    Ok((problem.transform(&x), report))
}

/// Decoupled refinement: longitude row first, then latitude row.
///
/// Pass 2 starts from `initial`'s latitude row, not from anything pass 1
/// produced, and keeps pass 1's longitude row fixed. CRPIX and CRVAL are
/// never changed.
pub fn refine_two_pass<B: NllsSolverBackend>(
    pixels: &[Pt2],
    sky: &[LonLat],
    initial: &LinearTransform,
    backend: &B,
    opts: &SolveOptions,
) -> Result<RefineOutcome, RefineError> {
    check_lengths(pixels, sky)?;

    let (after_lon, lon_report) =
        refine_axis(pixels, sky, *initial, SkyAxis::Longitude, backend, opts)?;
    let (after_lat, lat_report) =
        refine_axis(pixels, sky, after_lon, SkyAxis::Latitude, backend, opts)?;

    Ok(RefineOutcome {
        transform: after_lat,
        passes: vec![lon_report, lat_report],
    })
}

/// Joint refinement of all four PC coefficients in one solve.
pub fn refine_joint<B: NllsSolverBackend>(
    pixels: &[Pt2],
    sky: &[LonLat],
    initial: &LinearTransform,
    backend: &B,
    opts: &SolveOptions,
) -> Result<RefineOutcome, RefineError> {
    check_lengths(pixels, sky)?;

    let problem = JointRefineProblem::new(pixels, sky, *initial);
    let x0 = problem.initial_params();
    let (x, report) = run_pass(RefineStage::Joint, &problem, x0, backend, opts)?;

    Ok(RefineOutcome {
        transform: problem.transform(&x),
        passes: vec![report],
    })
}
