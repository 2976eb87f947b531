use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wcsfit_core::{
    validate_projection_code, CelestialFrame, CorrespondenceError, CorrespondenceSet,
    FitsConventions, ProjectionPoint, Real, TemplateError, WcsModel, WcsTemplateProvider,
    DEFAULT_PROJECTION,
};
use wcsfit_linear::{
    initial_linear_transform, normalize_correspondences, InitialGuessError, NormalizeError,
};
use wcsfit_optim::{
    refine_joint, refine_two_pass, LmBackend, PassReport, RefineError, RefineStage,
};

use crate::{assemble_wcs, FitConfig, FitInput, RefineStrategy};

/// Reasons the input cannot be fitted at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error(transparent)]
    Correspondence(#[from] CorrespondenceError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("projection {0:?} is not supported, only \"TAN\" can be fitted")]
    UnsupportedProjection(String),
    #[error("projection point must be finite with latitude in [-90, 90]")]
    ProjectionPoint,
    #[error("got {pixels} pixel positions but {sky} sky positions")]
    LengthMismatch { pixels: usize, sky: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("singular fit: {0}")]
    SingularFit(#[from] InitialGuessError),
    #[error("{stage} refinement did not converge after {evaluations} evaluations ({termination})")]
    Convergence {
        stage: RefineStage,
        evaluations: usize,
        termination: String,
    },
}

impl From<CorrespondenceError> for FitError {
    fn from(e: CorrespondenceError) -> Self {
        FitError::InvalidInput(e.into())
    }
}

impl From<NormalizeError> for FitError {
    fn from(e: NormalizeError) -> Self {
        FitError::InvalidInput(e.into())
    }
}

impl From<TemplateError> for FitError {
    fn from(e: TemplateError) -> Self {
        FitError::InvalidInput(e.into())
    }
}

impl From<RefineError> for FitError {
    fn from(e: RefineError) -> Self {
        match e {
            RefineError::LengthMismatch { pixels, sky } => {
                FitError::InvalidInput(InvalidInput::LengthMismatch { pixels, sky })
            }
            RefineError::Convergence {
                stage,
                evaluations,
                termination,
            } => FitError::Convergence {
                stage,
                evaluations,
                termination,
            },
        }
    }
}

/// Serializable view of one refinement solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassSummary {
    /// `"longitude"`, `"latitude"` or `"joint"`.
    pub stage: String,
    pub initial: Vec<Real>,
    pub refined: Vec<Real>,
    pub evaluations: usize,
    pub final_cost: Real,
    pub termination: String,
}

impl From<&PassReport> for PassSummary {
    fn from(p: &PassReport) -> Self {
        Self {
            stage: p.stage.to_string(),
            initial: p.initial.clone(),
            refined: p.refined.clone(),
            evaluations: p.solve.evaluations,
            final_cost: p.solve.final_cost,
            termination: p.solve.termination.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub wcs: WcsModel,
    pub strategy: RefineStrategy,
    /// Closed-form PC estimate the refinement started from.
    pub initial_pc: [[Real; 2]; 2],
    pub passes: Vec<PassSummary>,
    /// RMS angular residual of the fitted WCS over all points.
    pub rms_arcsec: Real,
    pub max_arcsec: Real,
    pub num_points: usize,
}

fn check_projection(code: &str) -> Result<(), InvalidInput> {
    validate_projection_code(code)?;
    if code != DEFAULT_PROJECTION {
        return Err(InvalidInput::UnsupportedProjection(code.to_string()));
    }
    Ok(())
}

fn check_projection_point(pp: &ProjectionPoint) -> Result<(), InvalidInput> {
    let finite = pp.pixel.x.is_finite() && pp.pixel.y.is_finite() && pp.sky.is_finite();
    if !finite || !(-90.0..=90.0).contains(&pp.sky.lat) {
        return Err(InvalidInput::ProjectionPoint);
    }
    Ok(())
}

/// Fit a `TAN` WCS using the FITS keyword conventions.
///
/// Without `projection_point` the tangent point is the centroid of the set.
/// With one, CRPIX and CRVAL are exactly its pixel and sky position.
pub fn fit_wcs(
    set: &CorrespondenceSet,
    projection_point: Option<&ProjectionPoint>,
    config: &FitConfig,
) -> Result<FitReport, FitError> {
    fit_wcs_with(&FitsConventions, set, projection_point, config)
}

/// [`fit_wcs`] with a caller-supplied keyword template source.
pub fn fit_wcs_with<P: WcsTemplateProvider + ?Sized>(
    provider: &P,
    set: &CorrespondenceSet,
    projection_point: Option<&ProjectionPoint>,
    config: &FitConfig,
) -> Result<FitReport, FitError> {
    check_projection(&config.projection)?;
    if let Some(pp) = projection_point {
        check_projection_point(pp)?;
    }
    let frame: CelestialFrame = set.frame();
    let template = provider.template(frame, &config.projection)?;

    let pixels = set.pixels();
    let sky = set.sky_lon_lat();
    debug!("fitting {} correspondences in {frame}", set.len());

    let normalized = normalize_correspondences(pixels, &sky, projection_point)?;
    let initial = initial_linear_transform(&normalized)?;

    let opts = config.solver.to_options();
    let outcome = match config.strategy {
        RefineStrategy::TwoPass => refine_two_pass(pixels, &sky, &initial, &LmBackend, &opts)?,
        RefineStrategy::Joint => refine_joint(pixels, &sky, &initial, &LmBackend, &opts)?,
    };

    let wcs = assemble_wcs(template, frame, &outcome.transform);
    let stats = wcs.residuals(pixels, &sky);
    info!(
        "fitted {} WCS from {} points: rms={:.4}\" max={:.4}\" scale={:.4}\"/px",
        wcs.projection,
        stats.count,
        stats.rms_arcsec,
        stats.max_arcsec,
        wcs.pixel_scale_arcsec()
    );

    Ok(FitReport {
        wcs,
        strategy: config.strategy,
        initial_pc: initial.pc_rows(),
        passes: outcome.passes.iter().map(PassSummary::from).collect(),
        rms_arcsec: stats.rms_arcsec,
        max_arcsec: stats.max_arcsec,
        num_points: stats.count,
    })
}

/// Convert a JSON input and fit it.
pub fn run_fit(input: &FitInput, config: &FitConfig) -> Result<FitReport, FitError> {
    let set = input.to_correspondences()?;
    fit_wcs(&set, input.projection_point.as_ref(), config)
}
