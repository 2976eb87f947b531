use rayon::prelude::*;
use wcsfit_core::{CorrespondenceSet, ProjectionPoint};

use crate::{fit_wcs, FitConfig, FitError, FitReport};

/// One independent fit of a batch.
#[derive(Debug, Clone)]
pub struct FitRequest {
    pub set: CorrespondenceSet,
    pub projection_point: Option<ProjectionPoint>,
}

/// Fit every request on the rayon thread pool.
///
/// Results are returned in request order; one failing fit does not affect
/// the others.
pub fn fit_wcs_batch(
    requests: &[FitRequest],
    config: &FitConfig,
) -> Vec<Result<FitReport, FitError>> {
    requests
        .par_iter()
        .map(|r| fit_wcs(&r.set, r.projection_point.as_ref(), config))
        .collect()
}
