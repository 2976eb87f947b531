use log::debug;
use nalgebra::DMatrix;
use thiserror::Error;
use wcsfit_core::{LinearTransform, Mat2, Real};

use crate::NormalizedCorrespondences;

/// Relative singular value threshold below which the pixel design matrix is
/// treated as rank deficient.
pub const RANK_TOLERANCE: Real = 1e-10;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitialGuessError {
    #[error(
        "pixel offsets do not span two dimensions (singular values {smallest:e} / {largest:e})"
    )]
    Singular { smallest: Real, largest: Real },
    #[error("least-squares solve failed: {0}")]
    Solve(String),
}

/// First-order PC estimate from re-centered correspondences.
///
/// Solves `Δlon ≈ a·x₀ + b·y₀` and `Δlat ≈ c·x₀ + d·y₀` by ordinary least
/// squares over the design matrix `[x₀, y₀]`. The result is
/// `PC = [[a, b], [c, d]]` with CRPIX and CRVAL taken from the projection
/// point. Projection curvature and the `cos(lat)` compression of longitude
/// offsets are ignored; the nonlinear refinement absorbs both.
pub fn initial_linear_transform(
    data: &NormalizedCorrespondences,
) -> Result<LinearTransform, InitialGuessError> {
    let n = data.len();
    let mut a = DMatrix::<Real>::zeros(n, 2);
    let mut b = DMatrix::<Real>::zeros(n, 2);

    for (i, (dp, ds)) in data
        .pixel_offsets
        .iter()
        .zip(data.sky_offsets.iter())
        .enumerate()
    {
        a[(i, 0)] = dp.x;
        a[(i, 1)] = dp.y;
        b[(i, 0)] = ds.x;
        b[(i, 1)] = ds.y;
    }

    let svd = a.svd(true, true);
    let sv = &svd.singular_values;
    let largest = sv.max();
    let smallest = if sv.len() < 2 { 0.0 } else { sv.min() };
    if largest <= 0.0 || smallest <= RANK_TOLERANCE * largest {
        return Err(InitialGuessError::Singular { smallest, largest });
    }

    // Columns of x are the coefficient pairs for longitude and latitude.
    let x = svd
        .solve(&b, 0.0)
        .map_err(|e| InitialGuessError::Solve(e.to_string()))?;
    let pc = Mat2::new(x[(0, 0)], x[(1, 0)], x[(0, 1)], x[(1, 1)]);
    debug!(
        "initial guess: pc=[[{:e}, {:e}], [{:e}, {:e}]] cond={:.3e}",
        pc[(0, 0)],
        pc[(0, 1)],
        pc[(1, 0)],
        pc[(1, 1)],
        largest / smallest
    );

    let pp = data.projection_point;
    Ok(LinearTransform::new(pc, pp.pixel, pp.sky))
}
