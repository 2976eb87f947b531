//! Single-axis sky residuals for a `TAN` transform.
//!
//! Residual convention: `predicted − observed`, with longitude differences
//! wrapped into `(−180, 180]`. Derivatives are of the predicted coordinate, so
//! they are also derivatives of the residual.

use wcsfit_core::{
    gnomonic::{intermediate_partials, intermediate_to_sky, pixel_to_intermediate},
    wrap_degrees, LinearTransform, LonLat, Pt2, Real, SkyAxis,
};

/// Residual of one observation on one axis, in degrees.
#[inline]
pub fn sky_residual(t: &LinearTransform, pixel: &Pt2, observed: &LonLat, axis: SkyAxis) -> Real {
    let iwc = pixel_to_intermediate(pixel, &t.pc, &t.crpix);
    let predicted = intermediate_to_sky(&iwc, &t.crval);
    axis_difference(axis, axis.select(&predicted), axis.select(observed))
}

/// `predicted − observed` on `axis`, wrapping longitudes.
#[inline]
pub fn axis_difference(axis: SkyAxis, predicted: Real, observed: Real) -> Real {
    match axis {
        SkyAxis::Longitude => wrap_degrees(predicted - observed),
        SkyAxis::Latitude => predicted - observed,
    }
}

/// Derivatives of the predicted `axis` coordinate with respect to
/// `[PC1_1, PC1_2, PC2_1, PC2_2]`.
pub fn sky_jacobian_row(t: &LinearTransform, pixel: &Pt2, axis: SkyAxis) -> [Real; 4] {
    let d = pixel - t.crpix;
    let iwc = t.pc * d;
    let (d_xi, d_eta) = intermediate_partials(&iwc, &t.crval).axis(axis);
    [d_xi * d.x, d_xi * d.y, d_eta * d.x, d_eta * d.y]
}
