//! Tangent-plane (gnomonic, `TAN`) projection.
//!
//! The forward model of a linear celestial WCS:
//!
//! 1. pixel → intermediate world coordinates: `(ξ, η) = PC · (x − CRPIX₁, y − CRPIX₂)`
//! 2. intermediate → sky: deproject `(ξ, η)` from the plane tangent to the
//!    sphere at CRVAL (native pole at `LONPOLE = 180°`).
//!
//! Everything is in degrees; `CDELTi` is taken as 1 so the PC matrix carries
//! the plate scale. PC is row-major: `[[PC1_1, PC1_2], [PC2_1, PC2_2]]`.
//! Pixel offsets are plain `x − CRPIX`, so CRPIX must be given in the same
//! pixel convention as the points (FITS uses 1-based pixels).

use crate::{normalize_longitude, LonLat, Mat2, Pt2, Real, SkyAxis, Vec2};

/// Pixel offset from CRPIX mapped through PC, in degrees.
#[inline]
pub fn pixel_to_intermediate(pixel: &Pt2, pc: &Mat2, crpix: &Pt2) -> Vec2 {
    pc * (pixel - crpix)
}

/// Deproject intermediate world coordinates (degrees) onto the sphere.
///
/// The returned longitude is normalized into `[0, 360)`.
pub fn intermediate_to_sky(iwc: &Vec2, crval: &LonLat) -> LonLat {
    let xi = iwc.x.to_radians();
    let eta = iwc.y.to_radians();
    let (sin_d0, cos_d0) = crval.lat.to_radians().sin_cos();

    let den = cos_d0 - eta * sin_d0;
    let lon = crval.lon + xi.atan2(den).to_degrees();
    let lat = (sin_d0 + eta * cos_d0).atan2((xi * xi + den * den).sqrt());

    LonLat::new(normalize_longitude(lon), lat.to_degrees())
}

/// Project a sky position onto the plane tangent at `crval`.
///
/// Returns `None` when the point lies on or beyond the horizon of the
/// tangent point (90° or more away), where the gnomonic projection diverges.
pub fn sky_to_intermediate(sky: &LonLat, crval: &LonLat) -> Option<Vec2> {
    let (sin_d, cos_d) = sky.lat.to_radians().sin_cos();
    let (sin_d0, cos_d0) = crval.lat.to_radians().sin_cos();
    let (sin_da, cos_da) = (sky.lon - crval.lon).to_radians().sin_cos();

    let d = sin_d * sin_d0 + cos_d * cos_d0 * cos_da;
    if d <= Real::EPSILON {
        return None;
    }

    let xi = cos_d * sin_da / d;
    let eta = (sin_d * cos_d0 - cos_d * sin_d0 * cos_da) / d;
    Some(Vec2::new(xi.to_degrees(), eta.to_degrees()))
}

/// Full pixel → sky mapping for one pixel.
#[inline]
pub fn pixel_to_sky(pixel: &Pt2, pc: &Mat2, crpix: &Pt2, crval: &LonLat) -> LonLat {
    intermediate_to_sky(&pixel_to_intermediate(pixel, pc, crpix), crval)
}

/// Predicted sky coordinate of `pixel` on a single axis.
///
/// This is the residual model used by the refiner: the longitude output is in
/// `[0, 360)`, so callers comparing it with observations must difference via
/// [`crate::wrap_degrees`].
#[inline]
pub fn project_axis(pixel: &Pt2, pc: &Mat2, crpix: &Pt2, crval: &LonLat, axis: SkyAxis) -> Real {
    axis.select(&pixel_to_sky(pixel, pc, crpix, crval))
}

/// Derivatives of the deprojected `(lon, lat)` with respect to `(ξ, η)`.
///
/// All quantities are degrees per degree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPartials {
    pub dlon_dxi: Real,
    pub dlon_deta: Real,
    pub dlat_dxi: Real,
    pub dlat_deta: Real,
}

impl SkyPartials {
    /// `(∂/∂ξ, ∂/∂η)` of the selected axis.
    #[inline]
    pub fn axis(&self, axis: SkyAxis) -> (Real, Real) {
        match axis {
            SkyAxis::Longitude => (self.dlon_dxi, self.dlon_deta),
            SkyAxis::Latitude => (self.dlat_dxi, self.dlat_deta),
        }
    }
}

/// Analytic partials of [`intermediate_to_sky`].
pub fn intermediate_partials(iwc: &Vec2, crval: &LonLat) -> SkyPartials {
    let xi = iwc.x.to_radians();
    let eta = iwc.y.to_radians();
    let (sin_d0, cos_d0) = crval.lat.to_radians().sin_cos();

    let den = cos_d0 - eta * sin_d0;
    let num = sin_d0 + eta * cos_d0;
    let q = xi * xi + den * den;
    let rho = q.sqrt();
    // num² + rho² = 1 + ξ² + η²
    let s = 1.0 + xi * xi + eta * eta;

    SkyPartials {
        dlon_dxi: den / q,
        dlon_deta: xi * sin_d0 / q,
        dlat_dxi: -num * xi / (rho * s),
        dlat_deta: (rho * cos_d0 + num * den * sin_d0 / rho) / s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap_degrees;

    fn rotation_pc(scale_deg: Real, rot_deg: Real) -> Mat2 {
        let (s, c) = rot_deg.to_radians().sin_cos();
        Mat2::new(-scale_deg * c, scale_deg * s, scale_deg * s, scale_deg * c)
    }

    #[test]
    fn reference_pixel_maps_to_crval() {
        let pc = rotation_pc(1.0 / 3600.0, 25.0);
        let crpix = Pt2::new(512.0, 512.0);
        let crval = LonLat::new(180.0, 45.0);
        let sky = pixel_to_sky(&crpix, &pc, &crpix, &crval);
        assert!((sky.lon - 180.0).abs() < 1e-12);
        assert!((sky.lat - 45.0).abs() < 1e-12);
    }

    #[test]
    fn radial_distance_is_arctan_of_plane_distance() {
        let crval = LonLat::new(33.0, -61.0);
        let iwc = Vec2::new(3.0, -4.0);
        let sky = intermediate_to_sky(&iwc, &crval);
        let expected = (5.0_f64.to_radians()).atan().to_degrees();
        let sep = crval.separation_deg(&sky);
        assert!((sep - expected).abs() < 1e-9, "sep={sep} expected={expected}");
    }

    #[test]
    fn pole_tangent_point() {
        let crval = LonLat::new(0.0, 90.0);
        let sky = intermediate_to_sky(&Vec2::new(0.0, -1.0), &crval);
        assert!((sky.lon - 0.0).abs() < 1e-12);
        let expected = 90.0 - (1.0_f64.to_radians()).atan().to_degrees();
        assert!((sky.lat - expected).abs() < 1e-12);
    }

    #[test]
    fn forward_inverse_roundtrip() {
        let crval = LonLat::new(359.8, 12.0);
        for iwc in [
            Vec2::new(0.3, 0.2),
            Vec2::new(-0.5, 0.1),
            Vec2::new(1.5, -2.0),
            Vec2::new(-10.0, 7.0),
        ] {
            let sky = intermediate_to_sky(&iwc, &crval);
            let back = sky_to_intermediate(&sky, &crval).unwrap();
            assert!((back - iwc).norm() < 1e-10, "{iwc:?} -> {back:?}");
        }
    }

    #[test]
    fn longitude_wraps_into_range() {
        let crval = LonLat::new(359.95, 0.0);
        let sky = intermediate_to_sky(&Vec2::new(0.1, 0.0), &crval);
        assert!(sky.lon >= 0.0 && sky.lon < 360.0);
        assert!((wrap_degrees(sky.lon - 0.05)).abs() < 1e-6, "lon={}", sky.lon);
    }

    #[test]
    fn behind_tangent_plane_is_rejected() {
        let crval = LonLat::new(0.0, 0.0);
        assert!(sky_to_intermediate(&LonLat::new(180.0, 0.0), &crval).is_none());
        assert!(sky_to_intermediate(&LonLat::new(90.0, 0.0), &crval).is_none());
        assert!(sky_to_intermediate(&LonLat::new(0.0, -90.0), &crval).is_none());
        assert!(sky_to_intermediate(&LonLat::new(89.0, 0.0), &crval).is_some());
    }

    #[test]
    fn project_axis_selects_component() {
        let pc = rotation_pc(2.0 / 3600.0, -40.0);
        let crpix = Pt2::new(100.0, 200.0);
        let crval = LonLat::new(210.0, -30.0);
        let px = Pt2::new(900.0, -50.0);
        let sky = pixel_to_sky(&px, &pc, &crpix, &crval);
        assert_eq!(project_axis(&px, &pc, &crpix, &crval, SkyAxis::Longitude), sky.lon);
        assert_eq!(project_axis(&px, &pc, &crpix, &crval, SkyAxis::Latitude), sky.lat);
    }

    #[test]
    fn partials_match_finite_differences() {
        let h = 1e-6;
        for (crval, iwc) in [
            (LonLat::new(10.0, 30.0), Vec2::new(0.4, -0.7)),
            (LonLat::new(250.0, -75.0), Vec2::new(-2.0, 1.5)),
            (LonLat::new(0.0, 0.0), Vec2::new(0.01, 0.02)),
        ] {
            let p = intermediate_partials(&iwc, &crval);
            let f = |v: Vec2| intermediate_to_sky(&v, &crval);
            let dx_p = f(iwc + Vec2::new(h, 0.0));
            let dx_m = f(iwc - Vec2::new(h, 0.0));
            let dy_p = f(iwc + Vec2::new(0.0, h));
            let dy_m = f(iwc - Vec2::new(0.0, h));

            let fd_lon_xi = wrap_degrees(dx_p.lon - dx_m.lon) / (2.0 * h);
            let fd_lon_eta = wrap_degrees(dy_p.lon - dy_m.lon) / (2.0 * h);
            let fd_lat_xi = (dx_p.lat - dx_m.lat) / (2.0 * h);
            let fd_lat_eta = (dy_p.lat - dy_m.lat) / (2.0 * h);

            assert!((p.dlon_dxi - fd_lon_xi).abs() < 1e-6, "{p:?} vs {fd_lon_xi}");
            assert!((p.dlon_deta - fd_lon_eta).abs() < 1e-6, "{p:?} vs {fd_lon_eta}");
            assert!((p.dlat_dxi - fd_lat_xi).abs() < 1e-6, "{p:?} vs {fd_lat_xi}");
            assert!((p.dlat_deta - fd_lat_eta).abs() < 1e-6, "{p:?} vs {fd_lat_eta}");
        }
    }
}
