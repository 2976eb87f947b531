//! Re-centering of correspondences about a projection point.

use log::debug;
use thiserror::Error;
use wcsfit_core::{
    normalize_longitude, unwrap_longitude, wrap_degrees, LonLat, ProjectionPoint, Pt2, Real, Vec2,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("no correspondences given")]
    Empty,
    #[error("got {pixels} pixel positions but {sky} sky positions")]
    LengthMismatch { pixels: usize, sky: usize },
}

/// Correspondences expressed as offsets from a projection point.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCorrespondences {
    /// `pixel − projection_point.pixel`.
    pub pixel_offsets: Vec<Vec2>,
    /// `(wrap(lon − lon₀), lat − lat₀)` in degrees.
    pub sky_offsets: Vec<Vec2>,
    pub projection_point: ProjectionPoint,
}

impl NormalizedCorrespondences {
    pub fn len(&self) -> usize {
        self.pixel_offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_offsets.is_empty()
    }
}

fn check_lengths(pixels: &[Pt2], sky: &[LonLat]) -> Result<(), NormalizeError> {
    if pixels.len() != sky.len() {
        return Err(NormalizeError::LengthMismatch {
            pixels: pixels.len(),
            sky: sky.len(),
        });
    }
    if pixels.is_empty() {
        return Err(NormalizeError::Empty);
    }
    Ok(())
}

/// Mean pixel position and mean sky position of the set.
///
/// Longitudes more than 180° away from the first point are moved onto its
/// branch before averaging, so sets straddling 0°/360° average to a point
/// inside the set. The result is normalized into `[0, 360)`.
pub fn centroid(pixels: &[Pt2], sky: &[LonLat]) -> Result<ProjectionPoint, NormalizeError> {
    check_lengths(pixels, sky)?;
    let n = pixels.len() as Real;

    let (sx, sy) = pixels
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));

    let lon_ref = sky[0].lon;
    let (slon, slat) = sky.iter().fold((0.0, 0.0), |(slon, slat), s| {
        (slon + unwrap_longitude(s.lon, lon_ref), slat + s.lat)
    });

    Ok(ProjectionPoint::new(
        Pt2::new(sx / n, sy / n),
        LonLat::new(normalize_longitude(slon / n), slat / n),
    ))
}

/// Offsets of every correspondence from `projection_point`, or from the
/// [`centroid`] when none is given.
pub fn normalize_correspondences(
    pixels: &[Pt2],
    sky: &[LonLat],
    projection_point: Option<&ProjectionPoint>,
) -> Result<NormalizedCorrespondences, NormalizeError> {
    check_lengths(pixels, sky)?;
    let projection_point = match projection_point {
        Some(p) => *p,
        None => centroid(pixels, sky)?,
    };
    debug!(
        "projection point: pixel=({:.3}, {:.3}) sky=({:.8}, {:.8})",
        projection_point.pixel.x,
        projection_point.pixel.y,
        projection_point.sky.lon,
        projection_point.sky.lat
    );

    let pixel_offsets = pixels.iter().map(|p| p - projection_point.pixel).collect();
    let sky_offsets = sky
        .iter()
        .map(|s| {
            Vec2::new(
                wrap_degrees(s.lon - projection_point.sky.lon),
                s.lat - projection_point.sky.lat,
            )
        })
        .collect();

    Ok(NormalizedCorrespondences {
        pixel_offsets,
        sky_offsets,
        projection_point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<Pt2>, Vec<LonLat>) {
        (
            vec![Pt2::new(0.0, 0.0), Pt2::new(10.0, 0.0), Pt2::new(0.0, 20.0)],
            vec![
                LonLat::new(10.0, 1.0),
                LonLat::new(11.0, 2.0),
                LonLat::new(12.0, 3.0),
            ],
        )
    }

    #[test]
    fn centroid_is_arithmetic_mean() {
        let (px, sky) = sample();
        let c = centroid(&px, &sky).unwrap();
        assert!((c.pixel.x - 10.0 / 3.0).abs() < 1e-12);
        assert!((c.pixel.y - 20.0 / 3.0).abs() < 1e-12);
        assert!((c.sky.lon - 11.0).abs() < 1e-12);
        assert!((c.sky.lat - 2.0).abs() < 1e-12);
    }

    #[test]
    fn centroid_straddling_zero() {
        let px = vec![Pt2::new(0.0, 0.0), Pt2::new(1.0, 0.0), Pt2::new(2.0, 0.0)];
        let sky = vec![
            LonLat::new(359.8, 0.0),
            LonLat::new(0.0, 0.0),
            LonLat::new(0.2, 0.0),
        ];
        let c = centroid(&px, &sky).unwrap();
        assert!((0.0..360.0).contains(&c.sky.lon));
        assert!(wrap_degrees(c.sky.lon).abs() < 1e-9, "lon={}", c.sky.lon);
    }

    #[test]
    fn offsets_from_explicit_point() {
        let (px, sky) = sample();
        let pp = ProjectionPoint::new(Pt2::new(5.0, 5.0), LonLat::new(10.5, 1.5));
        let n = normalize_correspondences(&px, &sky, Some(&pp)).unwrap();
        assert_eq!(n.projection_point, pp);
        assert_eq!(n.len(), 3);
        assert_eq!(n.pixel_offsets[0], Vec2::new(-5.0, -5.0));
        assert!((n.sky_offsets[2] - Vec2::new(1.5, 1.5)).norm() < 1e-12);
    }

    #[test]
    fn longitude_offsets_are_wrapped() {
        let px = vec![Pt2::new(0.0, 0.0), Pt2::new(1.0, 0.0)];
        let sky = vec![LonLat::new(359.9, 0.0), LonLat::new(0.1, 0.0)];
        let pp = ProjectionPoint::new(Pt2::new(0.5, 0.0), LonLat::new(0.0, 0.0));
        let n = normalize_correspondences(&px, &sky, Some(&pp)).unwrap();
        assert!((n.sky_offsets[0].x + 0.1).abs() < 1e-9);
        assert!((n.sky_offsets[1].x - 0.1).abs() < 1e-9);
    }

    #[test]
    fn rejects_empty_and_mismatched() {
        assert_eq!(
            normalize_correspondences(&[], &[], None).unwrap_err(),
            NormalizeError::Empty
        );
        let err = normalize_correspondences(&[Pt2::new(0.0, 0.0)], &[], None).unwrap_err();
        assert_eq!(err, NormalizeError::LengthMismatch { pixels: 1, sky: 0 });
    }
}
