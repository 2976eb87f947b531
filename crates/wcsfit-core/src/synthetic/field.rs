//! Synthetic star fields projected through a known transform.

use anyhow::{ensure, Result};

use super::noise::UniformSkyNoise;
use crate::{
    CelestialFrame, CorrespondenceSet, LinearTransform, Mat2, Pt2, Real, SkyPoint, ARCSEC_PER_DEG,
};

/// Row-major `nx * ny` pixel grid starting at `origin` (Y major).
pub fn grid_pixels(nx: usize, ny: usize, origin: Pt2, spacing: Real) -> Vec<Pt2> {
    let mut points = Vec::with_capacity(nx.saturating_mul(ny));
    for j in 0..ny {
        for i in 0..nx {
            points.push(Pt2::new(
                origin.x + i as Real * spacing,
                origin.y + j as Real * spacing,
            ));
        }
    }
    points
}

/// PC matrix for a plate scale (arcsec/pixel) and position angle (degrees,
/// North through East).
///
/// Without `mirrored` the result has the usual sky orientation, East to the
/// left (`PC1_1 < 0`).
pub fn pc_from_scale_rotation(scale_arcsec: Real, rotation_deg: Real, mirrored: bool) -> Mat2 {
    let s = scale_arcsec / ARCSEC_PER_DEG;
    let (sin_r, cos_r) = rotation_deg.to_radians().sin_cos();
    let sign = if mirrored { 1.0 } else { -1.0 };
    Mat2::new(sign * s * cos_r, s * sin_r, -sign * s * sin_r, s * cos_r)
}

/// Map `pixels` through `truth` into a validated correspondence set.
///
/// `noise` (field index 0) is added to the sky positions when given.
pub fn project_field(
    truth: &LinearTransform,
    pixels: &[Pt2],
    frame: CelestialFrame,
    noise: Option<&UniformSkyNoise>,
) -> Result<CorrespondenceSet> {
    project_field_indexed(truth, pixels, frame, noise, 0)
}

/// Like [`project_field`] with an explicit noise stream index.
pub fn project_field_indexed(
    truth: &LinearTransform,
    pixels: &[Pt2],
    frame: CelestialFrame,
    noise: Option<&UniformSkyNoise>,
    field_idx: usize,
) -> Result<CorrespondenceSet> {
    ensure!(
        truth.pc.determinant().abs() > 0.0,
        "ground-truth PC matrix is singular"
    );

    let sky = pixels
        .iter()
        .enumerate()
        .map(|(i, px)| {
            let p = truth.pixel_to_sky(px);
            let p = match noise {
                Some(n) => n.apply(field_idx, i, p),
                None => p,
            };
            SkyPoint::new(p.lon, p.lat, frame)
        })
        .collect();

    Ok(CorrespondenceSet::new(pixels.to_vec(), sky)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LonLat, WcsModel};

    #[test]
    fn grid_is_row_major() {
        let g = grid_pixels(3, 2, Pt2::new(10.0, 20.0), 5.0);
        assert_eq!(g.len(), 6);
        assert_eq!(g[0], Pt2::new(10.0, 20.0));
        assert_eq!(g[1], Pt2::new(15.0, 20.0));
        assert_eq!(g[3], Pt2::new(10.0, 25.0));
    }

    #[test]
    fn pc_scale_rotation_properties() {
        let pc = pc_from_scale_rotation(2.0, 30.0, false);
        let wcs = WcsModel {
            projection: "TAN".into(),
            frame: CelestialFrame::Icrs,
            ctype: ["RA---TAN".into(), "DEC--TAN".into()],
            cunit: ["deg".into(), "deg".into()],
            radesys: None,
            equinox: None,
            crpix: [0.0, 0.0],
            crval: [0.0, 0.0],
            pc: crate::mat2_to_rows(&pc),
        };
        assert!((wcs.pixel_scale_arcsec() - 2.0).abs() < 1e-12);
        assert!((wcs.rotation_degrees() - 30.0).abs() < 1e-9);
        assert!(!wcs.is_mirrored());
        assert!(pc[(0, 0)] < 0.0);

        let flipped = pc_from_scale_rotation(2.0, 30.0, true);
        assert!(flipped.determinant() > 0.0);
    }

    #[test]
    fn projected_field_is_exact_without_noise() {
        let truth = LinearTransform::new(
            pc_from_scale_rotation(1.0, 0.0, false),
            Pt2::new(50.0, 50.0),
            LonLat::new(10.0, 20.0),
        );
        let pixels = grid_pixels(3, 3, Pt2::new(0.0, 0.0), 50.0);
        let set = project_field(&truth, &pixels, CelestialFrame::Galactic, None).unwrap();
        assert_eq!(set.frame(), CelestialFrame::Galactic);
        let centre = set.sky()[4];
        assert!((centre.lon - 10.0).abs() < 1e-12);
        assert!((centre.lat - 20.0).abs() < 1e-12);
    }

    #[test]
    fn field_index_selects_noise_stream() {
        let truth = LinearTransform::new(
            pc_from_scale_rotation(1.0, 10.0, false),
            Pt2::new(50.0, 50.0),
            LonLat::new(80.0, -40.0),
        );
        let pixels = grid_pixels(3, 3, Pt2::new(0.0, 0.0), 50.0);
        let noise = UniformSkyNoise {
            seed: 9,
            max_abs_arcsec: 1.0,
        };
        let first = project_field(&truth, &pixels, CelestialFrame::Icrs, Some(&noise)).unwrap();
        let zero =
            project_field_indexed(&truth, &pixels, CelestialFrame::Icrs, Some(&noise), 0).unwrap();
        let other =
            project_field_indexed(&truth, &pixels, CelestialFrame::Icrs, Some(&noise), 1).unwrap();

        assert_eq!(first, zero);
        assert_ne!(first.sky(), other.sky());
        for (a, b) in first.sky().iter().zip(other.sky()) {
            let sep = LonLat::new(a.lon, a.lat).separation_deg(&LonLat::new(b.lon, b.lat));
            assert!(sep * 3600.0 < 3.0, "sep={sep}");
        }
    }

    #[test]
    fn singular_truth_is_rejected() {
        let truth = LinearTransform::new(
            Mat2::zeros(),
            Pt2::new(0.0, 0.0),
            LonLat::new(0.0, 0.0),
        );
        let pixels = grid_pixels(2, 2, Pt2::new(0.0, 0.0), 1.0);
        assert!(project_field(&truth, &pixels, CelestialFrame::Icrs, None).is_err());
    }
}
