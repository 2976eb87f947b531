use wcsfit_core::{
    synthetic::{field, noise::UniformSkyNoise},
    CelestialFrame, FitsConventions, LinearTransform, LonLat, Pt2, WcsModel, WcsTemplateProvider,
    DEFAULT_PROJECTION,
};

fn model_for(frame: CelestialFrame, truth: &LinearTransform) -> WcsModel {
    let t = FitsConventions.template(frame, DEFAULT_PROJECTION).unwrap();
    WcsModel {
        projection: t.projection,
        frame,
        ctype: t.ctype,
        cunit: t.cunit,
        radesys: t.radesys,
        equinox: t.equinox,
        crpix: [truth.crpix.x, truth.crpix.y],
        crval: [truth.crval.lon, truth.crval.lat],
        pc: truth.pc_rows(),
    }
}

#[test]
fn wcs_model_matches_linear_transform_over_grid() {
    let truth = LinearTransform::new(
        field::pc_from_scale_rotation(3.5, -72.0, false),
        Pt2::new(1024.5, 1024.5),
        LonLat::new(266.4, -29.0),
    );
    let wcs = model_for(CelestialFrame::Icrs, &truth);

    for px in field::grid_pixels(6, 6, Pt2::new(1.0, 1.0), 400.0) {
        let a = truth.pixel_to_sky(&px);
        let b = wcs.pixel_to_sky(&px);
        assert_eq!(a, b);

        let back = wcs.sky_to_pixel(&b).unwrap();
        assert!((back - px).norm() < 1e-6, "{px:?} -> {back:?}");
    }
    assert!((wcs.pixel_scale_arcsec() - 3.5).abs() < 1e-9);
    assert!((wcs.rotation_degrees() + 72.0).abs() < 1e-9);
}

#[test]
fn galactic_header_has_no_radesys() {
    let truth = LinearTransform::new(
        field::pc_from_scale_rotation(10.0, 0.0, false),
        Pt2::new(0.0, 0.0),
        LonLat::new(0.0, 0.0),
    );
    let cards = model_for(CelestialFrame::Galactic, &truth).header_cards();
    let text: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
    assert!(text.iter().any(|c| c.contains("'GLON-TAN'")));
    assert!(text.iter().any(|c| c.contains("'GLAT-TAN'")));
    assert!(!text.iter().any(|c| c.starts_with("RADESYS")));
}

#[test]
fn noisy_field_residuals_are_bounded_by_noise() {
    let truth = LinearTransform::new(
        field::pc_from_scale_rotation(1.0, 10.0, false),
        Pt2::new(256.0, 256.0),
        LonLat::new(45.0, 45.0),
    );
    let pixels = field::grid_pixels(8, 8, Pt2::new(0.0, 0.0), 64.0);
    let noise = UniformSkyNoise {
        seed: 2024,
        max_abs_arcsec: 0.3,
    };
    let set = field::project_field(&truth, &pixels, CelestialFrame::Icrs, Some(&noise)).unwrap();

    let stats = model_for(CelestialFrame::Icrs, &truth).residuals(set.pixels(), &set.sky_lon_lat());
    assert_eq!(stats.count, 64);
    assert!(stats.max_arcsec <= 0.3 * 2.0_f64.sqrt() + 1e-6);
    assert!(stats.rms_arcsec > 0.0);
}
