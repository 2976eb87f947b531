use log::debug;
use wcsfit_core::{CelestialFrame, LinearTransform, WcsModel, WcsTemplate};

/// Fill a keyword template with numeric values.
///
/// Keyword content (CTYPE, CUNIT, RADESYS, EQUINOX, projection code) comes
/// from `template` unchanged; CRPIX, CRVAL and PC come from `transform`.
pub fn assemble_wcs(
    template: WcsTemplate,
    frame: CelestialFrame,
    transform: &LinearTransform,
) -> WcsModel {
    debug!(
        "assembling {} WCS in {frame}: crpix=({}, {}) crval=({}, {})",
        template.projection,
        transform.crpix.x,
        transform.crpix.y,
        transform.crval.lon,
        transform.crval.lat
    );
    WcsModel {
        projection: template.projection,
        frame,
        ctype: template.ctype,
        cunit: template.cunit,
        radesys: template.radesys,
        equinox: template.equinox,
        crpix: [transform.crpix.x, transform.crpix.y],
        crval: [transform.crval.lon, transform.crval.lat],
        pc: transform.pc_rows(),
    }
}
