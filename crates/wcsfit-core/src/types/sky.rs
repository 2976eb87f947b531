use serde::{Deserialize, Serialize};

use crate::{CelestialFrame, Real};

/// A frame-free spherical position in degrees.
///
/// Used for reference values (CRVAL) and projection points, whose frame is
/// implied by the correspondence set they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    /// Longitude (RA, GLON, ...) in degrees.
    pub lon: Real,
    /// Latitude (Dec, GLAT, ...) in degrees.
    pub lat: Real,
}

impl LonLat {
    pub const fn new(lon: Real, lat: Real) -> Self {
        Self { lon, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Great-circle separation in degrees (haversine form, stable for small angles).
    pub fn separation_deg(&self, other: &LonLat) -> Real {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let dlat = lat2 - lat1;
        let dlon = (other.lon - self.lon).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        (2.0 * a.sqrt().min(1.0).asin()).to_degrees()
    }
}

/// A sky position in degrees tagged with its celestial reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyPoint {
    pub lon: Real,
    pub lat: Real,
    pub frame: CelestialFrame,
}

impl SkyPoint {
    pub const fn new(lon: Real, lat: Real, frame: CelestialFrame) -> Self {
        Self { lon, lat, frame }
    }

    /// Drop the frame tag.
    #[inline]
    pub fn lon_lat(&self) -> LonLat {
        LonLat::new(self.lon, self.lat)
    }
}

/// Selects one output axis of the pixel-to-sky mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyAxis {
    /// First world axis (CTYPE1): RA, GLON, ELON, SLON.
    Longitude,
    /// Second world axis (CTYPE2): Dec, GLAT, ELAT, SLAT.
    Latitude,
}

impl SkyAxis {
    /// Zero-based row of the PC matrix that drives this axis.
    #[inline]
    pub fn pc_row(self) -> usize {
        match self {
            SkyAxis::Longitude => 0,
            SkyAxis::Latitude => 1,
        }
    }

    /// Pick this axis out of a position.
    #[inline]
    pub fn select(self, p: &LonLat) -> Real {
        match self {
            SkyAxis::Longitude => p.lon,
            SkyAxis::Latitude => p.lat,
        }
    }
}
