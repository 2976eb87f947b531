//! Celestial frames and the frame → WCS keyword template collaborator.
//!
//! Building an empty WCS for a frame and projection code is a pure lookup:
//! the frame selects the axis tags (`RA`/`DEC`, `GLON`/`GLAT`, ...) and the
//! `RADESYS`/`EQUINOX` keywords, the projection code completes `CTYPEi`.
//! The lookup sits behind [`WcsTemplateProvider`] so fitting code never
//! depends on a particular keyword convention.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Real;

/// Projection code used when the caller does not ask for another one.
pub const DEFAULT_PROJECTION: &str = "TAN";

fn default_j2000() -> Real {
    2000.0
}

fn default_b1950() -> Real {
    1950.0
}

/// Celestial reference frame of a sky position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CelestialFrame {
    #[default]
    Icrs,
    Fk5 {
        /// Julian epoch of the equinox.
        #[serde(default = "default_j2000")]
        equinox: Real,
    },
    Fk4 {
        /// Besselian epoch of the equinox.
        #[serde(default = "default_b1950")]
        equinox: Real,
    },
    Fk4NoETerms {
        #[serde(default = "default_b1950")]
        equinox: Real,
    },
    Galactic,
    Ecliptic,
    Supergalactic,
}

impl CelestialFrame {
    /// Four-character axis tags before padding, e.g. `("RA", "DEC")`.
    pub fn axis_tags(&self) -> (&'static str, &'static str) {
        match self {
            CelestialFrame::Icrs
            | CelestialFrame::Fk5 { .. }
            | CelestialFrame::Fk4 { .. }
            | CelestialFrame::Fk4NoETerms { .. } => ("RA", "DEC"),
            CelestialFrame::Galactic => ("GLON", "GLAT"),
            CelestialFrame::Ecliptic => ("ELON", "ELAT"),
            CelestialFrame::Supergalactic => ("SLON", "SLAT"),
        }
    }

    /// `RADESYS` value for equatorial frames.
    pub fn radesys(&self) -> Option<&'static str> {
        match self {
            CelestialFrame::Icrs => Some("ICRS"),
            CelestialFrame::Fk5 { .. } => Some("FK5"),
            CelestialFrame::Fk4 { .. } => Some("FK4"),
            CelestialFrame::Fk4NoETerms { .. } => Some("FK4-NO-E"),
            _ => None,
        }
    }

    /// `EQUINOX` value for frames that carry one.
    pub fn equinox(&self) -> Option<Real> {
        match *self {
            CelestialFrame::Fk5 { equinox }
            | CelestialFrame::Fk4 { equinox }
            | CelestialFrame::Fk4NoETerms { equinox } => Some(equinox),
            _ => None,
        }
    }
}

impl fmt::Display for CelestialFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CelestialFrame::Icrs => write!(f, "icrs"),
            CelestialFrame::Fk5 { equinox } => write!(f, "fk5(J{equinox:.1})"),
            CelestialFrame::Fk4 { equinox } => write!(f, "fk4(B{equinox:.1})"),
            CelestialFrame::Fk4NoETerms { equinox } => write!(f, "fk4-no-e(B{equinox:.1})"),
            CelestialFrame::Galactic => write!(f, "galactic"),
            CelestialFrame::Ecliptic => write!(f, "ecliptic"),
            CelestialFrame::Supergalactic => write!(f, "supergalactic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("projection code {0:?} must be three ASCII uppercase letters or digits")]
    InvalidProjection(String),
}

/// Frame- and projection-specific WCS keywords without numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WcsTemplate {
    pub projection: String,
    pub ctype: [String; 2],
    pub cunit: [String; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radesys: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equinox: Option<Real>,
}

/// Source of empty WCS templates keyed by frame and projection code.
pub trait WcsTemplateProvider {
    fn template(
        &self,
        frame: CelestialFrame,
        projection: &str,
    ) -> Result<WcsTemplate, TemplateError>;
}

/// FITS WCS paper II conventions for celestial `CTYPEi` keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitsConventions;

impl WcsTemplateProvider for FitsConventions {
    fn template(
        &self,
        frame: CelestialFrame,
        projection: &str,
    ) -> Result<WcsTemplate, TemplateError> {
        validate_projection_code(projection)?;
        let (lon_tag, lat_tag) = frame.axis_tags();
        Ok(WcsTemplate {
            projection: projection.to_string(),
            ctype: [ctype(lon_tag, projection), ctype(lat_tag, projection)],
            cunit: ["deg".to_string(), "deg".to_string()],
            radesys: frame.radesys().map(str::to_string),
            equinox: frame.equinox(),
        })
    }
}

/// Check that `code` is a well-formed three-character projection code.
pub fn validate_projection_code(code: &str) -> Result<(), TemplateError> {
    let ok = code.len() == 3
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(TemplateError::InvalidProjection(code.to_string()))
    }
}

/// Axis tag padded with `-` to four characters, then `-` and the code.
fn ctype(tag: &str, projection: &str) -> String {
    format!("{tag:-<4}-{projection}")
}
