//! Pixel ↔ sky correspondence sets.
//!
//! A [`CorrespondenceSet`] is the canonical input of every fitting stage:
//! matched reference points with known pixel positions and known sky
//! positions, all expressed in one celestial frame.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CelestialFrame, LonLat, Pt2, SkyPoint};

/// Minimum number of correspondences that constrains a 2-parameter-per-axis fit.
pub const MIN_CORRESPONDENCES: usize = 3;

/// Invalid correspondence data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorrespondenceError {
    #[error("correspondence set is empty")]
    Empty,
    #[error("pixel / sky point counts must match: {pixels} vs {sky}")]
    LengthMismatch { pixels: usize, sky: usize },
    #[error("need at least {required} correspondences, got {found}")]
    TooFew { found: usize, required: usize },
    #[error("sky point {index} is in frame {found}, expected {expected}")]
    MixedFrames {
        index: usize,
        expected: CelestialFrame,
        found: CelestialFrame,
    },
    #[error("correspondence {index} has a non-finite coordinate")]
    NonFinite { index: usize },
    #[error("sky point {index} has latitude {lat} outside [-90, 90]")]
    LatitudeOutOfRange { index: usize, lat: f64 },
}

/// Where the tangent plane touches the sphere: a reference pixel and the sky
/// position it maps to (CRPIX / CRVAL).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub pixel: Pt2,
    pub sky: LonLat,
}

impl ProjectionPoint {
    pub fn new(pixel: Pt2, sky: LonLat) -> Self {
        Self { pixel, sky }
    }
}

/// Ordered pixel/sky correspondences sharing one celestial frame.
///
/// # Example
///
/// ```
/// use wcsfit_core::{CelestialFrame, CorrespondenceSet, Pt2, SkyPoint};
///
/// let frame = CelestialFrame::Icrs;
/// let set = CorrespondenceSet::new(
///     vec![Pt2::new(10.0, 10.0), Pt2::new(90.0, 15.0), Pt2::new(40.0, 80.0)],
///     vec![
///         SkyPoint::new(150.01, 2.00, frame),
///         SkyPoint::new(149.99, 2.00, frame),
///         SkyPoint::new(150.00, 2.02, frame),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.frame(), CelestialFrame::Icrs);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrespondenceSet {
    pixels: Vec<Pt2>,
    sky: Vec<SkyPoint>,
    frame: CelestialFrame,
}

impl CorrespondenceSet {
    /// Validate and build a correspondence set.
    ///
    /// # Errors
    ///
    /// Returns an error if the collections are empty, differ in length, hold
    /// fewer than [`MIN_CORRESPONDENCES`] pairs, mix celestial frames, contain
    /// non-finite values or latitudes outside `[-90, 90]`.
    pub fn new(pixels: Vec<Pt2>, sky: Vec<SkyPoint>) -> Result<Self, CorrespondenceError> {
        if pixels.is_empty() && sky.is_empty() {
            return Err(CorrespondenceError::Empty);
        }
        if pixels.len() != sky.len() {
            return Err(CorrespondenceError::LengthMismatch {
                pixels: pixels.len(),
                sky: sky.len(),
            });
        }
        if pixels.len() < MIN_CORRESPONDENCES {
            return Err(CorrespondenceError::TooFew {
                found: pixels.len(),
                required: MIN_CORRESPONDENCES,
            });
        }

        let frame = sky[0].frame;
        for (index, (px, s)) in pixels.iter().zip(sky.iter()).enumerate() {
            if s.frame != frame {
                return Err(CorrespondenceError::MixedFrames {
                    index,
                    expected: frame,
                    found: s.frame,
                });
            }
            if !(px.x.is_finite() && px.y.is_finite() && s.lon.is_finite() && s.lat.is_finite()) {
                return Err(CorrespondenceError::NonFinite { index });
            }
            if s.lat.abs() > 90.0 {
                return Err(CorrespondenceError::LatitudeOutOfRange { index, lat: s.lat });
            }
        }

        Ok(Self { pixels, sky, frame })
    }

    /// Number of correspondences.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false for a validated set; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[Pt2] {
        &self.pixels
    }

    #[inline]
    pub fn sky(&self) -> &[SkyPoint] {
        &self.sky
    }

    /// Sky positions without frame tags.
    pub fn sky_lon_lat(&self) -> Vec<LonLat> {
        self.sky.iter().map(SkyPoint::lon_lat).collect()
    }

    /// The single celestial frame shared by every sky point.
    #[inline]
    pub fn frame(&self) -> CelestialFrame {
        self.frame
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Pt2, &SkyPoint)> {
        self.pixels.iter().zip(self.sky.iter())
    }
}

impl<'de> Deserialize<'de> for CorrespondenceSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            pixels: Vec<Pt2>,
            sky: Vec<SkyPoint>,
        }

        let raw = Raw::deserialize(deserializer)?;
        CorrespondenceSet::new(raw.pixels, raw.sky).map_err(serde::de::Error::custom)
    }
}
