use serde::{Deserialize, Serialize};
use wcsfit_core::{
    CelestialFrame, CorrespondenceError, CorrespondenceSet, ProjectionPoint, Pt2, Real, SkyPoint,
};

/// One correspondence in the JSON input format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: Real,
    pub y: Real,
    pub lon: Real,
    pub lat: Real,
    /// Overrides the input-level frame for this point. Mixed frames are
    /// rejected during conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<CelestialFrame>,
}

/// JSON input of a single fit.
///
/// ```json
/// {
///   "frame": { "type": "icrs" },
///   "points": [ { "x": 10.0, "y": 12.5, "lon": 150.1, "lat": 2.2 } ],
///   "projection_point": { "pixel": [512.0, 512.0], "sky": { "lon": 150.0, "lat": 2.0 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitInput {
    #[serde(default)]
    pub frame: CelestialFrame,
    pub points: Vec<PointRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_point: Option<ProjectionPoint>,
}

impl FitInput {
    pub fn from_correspondences(
        set: &CorrespondenceSet,
        projection_point: Option<ProjectionPoint>,
    ) -> Self {
        let points = set
            .iter()
            .map(|(px, s)| PointRecord {
                x: px.x,
                y: px.y,
                lon: s.lon,
                lat: s.lat,
                frame: None,
            })
            .collect();
        Self {
            frame: set.frame(),
            points,
            projection_point,
        }
    }

    /// Validated correspondence set.
    pub fn to_correspondences(&self) -> Result<CorrespondenceSet, CorrespondenceError> {
        let pixels = self.points.iter().map(|p| Pt2::new(p.x, p.y)).collect();
        let sky = self
            .points
            .iter()
            .map(|p| SkyPoint::new(p.lon, p.lat, p.frame.unwrap_or(self.frame)))
            .collect();
        CorrespondenceSet::new(pixels, sky)
    }
}
