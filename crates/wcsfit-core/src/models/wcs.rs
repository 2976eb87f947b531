//! Assembled celestial WCS.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    mat2_from_rows, CelestialFrame, LinearTransform, LonLat, Pt2, Real, ResidualStats,
    ARCSEC_PER_DEG,
};

/// A complete linear celestial WCS: keyword metadata plus numeric values.
///
/// Produced by the fitting pipeline and owned by the caller afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WcsModel {
    /// Three-letter projection code, e.g. `"TAN"`.
    pub projection: String,
    pub frame: CelestialFrame,
    pub ctype: [String; 2],
    pub cunit: [String; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radesys: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equinox: Option<Real>,
    pub crpix: [Real; 2],
    pub crval: [Real; 2],
    /// Row-major `[[PC1_1, PC1_2], [PC2_1, PC2_2]]`, degrees per pixel.
    pub pc: [[Real; 2]; 2],
}

impl WcsModel {
    /// Numeric part of the WCS.
    pub fn linear_transform(&self) -> LinearTransform {
        LinearTransform::new(
            mat2_from_rows(&self.pc),
            Pt2::new(self.crpix[0], self.crpix[1]),
            LonLat::new(self.crval[0], self.crval[1]),
        )
    }

    pub fn pixel_to_sky(&self, pixel: &Pt2) -> LonLat {
        self.linear_transform().pixel_to_sky(pixel)
    }

    pub fn sky_to_pixel(&self, sky: &LonLat) -> Option<Pt2> {
        self.linear_transform().sky_to_pixel(sky)
    }

    fn det(&self) -> Real {
        self.pc[0][0] * self.pc[1][1] - self.pc[0][1] * self.pc[1][0]
    }

    /// Mean of the column norms of PC, in arcseconds per pixel.
    pub fn pixel_scale_arcsec(&self) -> Real {
        let scale_x = self.pc[0][0].hypot(self.pc[1][0]);
        let scale_y = self.pc[0][1].hypot(self.pc[1][1]);
        0.5 * (scale_x + scale_y) * ARCSEC_PER_DEG
    }

    /// Position angle of the pixel +y axis, North through East, in degrees.
    pub fn rotation_degrees(&self) -> Real {
        self.pc[0][1].atan2(self.pc[1][1]).to_degrees()
    }

    /// `true` when the pixel grid has the same handedness as the sky
    /// (East to the right with North up), i.e. `det(PC) > 0`.
    pub fn is_mirrored(&self) -> bool {
        self.det() > 0.0
    }

    /// Angular residuals between the model and observed positions.
    ///
    /// Pairs are zipped; extra elements of the longer slice are ignored.
    pub fn residuals(&self, pixels: &[Pt2], sky: &[LonLat]) -> ResidualStats {
        let t = self.linear_transform();
        let errors: Vec<Real> = pixels
            .iter()
            .zip(sky)
            .map(|(px, obs)| t.pixel_to_sky(px).separation_deg(obs) * ARCSEC_PER_DEG)
            .collect();
        ResidualStats::from_errors(&errors)
    }

    /// FITS header cards in canonical order.
    pub fn header_cards(&self) -> Vec<HeaderCard> {
        let mut cards = vec![
            HeaderCard::new("WCSAXES", HeaderValue::Int(2)),
            HeaderCard::new("CTYPE1", HeaderValue::Str(self.ctype[0].clone())),
            HeaderCard::new("CTYPE2", HeaderValue::Str(self.ctype[1].clone())),
            HeaderCard::new("CUNIT1", HeaderValue::Str(self.cunit[0].clone())),
            HeaderCard::new("CUNIT2", HeaderValue::Str(self.cunit[1].clone())),
            HeaderCard::new("CRPIX1", HeaderValue::Float(self.crpix[0])),
            HeaderCard::new("CRPIX2", HeaderValue::Float(self.crpix[1])),
            HeaderCard::new("CRVAL1", HeaderValue::Float(self.crval[0])),
            HeaderCard::new("CRVAL2", HeaderValue::Float(self.crval[1])),
        ];
        for (i, row) in self.pc.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                cards.push(HeaderCard::new(
                    format!("PC{}_{}", i + 1, j + 1),
                    HeaderValue::Float(*v),
                ));
            }
        }
        if let Some(radesys) = &self.radesys {
            cards.push(HeaderCard::new("RADESYS", HeaderValue::Str(radesys.clone())));
        }
        if let Some(equinox) = self.equinox {
            cards.push(HeaderCard::new("EQUINOX", HeaderValue::Float(equinox)));
        }
        cards
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Int(i64),
    Float(Real),
    Str(String),
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Int(v) => write!(f, "{v:>20}"),
            // Reals always carry a fraction so readers do not take them for integers.
            HeaderValue::Float(v) => write!(f, "{:>20}", format!("{v:.15E}")),
            // FITS strings are quoted and padded to at least 8 characters.
            HeaderValue::Str(s) => write!(f, "'{:<8}'", s.replace('\'', "''")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCard {
    pub keyword: String,
    pub value: HeaderValue,
}

impl HeaderCard {
    pub fn new(keyword: impl Into<String>, value: HeaderValue) -> Self {
        Self {
            keyword: keyword.into(),
            value,
        }
    }
}

impl fmt::Display for HeaderCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8}= {}", self.keyword, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WcsModel {
        let s = 1.0 / 3600.0;
        WcsModel {
            projection: "TAN".to_string(),
            frame: CelestialFrame::Fk5 { equinox: 2000.0 },
            ctype: ["RA---TAN".to_string(), "DEC--TAN".to_string()],
            cunit: ["deg".to_string(), "deg".to_string()],
            radesys: Some("FK5".to_string()),
            equinox: Some(2000.0),
            crpix: [512.0, 256.0],
            crval: [150.0, 2.0],
            pc: [[-s, 0.0], [0.0, s]],
        }
    }

    #[test]
    fn header_card_order() {
        let keys: Vec<String> = sample()
            .header_cards()
            .into_iter()
            .map(|c| c.keyword)
            .collect();
        assert_eq!(
            keys,
            [
                "WCSAXES", "CTYPE1", "CTYPE2", "CUNIT1", "CUNIT2", "CRPIX1", "CRPIX2", "CRVAL1",
                "CRVAL2", "PC1_1", "PC1_2", "PC2_1", "PC2_2", "RADESYS", "EQUINOX"
            ]
        );
    }

    #[test]
    fn header_omits_absent_radesys() {
        let mut w = sample();
        w.radesys = None;
        w.equinox = None;
        let cards = w.header_cards();
        assert_eq!(cards.len(), 13);
        assert_eq!(cards.last().map(|c| c.keyword.as_str()), Some("PC2_2"));
    }

    #[test]
    fn card_formatting() {
        let card = HeaderCard::new("CTYPE1", HeaderValue::Str("RA---TAN".into()));
        assert_eq!(card.to_string(), "CTYPE1  = 'RA---TAN'");
        let card = HeaderCard::new("CUNIT1", HeaderValue::Str("deg".into()));
        assert_eq!(card.to_string(), "CUNIT1  = 'deg     '");
        let card = HeaderCard::new("WCSAXES", HeaderValue::Int(2));
        assert!(card.to_string().starts_with("WCSAXES = "));
        assert!(card.to_string().ends_with(" 2"));

        let card = HeaderCard::new("CRPIX1", HeaderValue::Float(512.0));
        assert_eq!(card.to_string(), "CRPIX1  =  5.120000000000000E2");
        let card = HeaderCard::new("PC1_2", HeaderValue::Float(0.0));
        assert!(card.to_string().ends_with(" 0.000000000000000E0"));
        let card = HeaderCard::new("PC1_1", HeaderValue::Float(-2.5e-4));
        assert!(card.to_string().ends_with("-2.500000000000000E-4"));
    }

    #[test]
    fn derived_quantities() {
        let w = sample();
        assert!((w.pixel_scale_arcsec() - 1.0).abs() < 1e-12);
        assert!(w.rotation_degrees().abs() < 1e-12);
        assert!(!w.is_mirrored());

        let mut flipped = w.clone();
        flipped.pc[0][0] = -flipped.pc[0][0];
        assert!(flipped.is_mirrored());
    }

    #[test]
    fn reference_pixel_and_residuals() {
        let w = sample();
        let sky = w.pixel_to_sky(&Pt2::new(512.0, 256.0));
        assert!((sky.lon - 150.0).abs() < 1e-12);
        assert!((sky.lat - 2.0).abs() < 1e-12);

        let px = [Pt2::new(512.0, 256.0), Pt2::new(600.0, 300.0)];
        let obs: Vec<LonLat> = px.iter().map(|p| w.pixel_to_sky(p)).collect();
        let stats = w.residuals(&px, &obs);
        assert_eq!(stats.count, 2);
        assert!(stats.max_arcsec < 1e-6);

        let shifted = [obs[0], LonLat::new(obs[1].lon, obs[1].lat + 1.0 / 3600.0)];
        let stats = w.residuals(&px, &shifted);
        assert!((stats.max_arcsec - 1.0).abs() < 1e-6);
    }

    #[test]
    fn json_roundtrip_keeps_values() {
        let w = sample();
        let json = serde_json::to_string(&w).unwrap();
        let back: WcsModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }
}
