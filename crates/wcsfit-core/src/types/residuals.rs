use serde::{Deserialize, Serialize};

use crate::Real;

/// Summary statistics for on-sky residuals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualStats {
    /// Mean angular residual in arcseconds.
    pub mean_arcsec: Real,
    /// Root mean square angular residual in arcseconds.
    pub rms_arcsec: Real,
    /// Largest angular residual in arcseconds.
    pub max_arcsec: Real,
    /// Number of points evaluated.
    pub count: usize,
}

impl ResidualStats {
    /// Compute statistics from per-point angular errors (arcseconds).
    pub fn from_errors(errors: &[Real]) -> Self {
        if errors.is_empty() {
            return Self {
                mean_arcsec: 0.0,
                rms_arcsec: 0.0,
                max_arcsec: 0.0,
                count: 0,
            };
        }

        let n = errors.len() as Real;
        let sum: Real = errors.iter().sum();
        let sum_sq: Real = errors.iter().map(|e| e * e).sum();
        let max = errors.iter().copied().fold(0.0, Real::max);

        Self {
            mean_arcsec: sum / n,
            rms_arcsec: (sum_sq / n).sqrt(),
            max_arcsec: max,
            count: errors.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_known_errors() {
        let s = ResidualStats::from_errors(&[3.0, 4.0]);
        assert_eq!(s.count, 2);
        assert!((s.mean_arcsec - 3.5).abs() < 1e-12);
        assert!((s.rms_arcsec - (12.5_f64).sqrt()).abs() < 1e-12);
        assert_eq!(s.max_arcsec, 4.0);
    }

    #[test]
    fn empty_errors_are_zero() {
        let s = ResidualStats::from_errors(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.rms_arcsec, 0.0);
    }
}
