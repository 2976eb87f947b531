use serde::{Deserialize, Serialize};
use wcsfit_core::{Real, DEFAULT_PROJECTION};
use wcsfit_optim::SolveOptions;

/// How the PC matrix is refined after the closed-form guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefineStrategy {
    /// Longitude row, then latitude row.
    #[default]
    TwoPass,
    /// All four coefficients at once.
    Joint,
}

/// Levenberg-Marquardt settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub max_iters: usize,
    pub ftol: Real,
    pub xtol: Real,
    pub gtol: Real,
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let o = SolveOptions::default();
        Self {
            max_iters: o.max_iters,
            ftol: o.ftol,
            xtol: o.xtol,
            gtol: o.gtol,
            verbose: o.verbose,
        }
    }
}

impl SolverConfig {
    pub fn to_options(&self) -> SolveOptions {
        SolveOptions {
            max_iters: self.max_iters,
            ftol: self.ftol,
            gtol: self.gtol,
            xtol: self.xtol,
            verbose: self.verbose,
        }
    }
}

/// Fit configuration. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Projection code; only `"TAN"` can be fitted.
    pub projection: String,
    pub strategy: RefineStrategy,
    pub solver: SolverConfig,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            projection: DEFAULT_PROJECTION.to_string(),
            strategy: RefineStrategy::default(),
            solver: SolverConfig::default(),
        }
    }
}
