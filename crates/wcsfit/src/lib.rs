//! High-level entry crate for `wcsfit`.
//!
//! Fits a linear gnomonic (`TAN`) World Coordinate System to matched
//! pixel ↔ sky reference points. Two complementary APIs:
//!
//! ## 1. One-call pipeline
//!
//! ```
//! use wcsfit::prelude::*;
//! use wcsfit::core::synthetic::field;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let truth = LinearTransform::new(
//!     field::pc_from_scale_rotation(1.5, 20.0, false),
//!     Pt2::new(512.0, 512.0),
//!     LonLat::new(150.0, 2.2),
//! );
//! let pixels = field::grid_pixels(5, 5, Pt2::new(312.0, 312.0), 100.0);
//! let set = field::project_field(&truth, &pixels, CelestialFrame::Icrs, None)?;
//!
//! let report = fit_wcs(&set, None, &FitConfig::default())?;
//! assert_eq!(report.wcs.ctype[0], "RA---TAN");
//! assert!((report.wcs.pixel_scale_arcsec() - 1.5).abs() < 1e-3);
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Building blocks
//!
//! Run the stages yourself to inspect the closed-form guess before
//! refinement, or to plug in another [`optim::NllsSolverBackend`]:
//!
//! ```
//! use wcsfit::core::{synthetic::field, CelestialFrame, LinearTransform, LonLat, Pt2};
//! use wcsfit::linear::{initial_linear_transform, normalize_correspondences};
//! use wcsfit::optim::{refine_two_pass, LmBackend, SolveOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let truth = LinearTransform::new(
//!     field::pc_from_scale_rotation(1.0, 0.0, false),
//!     Pt2::new(100.0, 100.0),
//!     LonLat::new(10.0, 45.0),
//! );
//! let pixels = field::grid_pixels(5, 5, Pt2::new(0.0, 0.0), 50.0);
//! let set = field::project_field(&truth, &pixels, CelestialFrame::Icrs, None)?;
//! let sky = set.sky_lon_lat();
//!
//! let data = normalize_correspondences(set.pixels(), &sky, None)?;
//! let guess = initial_linear_transform(&data)?;
//! let refined = refine_two_pass(set.pixels(), &sky, &guess, &LmBackend, &SolveOptions::default())?;
//! assert_eq!(refined.passes.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - **[`core`]**: math aliases, data model, frames, projection model, WCS container
//! - **[`linear`]**: re-centering and closed-form initial guess
//! - **[`optim`]**: least-squares problems and the Levenberg-Marquardt backend
//! - **[`pipeline`]**: end-to-end fitting, JSON formats, batch fitting
//! - **[`prelude`]**: convenient re-exports for common use cases

/// Core math types, data model and the forward projection model.
pub mod core {
    pub use wcsfit_core::*;
}

/// Closed-form initialization.
pub mod linear {
    pub use wcsfit_linear::*;
}

/// Non-linear least-squares refinement.
pub mod optim {
    pub use wcsfit_optim::*;
}

/// All-in-one fitting functions and serializable input/config/report types.
pub mod pipeline {
    pub use wcsfit_pipeline::*;
}

/// Convenient re-exports for common use cases.
///
/// Import with `use wcsfit::prelude::*;` to get started quickly.
pub mod prelude {
    pub use crate::core::{
        CelestialFrame, CorrespondenceSet, LinearTransform, LonLat, ProjectionPoint, Pt2,
        SkyPoint, WcsModel,
    };
    pub use crate::pipeline::{
        fit_wcs, fit_wcs_batch, run_fit, FitConfig, FitError, FitInput, FitReport,
        RefineStrategy,
    };
}
