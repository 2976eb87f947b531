//! End-to-end pixel/sky correspondence → `TAN` WCS fitting.
//!
//! Pipeline: re-center about the projection point, closed-form PC guess,
//! Levenberg-Marquardt refinement, assembly into a [`WcsModel`] with
//! frame keywords from a [`WcsTemplateProvider`].
//!
//! [`fit_wcs`] is the programmatic entry point; [`run_fit`] consumes the
//! JSON [`FitInput`] format used by the CLI.
//!
//! [`WcsModel`]: wcsfit_core::WcsModel
//! [`WcsTemplateProvider`]: wcsfit_core::WcsTemplateProvider

mod assemble;
mod batch;
mod config;
mod fit;
mod input;

pub use assemble::*;
pub use batch::*;
pub use config::*;
pub use fit::*;
pub use input::*;
