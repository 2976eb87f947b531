//! Celestial frames, the gnomonic projection and the assembled WCS.
//!
//! The forward model is split in two stages:
//!
//! 1. [`LinearTransform`]: pixel offset from CRPIX → intermediate world
//!    coordinates through the PC matrix.
//! 2. [`gnomonic`]: intermediate world coordinates → sky via the `TAN`
//!    deprojection about CRVAL.
//!
//! [`WcsTemplateProvider`] supplies frame-specific keywords; [`WcsModel`]
//! combines both into a serializable result.

mod frame;
pub mod gnomonic;
mod transform;
mod wcs;

pub use frame::*;
pub use gnomonic::SkyPartials;
pub use transform::*;
pub use wcs::*;
