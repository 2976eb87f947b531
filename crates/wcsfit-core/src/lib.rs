//! Core types and the forward projection model for `wcsfit`.
//!
//! This crate contains:
//! - linear algebra type aliases (`Real`, `Vec2`, `Pt2`, `Mat2`) and angle helpers,
//! - the input data model ([`CorrespondenceSet`], [`SkyPoint`], [`ProjectionPoint`]),
//! - celestial frames and FITS keyword templates ([`WcsTemplateProvider`]),
//! - the gnomonic (`TAN`) projection and the assembled [`WcsModel`],
//! - deterministic synthetic fields for tests and demos.
//!
//! Forward model:
//! `sky = tan_deproject(PC · (pixel − CRPIX), CRVAL)`

/// Linear algebra type aliases and angle helpers.
pub mod math;
/// Frames, projection model and WCS container.
pub mod models;
/// Deterministic synthetic correspondence sets.
pub mod synthetic;
/// Input data and residual summaries.
pub mod types;

pub use math::*;
pub use models::*;
pub use types::*;
