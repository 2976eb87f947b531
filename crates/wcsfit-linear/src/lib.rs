//! Closed-form initialization for linear WCS fitting.
//!
//! Two stages, both cheap and non-iterative:
//! - [`normalize_correspondences`]: re-center pixel and sky positions about a
//!   projection point (the centroid unless one is supplied),
//! - [`initial_linear_transform`]: ordinary least squares from pixel offsets
//!   to sky offsets, giving a first-order PC matrix.
//!
//! The estimate ignores projection curvature and is meant to seed
//! `wcsfit-optim`.

mod initial_guess;
mod normalize;

pub use initial_guess::*;
pub use normalize::*;
