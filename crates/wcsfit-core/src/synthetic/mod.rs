//! Deterministic synthetic data generation helpers.
//!
//! Small building blocks for constructing synthetic astrometric fields used
//! in tests and demos:
//! - pixel grids and PC matrices from scale/rotation,
//! - projection of pixels through a ground-truth transform into a
//!   [`crate::CorrespondenceSet`],
//! - deterministic pseudo-random sky noise.
//!
//! Everything is deterministic (explicit seeds; stable point ordering).
//!
//! # Example
//!
//! ```
//! use wcsfit_core::{synthetic::field, CelestialFrame, LinearTransform, LonLat, Pt2};
//!
//! let pc = field::pc_from_scale_rotation(1.2, 15.0, false);
//! let truth = LinearTransform::new(pc, Pt2::new(512.0, 512.0), LonLat::new(150.0, 2.2));
//! let pixels = field::grid_pixels(5, 4, Pt2::new(100.0, 100.0), 200.0);
//! let set = field::project_field(&truth, &pixels, CelestialFrame::Icrs, None).unwrap();
//! assert_eq!(set.len(), 20);
//! ```

pub mod field;
pub mod noise;
