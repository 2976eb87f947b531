//! Least-squares problems over the PC matrix.
//!
//! CRPIX and CRVAL are fixed in every problem; only PC coefficients are free.
//!
//! - [`AxisRefineProblem`]: one PC row against one observed sky axis.
//! - [`JointRefineProblem`]: all four coefficients against both axes.

mod axis_refine;
mod joint_refine;

pub use axis_refine::*;
pub use joint_refine::*;
