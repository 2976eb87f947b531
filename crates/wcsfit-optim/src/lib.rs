//! Levenberg-Marquardt refinement of linear `TAN` transforms.
//!
//! The solver sees a problem only through [`NllsProblem`] residual and
//! Jacobian methods; [`LmBackend`] drives the `levenberg-marquardt` crate.
//! Residuals come from the gnomonic forward model in `wcsfit-core` with
//! analytic derivatives ([`factors::sky`]).
//!
//! Entry points are [`refine_two_pass`] and [`refine_joint`].

mod backend_lm;
pub mod factors;
pub mod problems;
mod refine;
mod traits;

pub use backend_lm::LmBackend;
pub use problems::{AxisRefineProblem, JointRefineProblem};
pub use refine::*;
pub use traits::*;
