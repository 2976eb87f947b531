//! Residual factors.
//!
//! A factor evaluates the residual of one observation and its analytic
//! derivatives with respect to the PC matrix. Problems in
//! [`crate::problems`] assemble factors into dense residual vectors and
//! Jacobians.

pub mod sky;
