//! Input data and result summaries.

mod correspondence;
mod residuals;
mod sky;

pub use correspondence::*;
pub use residuals::*;
pub use sky::*;
