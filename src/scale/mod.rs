//! Threshold color classification.

mod color;
mod threshold;

pub use color::*;
pub use threshold::*;
