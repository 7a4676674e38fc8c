//! Value types for color handling.

mod color;
mod xy;

pub use color::Color;
pub use xy::{ColorXy, UnclampedRgb};
