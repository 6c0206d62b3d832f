//! Per-image quantification stages
//!
//! Background correction, border cropping and intensity aggregation. Each
//! stage takes a buffer by reference and returns a fresh one.

mod aggregate;
mod background;
mod crop;

pub use aggregate::{IntensityAggregator, IntensityStats};
pub use background::{BackgroundCorrector, MAX_INTENSITY, MAX_SIGMA};
pub use crop::{Cropper, border_pixels};
