//! Stain intensity quantification for plate microscopy images.
//!
//! Each image is background corrected, border cropped and reduced to a total
//! intensity and a count of zero-valued pixels, giving one table row per image.

pub mod image_pipeline;
pub mod logger;
