//! Raster decoding module
//!
//! This module turns encoded image files into grayscale `ImageBuffer`s.

mod image_reader;
mod reader;
mod standard_reader;
mod tiff_reader;
pub mod types;

pub use image_reader::ImageCrateReader;
pub use reader::RasterReader;
pub use standard_reader::StandardRasterReader;
pub use tiff_reader::TiffRasterReader;
pub use types::{GrayFrame, ImageBuffer};
