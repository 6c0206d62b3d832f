//! Symmetric border crop.

use image::imageops;
use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{QuantError, Result};
use crate::image_pipeline::raster::ImageBuffer;

#[derive(Debug, Clone, Copy)]
pub struct Cropper {
    fraction: f64,
}

/// Pixels removed from each side of an axis of length `extent`.
///
/// Rounds half to even, so 2.5 px becomes 2 and 3.5 px becomes 4.
pub fn border_pixels(fraction: f64, extent: u32) -> u32 {
    (fraction * extent as f64).round_ties_even() as u32
}

impl Cropper {
    /// `fraction` is the share removed from each side, in `[0, 0.5)`.
    pub fn new(fraction: f64) -> Result<Self> {
        if !(0.0..0.5).contains(&fraction) {
            return Err(QuantError::InvalidCropFraction(fraction));
        }
        Ok(Self { fraction })
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    #[instrument(skip(self, image), fields(fraction = self.fraction))]
    pub fn crop(&self, image: &ImageBuffer) -> Result<ImageBuffer> {
        if self.fraction == 0.0 {
            return Ok(image.clone());
        }

        let (width, height) = (image.width(), image.height());
        let dx = border_pixels(self.fraction, width);
        let dy = border_pixels(self.fraction, height);
        let kept_w = width.saturating_sub(2 * dx);
        let kept_h = height.saturating_sub(2 * dy);
        if kept_w == 0 || kept_h == 0 {
            return Err(QuantError::InvalidCropFraction(self.fraction));
        }

        debug!(width, height, dx, dy, kept_w, kept_h, "Cropping border");
        image.map_frames(|frame| imageops::crop_imm(frame, dx, dy, kept_w, kept_h).to_image())
    }
}
