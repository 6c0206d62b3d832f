//! Background correction.
//!
//! The illumination field is estimated with a wide Gaussian blur. Instead of
//! subtracting it, each pixel is raised by how far the local background sits
//! from the median background, the result is clipped to full scale and then
//! inverted against its own maximum. After inversion the flat background lands
//! at (or very near) zero and stained, darker structures become bright.

use imageproc::filter::gaussian_blur_f32;
use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{QuantError, Result};
use crate::image_pipeline::raster::{GrayFrame, ImageBuffer};

/// Full-scale intensity of a normalized raster.
pub const MAX_INTENSITY: f32 = 1.0;

/// Largest accepted blur sigma, in pixels. The blur kernel spans about six
/// sigmas, so this already covers frames far wider than any micrograph.
pub const MAX_SIGMA: f32 = 10_000.0;

#[derive(Debug, Clone, Copy)]
pub struct BackgroundCorrector {
    sigma: f32,
}

impl BackgroundCorrector {
    pub fn new(sigma: f32) -> Result<Self> {
        if !sigma.is_finite() || sigma <= 0.0 || sigma > MAX_SIGMA {
            return Err(QuantError::InvalidSigma(sigma));
        }
        Ok(Self { sigma })
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// Corrects every frame independently and returns a new buffer.
    #[instrument(skip(self, image), fields(sigma = self.sigma, frames = image.frame_count()))]
    pub fn correct(&self, image: &ImageBuffer) -> Result<ImageBuffer> {
        image.map_frames(|frame| correct_frame(frame, self.sigma))
    }
}

/// Median with numpy semantics: the mean of the two central values when the
/// length is even.
pub(crate) fn median(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    let mid = sorted.len() / 2;
    let (lower, upper, _) = sorted.select_nth_unstable_by(mid, f32::total_cmp);
    let upper = *upper;
    if values.len() % 2 == 1 {
        upper
    } else {
        let below = lower.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        (below + upper) / 2.0
    }
}

pub(crate) fn correct_frame(frame: &GrayFrame, sigma: f32) -> GrayFrame {
    let background = gaussian_blur_f32(frame, sigma);
    let background_median = median(background.as_raw());

    let mut corrected = frame.clone();
    for (pixel, bg) in corrected.pixels_mut().zip(background.pixels()) {
        let raised = pixel.0[0] + (background_median - bg.0[0]).abs();
        pixel.0[0] = raised.min(MAX_INTENSITY);
    }

    let peak = corrected
        .pixels()
        .map(|p| p.0[0])
        .fold(f32::NEG_INFINITY, f32::max);
    for pixel in corrected.pixels_mut() {
        pixel.0[0] = peak - pixel.0[0];
    }

    debug!(background_median, peak, "Frame corrected");
    corrected
}
