//! Intensity aggregation over the first frame of a corrected buffer.

use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::ImageBuffer;

/// Reduction of one frame's intensities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityStats {
    total_intensity: f64,
    black_pixel_count: u64,
    total_pixels: u64,
}

impl IntensityStats {
    /// Returns `None` when more pixels are black than the frame holds.
    pub fn new(total_intensity: f64, black_pixel_count: u64, total_pixels: u64) -> Option<Self> {
        (black_pixel_count <= total_pixels).then_some(Self {
            total_intensity,
            black_pixel_count,
            total_pixels,
        })
    }

    /// Sum of all intensities in the frame.
    pub fn total_intensity(&self) -> f64 {
        self.total_intensity
    }

    /// Samples exactly equal to zero.
    pub fn black_pixel_count(&self) -> u64 {
        self.black_pixel_count
    }

    /// Samples in the frame.
    pub fn total_pixels(&self) -> u64 {
        self.total_pixels
    }

    pub fn non_black_pixels(&self) -> u64 {
        self.total_pixels - self.black_pixel_count
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntensityAggregator;

impl IntensityAggregator {
    /// Sums the first frame and counts its zero-valued samples.
    pub fn aggregate(&self, image: &ImageBuffer) -> Result<IntensityStats> {
        let frame = image.first_frame();

        let (total_intensity, black_pixel_count) = frame.as_raw().iter().fold(
            (0.0f64, 0u64),
            |(sum, black), &v| (sum + v as f64, black + u64::from(v == 0.0)),
        );

        // Zeros are counted within the frame, so they never exceed its size.
        let stats = IntensityStats {
            total_intensity,
            black_pixel_count,
            total_pixels: image.pixel_count() as u64,
        };
        debug!(?stats, "Aggregated first frame");
        Ok(stats)
    }
}
