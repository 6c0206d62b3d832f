//! Output record types

use serde::Serialize;

use crate::image_pipeline::quantify::IntensityStats;

/// Per-image metadata supplied alongside the numeric results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMetadata {
    /// File name of the source image, without directory.
    pub filename: String,
    /// Directory the image was read from.
    pub directory: String,
    /// Processing date, `YYYY-MM-DD`.
    pub date: String,
    /// Normalized well identifier.
    pub well: String,
}

/// One row of the batch output table.
///
/// The non-black count is always derived from the total and black counts, so
/// `non_black_pixels + count_black_pixels == total_pixels_in_image` holds for
/// every record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntensityRecord {
    filename: String,
    total_intensity: f64,
    #[serde(rename = "count_blackPixels")]
    count_black_pixels: u64,
    #[serde(rename = "non_blackPixels")]
    non_black_pixels: u64,
    #[serde(rename = "totalPixels_inImage")]
    total_pixels_in_image: u64,
    crop: f64,
    sigma_gblur: f32,
    directory: String,
    date: String,
    #[serde(rename = "Well")]
    well: String,
}

impl IntensityRecord {
    pub fn new(metadata: RecordMetadata, stats: IntensityStats, crop: f64, sigma: f32) -> Self {
        Self {
            filename: metadata.filename,
            total_intensity: stats.total_intensity(),
            count_black_pixels: stats.black_pixel_count(),
            non_black_pixels: stats.non_black_pixels(),
            total_pixels_in_image: stats.total_pixels(),
            crop,
            sigma_gblur: sigma,
            directory: metadata.directory,
            date: metadata.date,
            well: metadata.well,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn total_intensity(&self) -> f64 {
        self.total_intensity
    }

    pub fn count_black_pixels(&self) -> u64 {
        self.count_black_pixels
    }

    pub fn non_black_pixels(&self) -> u64 {
        self.non_black_pixels
    }

    pub fn total_pixels_in_image(&self) -> u64 {
        self.total_pixels_in_image
    }

    pub fn crop(&self) -> f64 {
        self.crop
    }

    pub fn sigma_gblur(&self) -> f32 {
        self.sigma_gblur
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn well(&self) -> &str {
        &self.well
    }
}
