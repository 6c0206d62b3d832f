//! Raster reader for the non-TIFF formats handled by the `image` crate
//! (PNG, JPEG, BMP, ...).

use tracing::debug;

use crate::image_pipeline::common::error::{QuantError, Result};
use crate::image_pipeline::raster::reader::{RasterReader, split_channels};
use crate::image_pipeline::raster::types::ImageBuffer;

pub struct ImageCrateReader;

impl RasterReader for ImageCrateReader {
    fn read_raster(&self, data: &[u8]) -> Result<ImageBuffer> {
        debug!("Decoding raster with image crate, {} bytes", data.len());

        let decoded =
            image::load_from_memory(data).map_err(|e| QuantError::DecodeFailure(e.to_string()))?;
        let (width, height) = (decoded.width(), decoded.height());
        let channels = decoded.color().channel_count() as usize;

        // `to_*32f` scales integer samples into [0, 1].
        let samples: Vec<f32> = match channels {
            1 => decoded.to_luma32f().into_raw(),
            2 => decoded.to_luma_alpha32f().into_raw(),
            3 => decoded.to_rgb32f().into_raw(),
            4 => decoded.to_rgba32f().into_raw(),
            n => {
                return Err(QuantError::InvalidImageFormat(format!(
                    "unsupported channel count {}",
                    n
                )));
            }
        };

        ImageBuffer::from_frames(split_channels(width, height, channels, &samples)?)
    }
}
