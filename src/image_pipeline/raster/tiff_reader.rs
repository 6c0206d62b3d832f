//! TIFF raster reader built on the `tiff` crate.
//!
//! Microscope exports are usually TIFF, often with several pages (z-planes,
//! time points or duplicate acquisitions). Every page is decoded; interleaved
//! channels within a page are split into separate frames so that the first
//! frame of the resulting buffer is always the first plane of the file.

use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::{debug, warn};

use crate::image_pipeline::common::error::{QuantError, Result};
use crate::image_pipeline::raster::reader::{RasterReader, split_channels};
use crate::image_pipeline::raster::types::{GrayFrame, ImageBuffer};

pub struct TiffRasterReader;

/// Sample types that can be scaled into [0, 1].
trait Sample: Copy {
    fn normalized(self) -> f32;
}

impl Sample for u8 {
    fn normalized(self) -> f32 {
        self as f32 / u8::MAX as f32
    }
}

impl Sample for u16 {
    fn normalized(self) -> f32 {
        self as f32 / u16::MAX as f32
    }
}

impl Sample for u32 {
    fn normalized(self) -> f32 {
        (self as f64 / u32::MAX as f64) as f32
    }
}

impl Sample for u64 {
    fn normalized(self) -> f32 {
        (self as f64 / u64::MAX as f64) as f32
    }
}

fn normalize<T: Sample>(buf: &[T]) -> Vec<f32> {
    buf.iter().map(|&v| v.normalized()).collect()
}

/// Float pages have no fixed full scale. Pages already in [0, 1] are kept;
/// pages holding raw counts are divided by their own peak.
fn normalize_float(samples: Vec<f32>, page: usize) -> Result<Vec<f32>> {
    if let Some(bad) = samples.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(QuantError::InvalidImageFormat(format!(
            "page {}: float sample {} outside [0, inf)",
            page, bad
        )));
    }

    let peak = samples.iter().copied().fold(0.0f32, f32::max);
    if peak <= 1.0 {
        return Ok(samples);
    }

    warn!(page, peak, "Float TIFF page exceeds 1.0, rescaling by its peak");
    Ok(samples.into_iter().map(|v| v / peak).collect())
}

fn channel_count(color_type: ColorType) -> Result<usize> {
    match color_type {
        ColorType::Gray(_) => Ok(1),
        ColorType::GrayA(_) => Ok(2),
        ColorType::RGB(_) => Ok(3),
        ColorType::RGBA(_) => Ok(4),
        other => Err(QuantError::InvalidImageFormat(format!(
            "unsupported TIFF color type {:?}",
            other
        ))),
    }
}

impl TiffRasterReader {
    fn read_page<R: std::io::Read + std::io::Seek>(
        decoder: &mut Decoder<R>,
        page: usize,
    ) -> Result<Vec<GrayFrame>> {
        let (width, height) = decoder
            .dimensions()
            .map_err(|e| QuantError::DecodeFailure(format!("page {}: {}", page, e)))?;
        let color_type = decoder
            .colortype()
            .map_err(|e| QuantError::DecodeFailure(format!("page {}: {}", page, e)))?;
        let channels = channel_count(color_type)?;

        debug!(page, width, height, ?color_type, "Decoding TIFF page");

        let samples = match decoder
            .read_image()
            .map_err(|e| QuantError::DecodeFailure(format!("page {}: {}", page, e)))?
        {
            DecodingResult::U8(buf) => normalize(&buf),
            DecodingResult::U16(buf) => normalize(&buf),
            DecodingResult::U32(buf) => normalize(&buf),
            DecodingResult::U64(buf) => normalize(&buf),
            DecodingResult::F32(buf) => normalize_float(buf, page)?,
            DecodingResult::F64(buf) => {
                normalize_float(buf.into_iter().map(|v| v as f32).collect(), page)?
            }
            _ => {
                return Err(QuantError::InvalidImageFormat(format!(
                    "page {}: unsupported TIFF sample type",
                    page
                )));
            }
        };

        split_channels(width, height, channels, &samples)
    }
}

impl RasterReader for TiffRasterReader {
    fn read_raster(&self, data: &[u8]) -> Result<ImageBuffer> {
        debug!("Decoding TIFF raster, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data))
            .map_err(|e| QuantError::DecodeFailure(e.to_string()))?;

        let mut frames = Self::read_page(&mut decoder, 0)?;
        let mut page = 1;
        while decoder.more_images() {
            decoder
                .next_image()
                .map_err(|e| QuantError::DecodeFailure(format!("page {}: {}", page, e)))?;
            frames.extend(Self::read_page(&mut decoder, page)?);
            page += 1;
        }

        debug!(pages = page, frames = frames.len(), "TIFF decoded");
        ImageBuffer::from_frames(frames)
    }
}
