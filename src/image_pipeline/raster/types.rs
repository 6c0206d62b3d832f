//! Raster data types

use image::Luma;

use crate::image_pipeline::common::error::{QuantError, Result};

/// Single grayscale plane with `f32` intensities.
pub type GrayFrame = image::ImageBuffer<Luma<f32>, Vec<f32>>;

/// Decoded grayscale raster made of one or more equally sized frames.
///
/// Quantification only ever looks at the first frame; the remaining frames
/// (extra TIFF pages, split color channels) are carried through the transforms
/// so that a buffer keeps its shape from decode to aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    frames: Vec<GrayFrame>,
}

impl ImageBuffer {
    /// Builds a buffer from frames that must all share the same geometry.
    pub fn from_frames(frames: Vec<GrayFrame>) -> Result<Self> {
        let first = frames
            .first()
            .ok_or_else(|| QuantError::InvalidImageFormat("raster has no frames".to_string()))?;
        let (width, height) = first.dimensions();
        if width == 0 || height == 0 {
            return Err(QuantError::InvalidImageFormat(format!(
                "empty frame: {}x{}",
                width, height
            )));
        }

        for (index, frame) in frames.iter().enumerate() {
            if frame.dimensions() != (width, height) {
                let (w, h) = frame.dimensions();
                return Err(QuantError::InvalidImageFormat(format!(
                    "frame {} is {}x{}, expected {}x{}",
                    index, w, h, width, height
                )));
            }
            if frame.as_raw().iter().any(|v| !v.is_finite()) {
                return Err(QuantError::InvalidImageFormat(format!(
                    "frame {} contains non-finite samples",
                    index
                )));
            }
        }

        Ok(Self { frames })
    }

    /// Wraps a single frame.
    pub fn single(frame: GrayFrame) -> Result<Self> {
        Self::from_frames(vec![frame])
    }

    /// Builds a single-frame buffer from row-major samples.
    pub fn from_raw(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let len = data.len();
        let frame = GrayFrame::from_raw(width, height, data).ok_or_else(|| {
            QuantError::InvalidImageFormat(format!(
                "{} samples do not fill a {}x{} frame",
                len, width, height
            ))
        })?;
        Self::single(frame)
    }

    /// The frame every quantification step reads.
    pub fn first_frame(&self) -> &GrayFrame {
        &self.frames[0]
    }

    pub fn frames(&self) -> &[GrayFrame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_multi_frame(&self) -> bool {
        self.frames.len() > 1
    }

    pub fn width(&self) -> u32 {
        self.first_frame().width()
    }

    pub fn height(&self) -> u32 {
        self.first_frame().height()
    }

    /// Pixels per frame.
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Applies `f` to every frame, producing a new buffer.
    pub fn map_frames<F>(&self, f: F) -> Result<Self>
    where
        F: FnMut(&GrayFrame) -> GrayFrame,
    {
        Self::from_frames(self.frames.iter().map(f).collect())
    }
}
