use crate::image_pipeline::common::error::{QuantError, Result};
use crate::image_pipeline::raster::types::{GrayFrame, ImageBuffer};

pub trait RasterReader {
    fn read_raster(&self, data: &[u8]) -> Result<ImageBuffer>;
}

/// Splits interleaved samples into one frame per channel, in channel order.
pub(crate) fn split_channels(
    width: u32,
    height: u32,
    channels: usize,
    samples: &[f32],
) -> Result<Vec<GrayFrame>> {
    let pixels = width as usize * height as usize;
    if channels == 0 || samples.len() != pixels * channels {
        return Err(QuantError::InvalidImageFormat(format!(
            "{} samples for {}x{} with {} channel(s)",
            samples.len(),
            width,
            height,
            channels
        )));
    }

    (0..channels)
        .map(|channel| {
            let plane: Vec<f32> = samples
                .iter()
                .skip(channel)
                .step_by(channels)
                .copied()
                .collect();
            GrayFrame::from_raw(width, height, plane).ok_or_else(|| {
                QuantError::InvalidImageFormat(format!("channel {} has the wrong length", channel))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_channels_deinterleaves() {
        let samples = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let frames = split_channels(2, 1, 3, &samples).unwrap();

        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].as_raw(), &vec![0.1, 0.4]);
        assert_eq!(frames[1].as_raw(), &vec![0.2, 0.5]);
        assert_eq!(frames[2].as_raw(), &vec![0.3, 0.6]);
    }

    #[test]
    fn test_split_channels_rejects_length_mismatch() {
        let result = split_channels(2, 2, 3, &[0.0; 11]);
        assert!(matches!(result, Err(QuantError::InvalidImageFormat(_))));
    }
}
