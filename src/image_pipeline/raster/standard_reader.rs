use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::image_reader::ImageCrateReader;
use crate::image_pipeline::raster::reader::RasterReader;
use crate::image_pipeline::raster::tiff_reader::TiffRasterReader;
use crate::image_pipeline::raster::types::ImageBuffer;

const TIFF_LE_MAGIC: &[u8] = b"II*\0";
const TIFF_BE_MAGIC: &[u8] = b"MM\0*";
const BIGTIFF_LE_MAGIC: &[u8] = b"II+\0";
const BIGTIFF_BE_MAGIC: &[u8] = b"MM\0+";

/// Default reader: TIFF (multi-page aware) by magic bytes, everything else
/// through the `image` crate.
pub struct StandardRasterReader;

pub(crate) fn is_tiff(data: &[u8]) -> bool {
    [TIFF_LE_MAGIC, TIFF_BE_MAGIC, BIGTIFF_LE_MAGIC, BIGTIFF_BE_MAGIC]
        .iter()
        .any(|magic| data.starts_with(magic))
}

impl RasterReader for StandardRasterReader {
    fn read_raster(&self, data: &[u8]) -> Result<ImageBuffer> {
        if is_tiff(data) {
            TiffRasterReader.read_raster(data)
        } else {
            ImageCrateReader.read_raster(data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_tiff_magic() {
        assert!(is_tiff(b"II*\0\x08\0\0\0"));
        assert!(is_tiff(b"MM\0*\0\0\0\x08"));
        assert!(!is_tiff(b"\x89PNG\r\n\x1a\n"));
        assert!(!is_tiff(b"II"));
    }
}
