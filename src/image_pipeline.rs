//! Image quantification pipeline module
//!
//! This module provides a structured approach to stain-intensity quantification,
//! with separate modules for raster decoding, the numeric stages, output records
//! and batch orchestration.

pub mod batch;
pub mod common;
pub mod quantify;
pub mod raster;
pub mod records;

pub use common::{
    QuantError,
    Result,
    Stage,
};

pub use raster::{
    GrayFrame,
    ImageBuffer,
    ImageCrateReader,
    RasterReader,
    StandardRasterReader,
    TiffRasterReader,
};

pub use quantify::{
    BackgroundCorrector,
    Cropper,
    IntensityAggregator,
    IntensityStats,
};

pub use records::{
    CsvRecordWriter,
    IntensityRecord,
    RecordMetadata,
    RecordWriter,
    WellIdParser,
    normalize_well,
};

pub use batch::{
    BatchPipeline,
    FailurePolicy,
    QuantConfig,
    QuantConfigBuilder,
    discover_images,
};
