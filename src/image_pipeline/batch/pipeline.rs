use std::path::Path;

use rayon::iter::{FromParallelIterator, IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::{
    batch::types::{FailurePolicy, QuantConfig},
    common::error::{QuantError, Result, Stage},
    quantify::{BackgroundCorrector, Cropper, IntensityAggregator, IntensityStats},
    raster::{RasterReader, StandardRasterReader},
    records::{IntensityRecord, RecordMetadata},
};

/// Runs decode → correct → crop → aggregate for every input and assembles
/// one record per image, in input order.
pub struct BatchPipeline<R: RasterReader> {
    reader: R,
    config: QuantConfig,
    corrector: BackgroundCorrector,
    cropper: Cropper,
    aggregator: IntensityAggregator,
}

impl BatchPipeline<StandardRasterReader> {
    pub fn new(config: QuantConfig) -> Result<Self> {
        Self::with_custom(StandardRasterReader, config)
    }
}

impl<R: RasterReader + Sync> BatchPipeline<R> {
    pub fn with_custom(reader: R, config: QuantConfig) -> Result<Self> {
        let corrector = BackgroundCorrector::new(config.sigma)?;
        let cropper = Cropper::new(config.crop_fraction)?;
        Ok(Self {
            reader,
            config,
            corrector,
            cropper,
            aggregator: IntensityAggregator,
        })
    }

    /// Decodes `data` and reduces it to intensity statistics. Errors are
    /// tagged with `file` and the failing stage.
    pub fn quantify(&self, file: &str, data: &[u8]) -> Result<IntensityStats> {
        let image = {
            let _span = tracing::info_span!("decode").entered();
            self.reader
                .read_raster(data)
                .map_err(|e| e.at(file, Stage::Decode))?
        };

        let corrected = {
            let _span = tracing::info_span!("correct",
                width = image.width(),
                height = image.height(),
                frames = image.frame_count()
            )
            .entered();
            self.corrector
                .correct(&image)
                .map_err(|e| e.at(file, Stage::Correct))?
        };

        let cropped = {
            let _span = tracing::info_span!("crop").entered();
            self.cropper
                .crop(&corrected)
                .map_err(|e| e.at(file, Stage::Crop))?
        };

        let _span = tracing::info_span!("aggregate").entered();
        self.aggregator
            .aggregate(&cropped)
            .map_err(|e| e.at(file, Stage::Aggregate))
    }

    /// Quantifies already loaded bytes of the image at `path`.
    #[instrument(skip(self, path, data), fields(file = %path.display(), input_size = data.len()))]
    pub fn process(&self, path: &Path, data: &[u8]) -> Result<IntensityRecord> {
        let stats = self.quantify(&path.display().to_string(), data)?;
        let record = IntensityRecord::new(
            self.metadata(path),
            stats,
            self.config.crop_fraction,
            self.config.sigma,
        );

        debug!(
            total_intensity = record.total_intensity(),
            black = record.count_black_pixels(),
            pixels = record.total_pixels_in_image(),
            "Image quantified"
        );
        Ok(record)
    }

    pub fn process_file(&self, path: &Path) -> Result<IntensityRecord> {
        let data = std::fs::read(path).map_err(|e| {
            QuantError::DecodeFailure(e.to_string()).at(path.display().to_string(), Stage::Decode)
        })?;
        self.process(path, &data)
    }

    /// Quantifies every path. Output order always matches `paths`.
    #[instrument(skip(self, paths), fields(images = paths.len()))]
    pub fn run<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Result<Vec<IntensityRecord>> {
        info!(
            sigma = self.config.sigma,
            crop = self.config.crop_fraction,
            policy = ?self.config.failure_policy,
            parallel = self.config.parallel,
            "Starting batch"
        );

        let records = match self.config.failure_policy {
            FailurePolicy::FailFast => {
                self.collect_outcomes::<P, Result<Vec<IntensityRecord>>>(paths)??
            }
            FailurePolicy::SkipAndContinue => {
                let outcomes: Vec<Result<IntensityRecord>> = self.collect_outcomes(paths)?;
                outcomes
                    .into_iter()
                    .filter_map(|outcome| match outcome {
                        Ok(record) => Some(record),
                        Err(e) => {
                            warn!(error = %e, "Skipping image");
                            None
                        }
                    })
                    .collect()
            }
        };

        info!(
            records = records.len(),
            skipped = paths.len() - records.len(),
            "Batch complete"
        );
        Ok(records)
    }

    fn collect_outcomes<P, C>(&self, paths: &[P]) -> Result<C>
    where
        P: AsRef<Path> + Sync,
        C: FromIterator<Result<IntensityRecord>>
            + FromParallelIterator<Result<IntensityRecord>>
            + Send,
    {
        let process = |path: &P| self.process_file(path.as_ref());

        if !self.config.parallel {
            return Ok(paths.iter().map(process).collect());
        }

        match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| QuantError::ThreadPool(e.to_string()))?;
                Ok(pool.install(|| paths.par_iter().map(process).collect()))
            }
            None => Ok(paths.par_iter().map(process).collect()),
        }
    }

    fn metadata(&self, path: &Path) -> RecordMetadata {
        RecordMetadata {
            filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            directory: path
                .parent()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
            date: self.config.processing_date.format("%Y-%m-%d").to_string(),
            well: self.config.well_parser.parse(path),
        }
    }

    pub fn config(&self) -> &QuantConfig {
        &self.config
    }
}
