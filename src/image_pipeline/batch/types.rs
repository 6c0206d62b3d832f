//! Batch quantification configuration types

use chrono::{Local, NaiveDate};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::quantify::{BackgroundCorrector, Cropper};
use crate::image_pipeline::records::WellIdParser;

/// What the batch does when one image fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the batch, reporting the file and stage that failed.
    #[default]
    FailFast,
    /// Log the failure and leave the image out of the output.
    SkipAndContinue,
}

/// Configuration for a quantification batch
#[derive(Debug, Clone)]
pub struct QuantConfig {
    /// Standard deviation of the Gaussian background estimate, in pixels
    pub sigma: f32,
    /// Share of each border removed before aggregation, in `[0, 0.5)`
    pub crop_fraction: f64,
    pub failure_policy: FailurePolicy,
    /// Process images on the rayon pool
    pub parallel: bool,
    /// Dedicated worker count; `None` uses rayon's global pool
    pub threads: Option<usize>,
    pub well_parser: WellIdParser,
    /// Date stamped on every record
    pub processing_date: NaiveDate,
}

impl Default for QuantConfig {
    fn default() -> Self {
        Self {
            sigma: 50.0,
            crop_fraction: 0.05,
            failure_policy: FailurePolicy::FailFast,
            parallel: true,
            threads: None,
            well_parser: WellIdParser::default(),
            processing_date: Local::now().date_naive(),
        }
    }
}

impl QuantConfig {
    pub fn builder() -> QuantConfigBuilder {
        QuantConfigBuilder::default()
    }

    /// Checks sigma and crop fraction.
    pub fn validate(&self) -> Result<()> {
        BackgroundCorrector::new(self.sigma)?;
        Cropper::new(self.crop_fraction)?;
        Ok(())
    }
}

/// Builder for QuantConfig
#[derive(Default)]
pub struct QuantConfigBuilder {
    sigma: Option<f32>,
    crop_fraction: Option<f64>,
    failure_policy: Option<FailurePolicy>,
    parallel: Option<bool>,
    threads: Option<Option<usize>>,
    well_parser: Option<WellIdParser>,
    processing_date: Option<NaiveDate>,
}

impl QuantConfigBuilder {
    pub fn sigma(mut self, sigma: f32) -> Self {
        self.sigma = Some(sigma);
        self
    }

    pub fn crop_fraction(mut self, fraction: f64) -> Self {
        self.crop_fraction = Some(fraction);
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn well_parser(mut self, parser: WellIdParser) -> Self {
        self.well_parser = Some(parser);
        self
    }

    pub fn processing_date(mut self, date: NaiveDate) -> Self {
        self.processing_date = Some(date);
        self
    }

    pub fn build(self) -> QuantConfig {
        let default = QuantConfig::default();
        QuantConfig {
            sigma: self.sigma.unwrap_or(default.sigma),
            crop_fraction: self.crop_fraction.unwrap_or(default.crop_fraction),
            failure_policy: self.failure_policy.unwrap_or(default.failure_policy),
            parallel: self.parallel.unwrap_or(default.parallel),
            threads: self.threads.unwrap_or(default.threads),
            well_parser: self.well_parser.unwrap_or(default.well_parser),
            processing_date: self.processing_date.unwrap_or(default.processing_date),
        }
    }
}
