use std::fmt;

use thiserror::Error;

/// Pipeline stage an image was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decode,
    Correct,
    Crop,
    Aggregate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Decode => "decode",
            Stage::Correct => "correct",
            Stage::Crop => "crop",
            Stage::Aggregate => "aggregate",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum QuantError {
    #[error("Invalid image format: {0}")]
    InvalidImageFormat(String),

    #[error("Invalid crop fraction {0}: must be in [0, 0.5) and leave at least one pixel")]
    InvalidCropFraction(f64),

    #[error("Invalid blur sigma {0}: must be finite, > 0 and at most 10000")]
    InvalidSigma(f32),

    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),

    #[error("Failed to write output: {0}")]
    OutputWriteError(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("{file}: {stage} stage failed: {source}")]
    ImageFailed {
        file: String,
        stage: Stage,
        #[source]
        source: Box<QuantError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl QuantError {
    /// Tags this error with the file and stage it came from.
    pub fn at(self, file: impl Into<String>, stage: Stage) -> Self {
        QuantError::ImageFailed {
            file: file.into(),
            stage,
            source: Box::new(self),
        }
    }

    /// The innermost error, with any file/stage wrapping removed.
    pub fn root(&self) -> &QuantError {
        match self {
            QuantError::ImageFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuantError>;
