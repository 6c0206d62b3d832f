//! Batch orchestration module
//!
//! Input discovery, batch configuration and the per-image pipeline.

mod discovery;
mod pipeline;
pub mod types;

#[cfg(test)]
mod tests;

pub use discovery::{SUPPORTED_EXTENSIONS, discover_images, is_supported_image};
pub use pipeline::BatchPipeline;
pub use types::{FailurePolicy, QuantConfig, QuantConfigBuilder};
