//! Output records module
//!
//! Record assembly metadata (well identifiers) and the table sink.

mod csv_writer;
pub mod types;
mod well;
mod writer;

pub use csv_writer::{CSV_HEADER, CsvRecordWriter};
pub use types::{IntensityRecord, RecordMetadata};
pub use well::{WellIdParser, normalize_well};
pub use writer::RecordWriter;
