use std::io::Write;

use tracing::debug;

use crate::image_pipeline::common::error::{QuantError, Result};
use crate::image_pipeline::records::types::IntensityRecord;
use crate::image_pipeline::records::writer::RecordWriter;

/// Column order of the output table.
pub const CSV_HEADER: [&str; 10] = [
    "filename",
    "total_intensity",
    "count_blackPixels",
    "non_blackPixels",
    "totalPixels_inImage",
    "crop",
    "sigma_gblur",
    "directory",
    "date",
    "Well",
];

pub struct CsvRecordWriter;

impl RecordWriter for CsvRecordWriter {
    fn write_records(&self, records: &[IntensityRecord], output: &mut dyn Write) -> Result<()> {
        debug!("Writing {} records as CSV", records.len());

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(output);

        // Written explicitly so an empty batch still produces a header row.
        writer
            .write_record(CSV_HEADER)
            .map_err(|e| QuantError::OutputWriteError(e.to_string()))?;
        for record in records {
            writer
                .serialize(record)
                .map_err(|e| QuantError::OutputWriteError(e.to_string()))?;
        }
        writer.flush()?;

        Ok(())
    }
}
