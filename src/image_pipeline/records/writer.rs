use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::records::types::IntensityRecord;

pub trait RecordWriter {
    fn write_records(&self, records: &[IntensityRecord], output: &mut dyn Write) -> Result<()>;
}
