//! Delimited text export of retrieved sample buffers.

use std::fs::File;
use std::path::Path;

use crate::{Error, Result};

/// Write one column per channel with a `Sample;Ch1;Ch2;...` header.
pub fn write_channels<P: AsRef<Path>>(path: P, channels: &[Vec<f32>]) -> Result<()> {
    write_table(path.as_ref(), "Ch", channels)
}

/// Write one column per segment with a `Sample;Segment1;...` header.
pub fn write_segments<P: AsRef<Path>>(path: P, segments: &[Vec<f32>]) -> Result<()> {
    write_table(path.as_ref(), "Segment", segments)
}

fn write_table(path: &Path, label: &str, columns: &[Vec<f32>]) -> Result<()> {
    let file = File::create(path).map_err(Error::Io)?;
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);

    let mut header = vec!["Sample".to_owned()];
    header.extend((1..=columns.len()).map(|column| format!("{}{}", label, column)));
    writer.write_record(&header).map_err(|error| Error::Other(Box::new(error)))?;

    let rows = columns.iter().map(Vec::len).min().unwrap_or(0);
    let mut record = Vec::with_capacity(columns.len() + 1);
    for row in 0..rows {
        record.clear();
        record.push(row.to_string());
        record.extend(columns.iter().map(|column| column[row].to_string()));
        writer.write_record(&record).map_err(|error| Error::Other(Box::new(error)))?;
    }
    writer.flush().map_err(|error| Error::Other(Box::new(error)))?;
    log::info!("data written to {}", path.display());
    Ok(())
}

/// Parse a file produced by this module back into its data columns,
/// dropping the leading sample-index column.
pub fn read_back<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f32>>> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    let mut reader = csv::ReaderBuilder::new().delimiter(b';').from_reader(file);
    let columns = reader.headers().map_err(|error| Error::Other(Box::new(error)))?.len();
    let mut data = vec![Vec::new(); columns.saturating_sub(1)];
    for record in reader.records() {
        let record = record.map_err(|error| Error::Other(Box::new(error)))?;
        for (column, field) in record.iter().skip(1).enumerate() {
            let value = field.parse::<f32>().map_err(|error| Error::Other(Box::new(error)))?;
            data[column].push(value);
        }
    }
    Ok(data)
}
