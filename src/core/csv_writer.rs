use crate::domain::model::Record;
use crate::utils::error::{ConvertError, Result};
use serde_json::Value;

/// Columns for the whole batch: the keys of the first record, in its order.
/// Later records never contribute columns.
pub fn leading_header(batch: &[Record]) -> Vec<String> {
    batch
        .first()
        .map(|record| record.field_names().cloned().collect())
        .unwrap_or_default()
}

/// Text for one cell. Missing values and `null` become empty cells; nested
/// values are written as compact JSON.
pub fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Writes `batch` as CSV with the header taken from record 0.
///
/// Records missing a header column get an empty cell, keys absent from the
/// header are dropped. Rows end with CRLF, including the last one. An empty
/// batch produces an empty string with no header row.
pub fn write_csv_with_leading_header(batch: &[Record]) -> Result<String> {
    if batch.is_empty() {
        return Ok(String::new());
    }

    let header = leading_header(batch);
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(&header)?;
    for record in batch {
        writer.write_record(header.iter().map(|column| render_cell(record.get(column))))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ConvertError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        ConvertError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
