use crate::core::csv_writer::write_csv_with_leading_header;
use crate::core::transformer::Transformer;
use crate::core::validator::{validate_csv_structure, validate_json_structure};
use crate::domain::model::{Record, RecordBatch, ValidationKind, ValidationResult};
use crate::utils::error::{ConvertError, Result};
use serde_json::Value;

/// Runs validate, parse, transform and serialize for both directions.
///
/// Holds no mutable state; one instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    transformer: Transformer,
}

impl Converter {
    pub fn new(transformer: Transformer) -> Self {
        Self { transformer }
    }

    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    /// Parses CSV text into normalized records. Every value is a string.
    pub fn csv_to_json(&self, content: &str) -> Result<RecordBatch> {
        ensure_valid(validate_csv_structure(content))?;

        let records = parse_csv_records(content)?;
        tracing::debug!("Parsed {} CSV rows", records.len());

        Ok(self.transformer.normalize_csv_data(records))
    }

    /// Converts a JSON array of objects into enriched CSV text.
    pub fn json_to_csv(&self, content: &str) -> Result<String> {
        ensure_valid(validate_json_structure(content))?;

        let records = parse_json_records(content)?;
        tracing::debug!("Parsed {} JSON records", records.len());

        let enriched = self.transformer.enrich_json_data(records);
        write_csv_with_leading_header(&enriched)
    }
}

fn ensure_valid(result: ValidationResult) -> Result<()> {
    if result.is_valid {
        return Ok(());
    }
    let kind = result.kind.unwrap_or(ValidationKind::Structural);
    let message = result
        .errors
        .into_iter()
        .next()
        .unwrap_or_else(|| "Validation failed".to_string());
    tracing::warn!("Rejected upload ({:?}): {}", kind, message);
    Err(ConvertError::validation(kind, message))
}

/// Reads rows keyed by the header row. Expects text already accepted by
/// `validate_csv_structure`, which rejects blank data lines, and applies the
/// same outer trimming.
pub fn parse_csv_records(content: &str) -> Result<RecordBatch> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.trim().as_bytes());
    let headers = reader.headers()?.clone();

    reader
        .records()
        .map(|row| -> Result<Record> {
            let row = row?;
            Ok(headers
                .iter()
                .zip(row.iter())
                .map(|(field, value)| (field, Value::String(value.to_string())))
                .collect::<Record>())
        })
        .collect()
}

pub fn parse_json_records(content: &str) -> Result<RecordBatch> {
    Ok(serde_json::from_str(content)?)
}
