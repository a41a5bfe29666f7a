//! Structural checks run on raw upload text before any parsing.
//!
//! Both checks stop at the first problem found and report only that one.

use crate::domain::model::{ValidationKind, ValidationResult};
use serde_json::Value;

pub const EMPTY_FILE: &str = "Empty file";
pub const MISSING_HEADERS: &str = "No headers found in CSV";
pub const NOT_A_LIST: &str = "JSON must be a list of objects";
pub const EMPTY_LIST: &str = "Empty JSON list";
pub const NON_OBJECT_ITEM: &str = "All items must be objects";
pub const INVALID_JSON: &str = "Invalid JSON format";

pub fn column_mismatch_message(line: usize) -> String {
    format!("Inconsistent number of columns on line {}", line)
}

/// Checks that every data row has as many fields as the header row.
///
/// Leading and trailing whitespace around the document is ignored. A blank
/// line inside the data counts as a row with no fields. Data rows are
/// numbered from 1, the header excluded.
pub fn validate_csv_structure(content: &str) -> ValidationResult {
    let content = content.trim();
    if content.is_empty() {
        return ValidationResult::invalid(ValidationKind::Structural, EMPTY_FILE);
    }

    let mut rows = split_rows(content).into_iter();
    let header_width = match rows.next().map(count_fields) {
        Some(Ok(width)) if width > 0 => width,
        Some(Err(e)) => return ValidationResult::invalid(ValidationKind::Format, e.to_string()),
        _ => return ValidationResult::invalid(ValidationKind::Structural, MISSING_HEADERS),
    };

    for (index, row) in rows.enumerate() {
        let line = index + 1;
        match count_fields(row) {
            Ok(width) if width != header_width => {
                return ValidationResult::invalid(
                    ValidationKind::Shape,
                    column_mismatch_message(line),
                );
            }
            Ok(_) => {}
            Err(e) => return ValidationResult::invalid(ValidationKind::Format, e.to_string()),
        }
    }

    ValidationResult::valid()
}

/// Splits text into CSV rows at line breaks outside quoted fields.
/// A trailing `\r` is dropped from each row.
fn split_rows(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut rows = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut field_start = true;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' if in_quotes => {
                if bytes.get(i + 1) == Some(&b'"') {
                    i += 1;
                } else {
                    in_quotes = false;
                }
            }
            b'"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            b',' if !in_quotes => field_start = true,
            b'\n' if !in_quotes => {
                rows.push(content[start..i].trim_end_matches('\r'));
                start = i + 1;
                field_start = true;
            }
            _ => field_start = false,
        }
        i += 1;
    }
    rows.push(content[start..].trim_end_matches('\r'));
    rows
}

fn count_fields(row: &str) -> Result<usize, csv::Error> {
    if row.is_empty() {
        return Ok(0);
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(row.as_bytes());
    match reader.records().next() {
        Some(record) => Ok(record?.len()),
        None => Ok(0),
    }
}

/// Checks that the text is a non-empty JSON array of objects.
pub fn validate_json_structure(content: &str) -> ValidationResult {
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("JSON parse failure during validation: {}", e);
            return ValidationResult::invalid(ValidationKind::Format, INVALID_JSON);
        }
    };

    let Value::Array(items) = value else {
        return ValidationResult::invalid(ValidationKind::Shape, NOT_A_LIST);
    };

    if items.is_empty() {
        return ValidationResult::invalid(ValidationKind::Structural, EMPTY_LIST);
    }

    if !items.iter().all(Value::is_object) {
        return ValidationResult::invalid(ValidationKind::Shape, NON_OBJECT_ITEM);
    }

    ValidationResult::valid()
}
