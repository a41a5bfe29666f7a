use crate::adapters::clock::SystemClock;
use crate::core::rules::NormalizationRules;
use crate::domain::model::{Record, RecordBatch};
use crate::domain::ports::Clock;
use chrono::NaiveDateTime;
use serde_json::Value;
use std::sync::Arc;

pub const RECORD_ID_FIELD: &str = "record_id";
pub const PROCESSED_AT_FIELD: &str = "processed_at";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// `REC-` followed by the 1-based position, zero-padded to four digits.
pub fn format_record_id(position: usize) -> String {
    format!("REC-{:04}", position)
}

pub fn format_timestamp(instant: NaiveDateTime) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Normalizes parsed CSV rows and enriches parsed JSON records.
#[derive(Clone)]
pub struct Transformer {
    rules: NormalizationRules,
    clock: Arc<dyn Clock>,
}

impl Transformer {
    pub fn new(rules: NormalizationRules, clock: Arc<dyn Clock>) -> Self {
        Self { rules, clock }
    }

    pub fn rules(&self) -> &NormalizationRules {
        &self.rules
    }

    /// Trims every string value and applies the per-field rule. Non-string
    /// values pass through. Record and field order are preserved.
    pub fn normalize_csv_data(&self, records: RecordBatch) -> RecordBatch {
        records
            .into_iter()
            .map(|record| {
                record
                    .data
                    .into_iter()
                    .map(|(field, value)| {
                        let value = match value {
                            Value::String(s) => Value::String(self.rules.rule_for(&field).apply(&s)),
                            other => other,
                        };
                        (field, value)
                    })
                    .collect::<Record>()
            })
            .collect()
    }

    /// Appends `record_id` and `processed_at` to each record. Ids follow input
    /// position; the clock is read once per record.
    pub fn enrich_json_data(&self, records: RecordBatch) -> RecordBatch {
        records
            .into_iter()
            .enumerate()
            .map(|(index, mut record)| {
                record.insert(RECORD_ID_FIELD, format_record_id(index + 1));
                record.insert(PROCESSED_AT_FIELD, format_timestamp(self.clock.now()));
                record
            })
            .collect()
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(NormalizationRules::default(), Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for Transformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transformer")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use chrono::NaiveDate;
    use serde_json::json;

    fn fixed_transformer() -> Transformer {
        let instant = NaiveDate::from_ymd_opt(2024, 3, 20)
            .and_then(|d| d.and_hms_micro_opt(14, 45, 0, 42))
            .unwrap();
        Transformer::new(NormalizationRules::default(), Arc::new(FixedClock::new(instant)))
    }

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_title_cases_location_fields_only() {
        let transformer = fixed_transformer();
        let input = vec![
            record(json!({"name": "John Doe", "city": "NEW YORK"})),
            record(json!({"name": "Jane", "city": "los angeles"})),
        ];

        let output = transformer.normalize_csv_data(input);

        assert_eq!(
            output,
            vec![
                record(json!({"name": "John Doe", "city": "New York"})),
                record(json!({"name": "Jane", "city": "Los Angeles"})),
            ]
        );
    }

    #[test]
    fn test_normalize_trims_and_preserves_name_casing() {
        let transformer = fixed_transformer();
        let input = vec![record(json!({
            "name": "  JOHN DOE ",
            "Country": " united states ",
            "STATE": "new mexico",
            "age": " 30 "
        }))];

        let output = transformer.normalize_csv_data(input);

        assert_eq!(output[0].get_str("name"), Some("JOHN DOE"));
        assert_eq!(output[0].get_str("Country"), Some("United States"));
        assert_eq!(output[0].get_str("STATE"), Some("New Mexico"));
        assert_eq!(output[0].get_str("age"), Some("30"));
    }

    #[test]
    fn test_normalize_passes_non_strings_through_and_keeps_order() {
        let transformer = fixed_transformer();
        let input = vec![record(json!({"zip": 10001, "city": " boston", "active": true, "note": null}))];

        let output = transformer.normalize_csv_data(input);

        let names: Vec<&str> = output[0].field_names().map(String::as_str).collect();
        assert_eq!(names, vec!["zip", "city", "active", "note"]);
        assert_eq!(output[0].get("zip"), Some(&json!(10001)));
        assert_eq!(output[0].get("active"), Some(&json!(true)));
        assert_eq!(output[0].get("note"), Some(&json!(null)));
        assert_eq!(output[0].get_str("city"), Some("Boston"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let transformer = fixed_transformer();
        let input = vec![
            record(json!({"name": " Ann ", "city": "sAN  fRANCISCO ", "state": "ca"})),
            record(json!({"name": "bob", "country": "o'higgins"})),
        ];

        let once = transformer.normalize_csv_data(input);
        let twice = transformer.normalize_csv_data(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_empty_batch() {
        assert!(fixed_transformer().normalize_csv_data(Vec::new()).is_empty());
    }

    #[test]
    fn test_normalize_uses_configured_rules() {
        let transformer = Transformer::new(
            NormalizationRules::with_title_case_fields(["name"]),
            Arc::new(SystemClock),
        );
        let output = transformer.normalize_csv_data(vec![record(json!({"name": "jane doe", "city": "PARIS"}))]);
        assert_eq!(output[0].get_str("name"), Some("Jane Doe"));
        assert_eq!(output[0].get_str("city"), Some("PARIS"));
    }

    #[test]
    fn test_enrich_appends_sequential_ids_and_timestamps() {
        let transformer = fixed_transformer();
        let input = vec![
            record(json!({"name": "A"})),
            record(json!({"name": "B", "age": "1"})),
            record(json!({})),
        ];

        let output = transformer.enrich_json_data(input);

        assert_eq!(output.len(), 3);
        assert_eq!(
            output[0],
            record(json!({
                "name": "A",
                "record_id": "REC-0001",
                "processed_at": "2024-03-20T14:45:00.000042"
            }))
        );
        let names: Vec<&str> = output[1].field_names().map(String::as_str).collect();
        assert_eq!(names, vec!["name", "age", "record_id", "processed_at"]);
        assert_eq!(output[2].get_str(RECORD_ID_FIELD), Some("REC-0003"));
    }

    #[test]
    fn test_enrich_ids_ignore_content() {
        let transformer = fixed_transformer();
        let input = (0..12)
            .map(|i| record(json!({"record_id": format!("stale-{}", i)})))
            .collect();

        let output = transformer.enrich_json_data(input);

        let ids: Vec<&str> = output.iter().filter_map(|r| r.get_str(RECORD_ID_FIELD)).collect();
        assert_eq!(ids[0], "REC-0001");
        assert_eq!(ids[9], "REC-0010");
        assert_eq!(ids[11], "REC-0012");
    }

    #[test]
    fn test_format_record_id_padding() {
        assert_eq!(format_record_id(1), "REC-0001");
        assert_eq!(format_record_id(9999), "REC-9999");
        assert_eq!(format_record_id(12345), "REC-12345");
    }
}
