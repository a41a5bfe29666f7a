use chrono::NaiveDate;
use record_converter::core::csv_writer::write_csv_with_leading_header;
use record_converter::core::validator::{validate_csv_structure, validate_json_structure};
use record_converter::{Converter, FixedClock, NormalizationRules, Transformer};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

fn converter() -> Converter {
    let instant = NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|d| d.and_hms_micro_opt(8, 0, 5, 250_000))
        .unwrap();
    Converter::new(Transformer::new(
        NormalizationRules::default(),
        Arc::new(FixedClock::new(instant)),
    ))
}

#[test]
fn test_every_mismatched_row_position_is_reported() {
    for bad_line in 1..=5 {
        let rows: Vec<String> = (1..=5)
            .map(|line| {
                if line == bad_line {
                    format!("{},x,extra", line)
                } else {
                    format!("{},x", line)
                }
            })
            .collect();
        let content = format!("id,value\n{}", rows.join("\n"));

        let result = validate_csv_structure(&content);
        assert!(!result.is_valid);
        assert_eq!(
            result.first_error(),
            Some(format!("Inconsistent number of columns on line {}", bad_line).as_str())
        );
    }
}

#[test]
fn test_well_formed_csv_of_any_width_is_valid() {
    for width in 1..=6 {
        let header: Vec<String> = (0..width).map(|c| format!("col{}", c)).collect();
        let row: Vec<String> = (0..width).map(|c| format!("v{}", c)).collect();
        let content = format!("{}\n{}\n{}", header.join(","), row.join(","), row.join(","));
        assert!(validate_csv_structure(&content).is_valid, "width {}", width);
    }
}

#[test]
fn test_json_rejection_messages_are_distinct() {
    let messages: HashSet<String> = [r#"{"a": 1}"#, "[]", "[1, 2]", "{oops"]
        .iter()
        .map(|content| {
            let result = validate_json_structure(content);
            assert!(!result.is_valid);
            result.errors[0].clone()
        })
        .collect();
    assert_eq!(messages.len(), 4);

    assert!(validate_json_structure(r#"[{"a": 1}]"#).is_valid);
}

#[test]
fn test_enriched_timestamps_come_from_injected_clock() {
    let csv = converter()
        .json_to_csv(r#"[{"sku": "X-1"}, {"sku": "X-2"}]"#)
        .unwrap();

    assert_eq!(
        csv,
        "sku,record_id,processed_at\r\n\
         X-1,REC-0001,2025-06-01T08:00:05.250000\r\n\
         X-2,REC-0002,2025-06-01T08:00:05.250000\r\n"
    );
}

#[test]
fn test_extra_keys_in_later_records_are_dropped() {
    let csv = converter()
        .json_to_csv(r#"[{"name":"A"},{"name":"B","age":"1"}]"#)
        .unwrap();

    let header = csv.split("\r\n").next().unwrap();
    assert_eq!(header, "name,record_id,processed_at");
    assert!(!csv.contains(",1,"));
    assert!(csv.ends_with("\r\n"));
}

#[test]
fn test_empty_enriched_batch_serializes_to_nothing() {
    let transformer = converter().transformer().clone();
    let enriched = transformer.enrich_json_data(Vec::new());
    assert_eq!(write_csv_with_leading_header(&enriched).unwrap(), "");
}

#[test]
fn test_csv_json_csv_round_trip_keeps_row_count_and_values() {
    let converter = converter();
    let original = "name,country,score\n Ana ,  brazil ,10\nLi,CHINA,7\nOla,norway,3";

    let records = converter.csv_to_json(original).unwrap();
    let json = serde_json::to_string(&records).unwrap();
    let csv = converter.json_to_csv(&json).unwrap();

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);

    let values: Vec<(&str, &str, &str)> = rows.iter().map(|r| (&r[0], &r[1], &r[2])).collect();
    assert_eq!(
        values,
        vec![("Ana", "Brazil", "10"), ("Li", "China", "7"), ("Ola", "Norway", "3")]
    );
}

#[test]
fn test_normalization_twice_equals_once() {
    let transformer = converter().transformer().clone();
    let records = serde_json::from_value(json!([
        {"name": "  mIxEd  ", "city": " sÃO pAULO ", "state": "new  york"},
        {"name": "x", "country": "côte d'ivoire"}
    ]))
    .unwrap();

    let once = transformer.normalize_csv_data(records);
    let twice = transformer.normalize_csv_data(once.clone());
    assert_eq!(once, twice);
}
