// File: crates/timechart-core/tests/source.rs
// Purpose: Metric document decoding and its error cases.

use timechart_core::{parse_metric_document, read_metric_file, Accessors, ChartError, Series};

const DOC: &str = r#"[
  {
    "metricName": "Calls per Minute",
    "metricValues": [
      { "startTimeInMillis": 1488330000000, "value": 12, "min": 4, "max": 20 },
      { "startTimeInMillis": 1488326400000, "value": 7, "min": 2, "max": 9 }
    ]
  }
]"#;

#[test]
fn decodes_metric_values_with_extra_fields() {
    let obs = parse_metric_document(DOC).unwrap();
    assert_eq!(obs.len(), 2);
    assert_eq!(obs[0].time.timestamp_millis(), 1_488_330_000_000);
    assert_eq!(obs[0].value, 12.0);
    assert_eq!(obs[0].field_f64("min"), Some(4.0));
    assert!(!obs[0].fields.contains_key("startTimeInMillis"));

    let s = Series::new("atvp1xabts512", obs, Accessors::value_field("min")).unwrap();
    assert_eq!(s.points().collect::<Vec<_>>(), vec![(1_488_326_400_000, 2.0), (1_488_330_000_000, 4.0)]);
}

#[test]
fn non_series_documents_are_type_mismatches() {
    for doc in [r#"{ "metricValues": [] }"#, "[]", r#"[{ "name": "x" }]"#, r#"[{ "metricValues": 3 }]"#] {
        let err = parse_metric_document(doc).unwrap_err();
        assert!(matches!(err, ChartError::TypeMismatch { .. }), "{doc}: {err:?}");
    }
}

#[test]
fn malformed_records_are_json_errors() {
    let err = parse_metric_document(r#"[{ "metricValues": [{ "value": 1 }] }]"#).unwrap_err();
    assert!(matches!(err, ChartError::Json(_)));
    let err = parse_metric_document("not json").unwrap_err();
    assert!(matches!(err, ChartError::Json(_)));
}

#[test]
fn out_of_range_timestamps_are_rejected() {
    let doc = format!(r#"[{{ "metricValues": [{{ "startTimeInMillis": {}, "value": 1 }}] }}]"#, i64::MAX);
    let err = parse_metric_document(&doc).unwrap_err();
    assert!(matches!(err, ChartError::InvalidTimestamp(ms) if ms == i64::MAX));
}

#[test]
fn reads_documents_from_disk() {
    let path = std::path::PathBuf::from("target/test_out/metric.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, DOC).unwrap();
    assert_eq!(read_metric_file(&path).unwrap().len(), 2);

    let err = read_metric_file("target/test_out/does_not_exist.json").unwrap_err();
    assert!(matches!(err, ChartError::Io(_)));
}
