// File: crates/timechart-core/tests/series_find.rs
// Purpose: Series construction, validation, ordering and nearest-point lookup.

use chrono::DateTime;
use timechart_core::{Accessors, ChartError, Observation, Series, TimeAccessor, ValidationError, ValueAccessor};

fn obs(ms: i64, v: f64) -> Observation {
    Observation::from_millis(ms, v).expect("in range")
}

fn at(ms: i64) -> DateTime<chrono::Utc> {
    DateTime::from_timestamp_millis(ms).expect("in range")
}

fn series(points: &[(i64, f64)]) -> Series {
    Series::new("s", points.iter().map(|&(x, y)| obs(x, y)).collect(), Accessors::default()).expect("valid series")
}

fn found(s: &Series, ms: i64) -> Option<i64> {
    s.find(at(ms)).map(|o| o.time.timestamp_millis())
}

#[test]
fn find_returns_point_at_or_before_target() {
    let s = series(&[(0, 1.0), (10, 2.0), (20, 3.0)]);
    assert_eq!(found(&s, 0), Some(0), "exact hit on the first point matches");
    assert_eq!(found(&s, 9), Some(0));
    assert_eq!(found(&s, 10), Some(10));
    assert_eq!(found(&s, 15), Some(10));
    assert_eq!(found(&s, 20), Some(20));
}

#[test]
fn find_before_first_is_none() {
    let s = series(&[(0, 1.0), (10, 2.0), (20, 3.0)]);
    assert_eq!(found(&s, -1), None);
}

#[test]
fn find_past_last_respects_gap() {
    let s = series(&[(0, 1.0), (10, 2.0), (20, 3.0)]);
    assert_eq!(found(&s, 25), Some(20));
    assert_eq!(found(&s, 30), Some(20), "distance equal to the gap still matches");
    assert_eq!(found(&s, 31), None);
}

#[test]
fn single_point_matches_every_later_query() {
    let s = series(&[(5, 4.0)]);
    assert_eq!(found(&s, 4), None);
    assert_eq!(found(&s, 5), Some(5));
    assert_eq!(found(&s, 1_000_000), Some(5));
}

#[test]
fn data_is_sorted_by_time_and_stable_on_ties() {
    let data = vec![
        obs(20, 3.0),
        obs(0, 1.0).with_field("tag", "first"),
        obs(10, 2.0),
        obs(0, 5.0).with_field("tag", "second"),
    ];
    let s = Series::new("s", data, Accessors::default()).expect("valid");
    let xs: Vec<i64> = s.points().map(|(x, _)| x).collect();
    assert_eq!(xs, vec![0, 0, 10, 20]);
    assert_eq!(s.data()[0].fields["tag"], "first");
    assert_eq!(s.data()[1].fields["tag"], "second");
    assert_eq!(s.domain().x, (at(0), at(20)));
    assert_eq!(s.domain().y, (1.0, 5.0));
}

#[test]
fn non_integer_value_is_rejected() {
    let err = Series::new("bad", vec![obs(0, 1.0), obs(10, 3.5)], Accessors::default()).unwrap_err();
    match err {
        ChartError::Validation(ValidationError::NonInteger { series, index, value }) => {
            assert_eq!(series, "bad");
            assert_eq!(index, 1);
            assert_eq!(value, 3.5);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_series_is_rejected() {
    let err = Series::new("empty", Vec::new(), Accessors::default()).unwrap_err();
    assert!(matches!(err, ChartError::EmptySeries(name) if name == "empty"));
}

#[test]
fn missing_time_field_is_rejected() {
    let data = vec![obs(0, 1.0).with_field("ts", 100), obs(10, 2.0)];
    let accessors = Accessors::new(TimeAccessor::EpochMillis("ts".into()), ValueAccessor::Value);
    let err = Series::new("s", data, accessors).unwrap_err();
    assert!(matches!(
        err,
        ChartError::Validation(ValidationError::MissingTime { index: 1, ref field, .. }) if field == "ts"
    ));
}

#[test]
fn failed_accessor_change_leaves_series_untouched() {
    let data = vec![obs(0, 1.0).with_field("min", 0.5), obs(10, 2.0).with_field("min", 1)];
    let mut s = Series::new("s", data, Accessors::default()).expect("valid");
    let before: Vec<(i64, f64)> = s.points().collect();

    let err = s.set_accessors(Accessors::value_field("min")).unwrap_err();
    assert!(matches!(err, ChartError::Validation(ValidationError::NonInteger { index: 0, .. })));
    assert_eq!(s.accessors(), &Accessors::default());
    assert_eq!(s.points().collect::<Vec<_>>(), before);
}

#[test]
fn field_accessors_reproject_and_reorder() {
    let data = vec![
        obs(0, 1.0).with_field("min", 7).with_field("ts", 300),
        obs(10, 2.0).with_field("min", 4).with_field("ts", 100),
    ];
    let mut s = Series::new("s", data, Accessors::default()).expect("valid");
    let accessors = Accessors::new(TimeAccessor::EpochMillis("ts".into()), ValueAccessor::Field("min".into()));
    s.set_accessors(accessors).expect("valid accessors");
    assert_eq!(s.points().collect::<Vec<_>>(), vec![(100, 4.0), (300, 7.0)]);
    assert_eq!(s.domain().y, (4.0, 7.0));
    assert_eq!(s.find(at(150)).map(|o| o.value), Some(2.0));
}

#[test]
fn label_falls_back_to_name() {
    let s = series(&[(0, 1.0)]);
    assert_eq!(s.label(), "s");
    assert_eq!(s.with_display_name("Calls").label(), "Calls");
}
