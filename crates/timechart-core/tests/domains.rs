// File: crates/timechart-core/tests/domains.rs
// Purpose: Domain union across series and the scales built from it.

use chrono::DateTime;
use timechart_core::{Accessors, Domains, Observation, Scales, Series};

fn series(name: &str, points: &[(i64, f64)]) -> Series {
    let data = points.iter().map(|&(x, y)| Observation::from_millis(x, y).expect("in range")).collect();
    Series::new(name, data, Accessors::default()).expect("valid series")
}

#[test]
fn union_starts_at_zero_with_headroom() {
    let all = vec![series("a", &[(0, 3.0), (10, 12.0), (20, 7.0)])];
    let d = Domains::from_series(&all).expect("non-empty");
    assert_eq!(d.y.0, 0.0);
    assert!((d.y.1 - 12.6).abs() < 1e-9, "y max was {}", d.y.1);
    assert_eq!(d.x.0.timestamp_millis(), 0);
    assert_eq!(d.x.1.timestamp_millis(), 20);
}

#[test]
fn union_spans_every_series() {
    let all = vec![
        series("a", &[(100, 5.0), (200, 8.0)]),
        series("b", &[(50, 2.0), (150, 20.0)]),
        series("c", &[(120, 1.0), (400, 3.0)]),
    ];
    let d = Domains::from_series(&all).expect("non-empty");
    assert_eq!(d.x, (DateTime::from_timestamp_millis(50).unwrap(), DateTime::from_timestamp_millis(400).unwrap()));
    assert!((d.y.1 - 21.0).abs() < 1e-9);
}

#[test]
fn empty_collection_has_no_domain() {
    assert!(Domains::from_series(&[]).is_none());
}

#[test]
fn scales_map_domain_onto_plot() {
    let all = vec![series("a", &[(0, 0.0), (1_000, 100.0)])];
    let d = Domains::from_series(&all).expect("non-empty");
    let scales = Scales::new(&d, 690.0, 490.0);
    assert_eq!(scales.x.millis_to_px(0), 0.0);
    assert!((scales.x.millis_to_px(1_000) - 690.0).abs() < 1e-3);
    assert_eq!(scales.x.invert_millis(345.0), 500);
    assert_eq!(scales.y.to_px(0.0), 490.0);
    assert!((scales.y.to_px(105.0)).abs() < 1e-3, "top of the domain sits on the top edge");
}

#[test]
fn all_zero_values_collapse_to_mid_plot() {
    let all = vec![series("a", &[(0, 0.0), (10, 0.0)])];
    let d = Domains::from_series(&all).expect("non-empty");
    let scales = Scales::new(&d, 690.0, 490.0);
    assert_eq!(scales.y.to_px(0.0), 245.0);
}

#[test]
fn first_series_sets_y_domain() {
    let mut chart = timechart_core::Chart::with_text_measure(
        timechart_core::ChartOptions::default(),
        timechart_core::FixedAdvance::default(),
    )
    .unwrap();
    chart.add_series(series("a", &[(0, 4.0), (10, 8.0), (20, 12.0)])).unwrap();
    let (lo, hi) = chart.scales().unwrap().y.domain();
    assert_eq!(lo, 0.0);
    assert!((hi - 12.6).abs() < 1e-9);
}
