// File: crates/timechart-core/tests/options.rs
// Purpose: Option parsing and the effect of feature toggles on the scene.

use timechart_core::types::Margins;
use timechart_core::{Accessors, Chart, ChartError, ChartOptions, FixedAdvance, Observation, Palette, Series};

const HOUR: i64 = 3_600_000;
const MARCH_1_2017: i64 = 1_488_326_400_000;

fn hourly(name: &str, hours: i64) -> Series {
    let data = (0..=hours)
        .map(|h| Observation::from_millis(MARCH_1_2017 + h * HOUR, (h * 10) as f64).unwrap())
        .collect();
    Series::new(name, data, Accessors::default()).unwrap()
}

fn chart(options: ChartOptions) -> Chart {
    let mut chart = Chart::with_text_measure(options, FixedAdvance::default()).unwrap();
    chart.add_series(hourly("a", 48)).unwrap();
    chart
}

#[test]
fn json_requires_size_and_defaults_the_rest() {
    let options = ChartOptions::from_json_str(r#"{ "width": 640, "height": 480, "grid": false }"#).unwrap();
    assert_eq!((options.width, options.height), (640, 480));
    assert!(!options.grid);
    assert!(options.axis_bottom && options.axis_left && options.rings && options.hover);
    assert!(!options.crosshairs);
    assert_eq!(options.palette, Palette::Cool);
    assert_eq!(options.x_label.as_deref(), Some("Date"));
    assert_eq!(options.margins, ChartOptions::default().margins);

    let err = ChartOptions::from_json_str(r#"{ "height": 480 }"#).unwrap_err();
    assert!(matches!(err, ChartError::Json(_)));
}

#[test]
fn json_accepts_camel_case_keys() {
    let options = ChartOptions::from_json_str(
        r#"{ "width": 800, "height": 600, "axisBottom": false, "yLabel": "Calls", "palette": "warm",
             "margins": { "left": 40, "right": 10, "top": 10, "bottom": 30 } }"#,
    )
    .unwrap();
    assert!(!options.axis_bottom);
    assert_eq!(options.y_label.as_deref(), Some("Calls"));
    assert_eq!(options.palette, Palette::Warm);
    assert_eq!(options.plot_size(), (750.0, 560.0));
}

#[test]
fn canvas_smaller_than_margins_is_rejected() {
    let err = ChartOptions::from_json_str(r#"{ "width": 100, "height": 600 }"#).unwrap_err();
    assert!(matches!(err, ChartError::InvalidOptions(_)));
    assert!(Chart::with_text_measure(ChartOptions::new(100, 100), FixedAdvance::default()).is_err());
}

#[test]
fn margins_that_overflow_are_rejected() {
    let json = r#"{ "width": 800, "height": 600, "margins": { "left": 4294967295, "right": 1 } }"#;
    let err = ChartOptions::from_json_str(json).unwrap_err();
    assert!(matches!(err, ChartError::InvalidOptions(_)));

    let json = r#"{ "width": 800, "height": 600, "margins": { "top": 4294967295, "bottom": 4294967295 } }"#;
    assert!(matches!(ChartOptions::from_json_str(json), Err(ChartError::InvalidOptions(_))));
    assert_eq!(Margins::new(0, u32::MAX, 0, 1).plot_rect(800, 600), None);
}

#[test]
fn defaults_draw_everything_but_crosshairs() {
    let chart = chart(ChartOptions::default());
    let scene = chart.scene();
    assert!(!scene.axes.grid.is_empty());
    assert!(scene.axes.left.is_some());

    let bottom = scene.axes.bottom.as_ref().unwrap();
    assert!(!bottom.ticks.is_empty());
    assert!(bottom.minor.len() > bottom.ticks.len());
    assert_eq!(bottom.tick_size, 10.0);

    let node = scene.series_node("a").unwrap();
    assert_eq!(node.path.len(), 49);
    assert_eq!(node.markers.len(), 49);
    assert!(node.markers.iter().all(|m| m.radius == 2.0));
    assert!(node.crosshairs.is_empty());
    assert_eq!(scene.labels.x.as_deref(), Some("Date"));
}

#[test]
fn bottom_labels_wrap_at_the_width_budget() {
    let chart = chart(ChartOptions::default());
    let bottom = chart.scene().axes.bottom.as_ref().unwrap();
    let labels: Vec<Vec<String>> = bottom.ticks.iter().map(|t| t.lines.clone()).collect();
    // Six-hour ticks over two days at 6 px per glyph: "06 AM" fits 35 px, "Thu 02" does not.
    assert_eq!(labels[0], vec!["March".to_string()]);
    assert_eq!(labels[1], vec!["06 AM".to_string()]);
    assert_eq!(labels[4], vec!["Thu".to_string(), "02".to_string()]);
}

#[test]
fn toggles_remove_their_layers() {
    let mut options = ChartOptions::default();
    options.grid = false;
    options.axis_bottom = false;
    options.axis_left = false;
    options.rings = false;
    let chart = chart(options);
    let scene = chart.scene();
    assert!(scene.axes.grid.is_empty());
    assert!(scene.axes.bottom.is_none());
    assert!(scene.axes.left.is_none());
    let node = scene.series_node("a").unwrap();
    assert!(node.markers.is_empty());
    assert_eq!(node.path.len(), 49, "the line itself is always drawn");
}

#[test]
fn crosshairs_reach_both_axes() {
    let mut options = ChartOptions::default();
    options.crosshairs = true;
    let chart = chart(options);
    let (_, plot_h) = chart.options().plot_size();
    let node = chart.scene().series_node("a").unwrap();
    assert_eq!(node.crosshairs.len(), node.path.len());
    for (c, p) in node.crosshairs.iter().zip(&node.path) {
        assert_eq!(c.horizontal[0].x, 0.0);
        assert_eq!(c.horizontal[1], *p);
        assert_eq!(c.vertical[1].y, plot_h);
    }
}
