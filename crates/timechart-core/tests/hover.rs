// File: crates/timechart-core/tests/hover.rs
// Purpose: Pointer tracking: guide line, focus rings and tooltip content.

use timechart_core::hover::{format_count, format_time};
use timechart_core::scene::{TOOLTIP_FADE_IN_MS, TOOLTIP_FADE_OUT_MS, TOOLTIP_OPACITY};
use timechart_core::{Accessors, Chart, ChartOptions, FixedAdvance, HoverState, Observation, Series};

// Default 800x600 canvas: plot origin (90, 50), size 690x490.
const PLOT_LEFT: f32 = 90.0;
const PLOT_TOP: f32 = 50.0;

fn series(name: &str, points: &[(i64, f64)]) -> Series {
    let data = points.iter().map(|&(x, y)| Observation::from_millis(x, y).unwrap()).collect();
    Series::new(name, data, Accessors::default()).unwrap()
}

fn chart_with(options: ChartOptions, names: &[&str]) -> Chart {
    let mut chart = Chart::with_text_measure(options, FixedAdvance::default()).unwrap();
    for (i, name) in names.iter().enumerate() {
        let base = (i as f64 + 1.0) * 10.0;
        chart.add_series(series(name, &[(0, base), (1_000, base + 10.0), (2_000, base + 20.0)])).unwrap();
    }
    chart
}

#[test]
fn tracking_places_one_ring_per_series() {
    let mut chart = chart_with(ChartOptions::default(), &["a", "b"]);
    let stats = chart.pointer_move(PLOT_LEFT + 345.0, PLOT_TOP + 100.0);
    assert_eq!(stats.entered, 2);
    assert!(matches!(chart.hover_state(), HoverState::Tracking { .. }));

    let scene = chart.scene();
    let guide = scene.guide.expect("hover enabled");
    assert_eq!(guide.opacity, 1.0);
    assert!((guide.x - 345.0).abs() < 1e-3);

    let scales = chart.scales().unwrap();
    let ring = scene.focus_rings.iter().find(|r| r.key == "a").unwrap();
    assert!((ring.center.x - 345.0).abs() < 1e-3);
    assert!((ring.center.y - scales.y.to_px(20.0)).abs() < 1e-3);
    assert_eq!(ring.radius, 5.0);
    assert_eq!(ring.stroke, chart.series_named("a").unwrap().options.color);
}

#[test]
fn tooltip_rows_are_sorted_by_name() {
    let mut chart = chart_with(ChartOptions::default(), &["zeta", "alpha"]);
    chart.pointer_move(PLOT_LEFT + 345.0, PLOT_TOP + 10.0);

    let tooltip = &chart.scene().tooltip;
    let labels: Vec<&str> = tooltip.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["alpha", "zeta"]);
    assert_eq!(tooltip.rows[0].value, "30");
    assert_eq!(tooltip.rows[1].value, "20");
    assert_eq!(tooltip.header, "1970-01-01T00:00:01+0000");
    assert_eq!(tooltip.fade.settled(), TOOLTIP_OPACITY);
    assert_eq!(tooltip.fade.duration_ms, TOOLTIP_FADE_IN_MS);
    assert_eq!((tooltip.anchor.x, tooltip.anchor.y), (PLOT_LEFT + 345.0 - 20.0, PLOT_TOP + 16.0));
}

#[test]
fn moving_again_updates_rings_in_place() {
    let mut chart = chart_with(ChartOptions::default(), &["a"]);
    chart.pointer_move(PLOT_LEFT + 10.0, PLOT_TOP + 10.0);
    let id = chart.scene().focus_rings[0].id;

    let stats = chart.pointer_move(PLOT_LEFT + 690.0, PLOT_TOP + 10.0);
    assert_eq!((stats.entered, stats.updated), (0, 1));
    assert_eq!(chart.scene().focus_rings[0].id, id);
    assert!((chart.scene().focus_rings[0].center.x - 690.0).abs() < 1e-3);
}

#[test]
fn pointer_outside_plot_renders_no_rings() {
    let mut chart = chart_with(ChartOptions::default(), &["a"]);
    chart.pointer_move(PLOT_LEFT + 100.0, PLOT_TOP + 100.0);
    assert_eq!(chart.scene().focus_rings.len(), 1);

    chart.pointer_move(10.0, 10.0);
    assert!(chart.scene().focus_rings.is_empty());
    assert_eq!(chart.hover_state(), HoverState::Idle);
    assert_eq!(chart.scene().guide.unwrap().opacity, 0.0);
}

#[test]
fn leave_hides_overlay() {
    let mut chart = chart_with(ChartOptions::default(), &["a", "b"]);
    chart.pointer_move(PLOT_LEFT + 345.0, PLOT_TOP + 10.0);
    let stats = chart.pointer_leave();
    assert_eq!(stats.exited, 2);

    let scene = chart.scene();
    assert!(scene.focus_rings.is_empty());
    assert_eq!(scene.guide.unwrap().opacity, 0.0);
    assert_eq!(scene.tooltip.fade.settled(), 0.0);
    assert_eq!(scene.tooltip.fade.duration_ms, TOOLTIP_FADE_OUT_MS);
    assert_eq!(scene.tooltip.fade.opacity_at(0), TOOLTIP_OPACITY);
}

#[test]
fn series_without_match_are_left_out() {
    let mut chart = Chart::with_text_measure(ChartOptions::default(), FixedAdvance::default()).unwrap();
    chart.add_series(series("early", &[(0, 1.0), (100, 2.0)])).unwrap();
    chart.add_series(series("late", &[(1_000, 3.0), (2_000, 4.0)])).unwrap();
    // 500 ms is past "early" by more than its last gap and before "late" starts.
    chart.pointer_move(PLOT_LEFT + 172.5, PLOT_TOP + 10.0);
    assert!(chart.scene().focus_rings.is_empty());
    assert!(chart.scene().tooltip.rows.is_empty());
    assert_eq!(chart.scene().tooltip.fade.settled(), 0.0);
}

#[test]
fn hover_disabled_does_nothing() {
    let mut options = ChartOptions::default();
    options.hover = false;
    let mut chart = chart_with(options, &["a"]);
    assert!(chart.scene().guide.is_none());
    let stats = chart.pointer_move(PLOT_LEFT + 345.0, PLOT_TOP + 10.0);
    assert_eq!(stats.entered, 0);
    assert!(chart.scene().focus_rings.is_empty());
    assert_eq!(chart.hover_state(), HoverState::Idle);
}

#[test]
fn redraw_keeps_overlay_in_step() {
    let mut chart = chart_with(ChartOptions::default(), &["a"]);
    chart.pointer_move(PLOT_LEFT + 345.0, PLOT_TOP + 10.0);
    chart.add_series(series("b", &[(0, 100.0), (1_000, 200.0), (2_000, 300.0)])).unwrap();

    let scales = chart.scales().unwrap();
    assert_eq!(chart.scene().focus_rings.len(), 2);
    let ring = chart.scene().focus_rings.iter().find(|r| r.key == "a").unwrap();
    assert!((ring.center.y - scales.y.to_px(20.0)).abs() < 1e-3, "ring follows the rescaled y axis");
}

#[test]
fn formats_match_tooltip_conventions() {
    assert_eq!(format_time(1_488_326_400_000), "2017-03-01T00:00:00+0000");
    assert_eq!(format_count(1_234_567.0), "1,234,567");
    assert_eq!(format_count(0.0), "0");
}
