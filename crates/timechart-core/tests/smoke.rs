// File: crates/timechart-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use timechart_core::{Accessors, Chart, ChartOptions, FixedAdvance, Observation, RenderOptions, Series};

fn chart() -> Chart {
    let mut chart = Chart::with_text_measure(ChartOptions::default(), FixedAdvance::default()).unwrap();
    let data = [(0, 0.0), (1, 2.0), (2, 1.0), (3, 3.0), (4, 2.0)]
        .iter()
        .map(|&(m, v)| Observation::from_millis(m * 60_000, v).unwrap())
        .collect();
    chart.add_series(Series::new("s", data, Accessors::default()).unwrap()).unwrap();
    chart.pointer_move(300.0, 200.0);
    chart
}

#[test]
fn render_smoke_png() {
    let chart = chart();
    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");

    chart.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn pixel_ratio_scales_output() {
    let chart = chart();
    let opts = RenderOptions { draw_labels: false, pixel_ratio: 2.0 };
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (1600, 1200));
}

#[test]
fn empty_chart_still_renders() {
    let chart = Chart::with_text_measure(ChartOptions::new(320, 240), FixedAdvance::default()).unwrap();
    let opts = RenderOptions { draw_labels: false, ..Default::default() };
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (320, 240));
    assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255, 255], "light background");
}
