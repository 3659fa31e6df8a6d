// File: crates/timechart-core/src/raster.rs
// Summary: Headless PNG rendering of a scene using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;

use crate::color::Rgb;
use crate::geometry::{PlotRect, Point};
use crate::options::RenderOptions;
use crate::scene::{AxisNode, Scene, SeriesNode, Tooltip};
use crate::text::{Anchor, TextMeasure, TextShaper, LABEL_SIZE};
use crate::theme::Theme;

const TITLE_SIZE: f32 = 16.0;
const TOOLTIP_TEXT_SIZE: f32 = 12.0;
const TOOLTIP_PADDING: f32 = 6.0;
const MINOR_TICK_SIZE: f32 = 6.0;
/// Line height of wrapped tick labels, in ems.
const LINE_HEIGHT: f32 = 1.1;

/// Paint `scene` into a PNG byte buffer.
pub fn render_png(scene: &Scene, theme: &Theme, opts: &RenderOptions) -> Result<Vec<u8>> {
    let ratio = opts.pixel_ratio.max(0.1);
    let w = ((scene.width as f32 * ratio).round() as i32).max(1);
    let h = ((scene.height as f32 * ratio).round() as i32).max(1);
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();
    canvas.scale((ratio, ratio));

    let shaper = opts.draw_labels.then(TextShaper::new);
    paint_scene(canvas, scene, theme, shaper.as_ref());

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

fn paint_scene(canvas: &skia::Canvas, scene: &Scene, theme: &Theme, text: Option<&TextShaper>) {
    canvas.clear(theme.background.to_skia(1.0));
    let plot = scene.plot;

    canvas.save();
    canvas.translate((plot.left, plot.top));
    draw_grid(canvas, &scene.axes.grid, plot.width, theme);
    if let Some(axis) = &scene.axes.bottom {
        draw_bottom_axis(canvas, axis, plot, theme, text);
    }
    if let Some(axis) = &scene.axes.left {
        draw_left_axis(canvas, axis, plot, theme, text);
    }
    if let Some(guide) = scene.guide.filter(|g| g.opacity > 0.0) {
        let paint = stroke(theme.guide_line, guide.opacity, 1.0);
        canvas.draw_line((guide.x, plot.height), (guide.x, 0.0), &paint);
    }
    for node in &scene.series {
        draw_series(canvas, node, theme);
    }
    for ring in &scene.focus_rings {
        let mut ring_fill = fill(theme.marker_fill, 1.0);
        ring_fill.set_anti_alias(true);
        canvas.draw_circle((ring.center.x, ring.center.y), ring.radius, &ring_fill);
        canvas.draw_circle((ring.center.x, ring.center.y), ring.radius, &stroke(ring.stroke, 1.0, 2.0));
    }
    canvas.restore();

    if let Some(text) = text {
        draw_titles(canvas, scene, theme, text);
        draw_tooltip(canvas, &scene.tooltip, theme, text);
    }
}

// ---- helpers ----------------------------------------------------------------

fn stroke(color: Rgb, alpha: f32, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color.to_skia(alpha));
    paint
}

fn fill(color: Rgb, alpha: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color.to_skia(alpha));
    paint
}

fn draw_grid(canvas: &skia::Canvas, ys: &[f32], width: f32, theme: &Theme) {
    let paint = stroke(theme.grid, 1.0, 1.0);
    for &y in ys {
        canvas.draw_line((0.0, y), (width, y), &paint);
    }
}

fn draw_bottom_axis(canvas: &skia::Canvas, axis: &AxisNode, plot: PlotRect, theme: &Theme, text: Option<&TextShaper>) {
    let line = stroke(theme.axis_line, 1.0, 1.0);
    let h = plot.height;
    canvas.draw_line((0.0, h), (plot.width, h), &line);

    let tick = stroke(theme.tick, 1.0, 1.0);
    for &x in &axis.minor {
        canvas.draw_line((x, h), (x, h + MINOR_TICK_SIZE), &tick);
    }
    for mark in &axis.ticks {
        canvas.draw_line((mark.offset, h), (mark.offset, h + axis.tick_size), &tick);
        let Some(text) = text else { continue };
        for (i, label) in mark.lines.iter().enumerate() {
            let baseline = h + axis.tick_size + 3.0 + LABEL_SIZE * (0.71 + LINE_HEIGHT * i as f32);
            text.draw(canvas, label, mark.offset, baseline, LABEL_SIZE, theme.axis_label, Anchor::Middle);
        }
    }
}

fn draw_left_axis(canvas: &skia::Canvas, axis: &AxisNode, plot: PlotRect, theme: &Theme, text: Option<&TextShaper>) {
    let line = stroke(theme.axis_line, 1.0, 1.0);
    canvas.draw_line((0.0, 0.0), (0.0, plot.height), &line);

    let tick = stroke(theme.tick, 1.0, 1.0);
    for mark in &axis.ticks {
        canvas.draw_line((-axis.tick_size, mark.offset), (0.0, mark.offset), &tick);
        if let (Some(text), Some(label)) = (text, mark.lines.first()) {
            let baseline = mark.offset + LABEL_SIZE * 0.32;
            text.draw(canvas, label, -axis.tick_size - 3.0, baseline, LABEL_SIZE, theme.axis_label, Anchor::End);
        }
    }
}

fn draw_series(canvas: &skia::Canvas, node: &SeriesNode, theme: &Theme) {
    if node.path.len() >= 2 {
        let mut path = skia::Path::new();
        let Point { x, y } = node.path[0];
        path.move_to((x, y));
        for p in node.path.iter().skip(1) {
            path.line_to((p.x, p.y));
        }
        canvas.draw_path(&path, &stroke(node.stroke, 1.0, 1.5));
    }

    if !node.crosshairs.is_empty() {
        let mut dashed = stroke(theme.crosshair, 0.6, 1.0);
        dashed.set_path_effect(skia::PathEffect::dash(&[3.0, 3.0], 0.0));
        for c in &node.crosshairs {
            for [a, b] in [c.horizontal, c.vertical] {
                canvas.draw_line((a.x, a.y), (b.x, b.y), &dashed);
            }
        }
    }

    let marker_fill = fill(theme.marker_fill, 1.0);
    let marker_stroke = stroke(node.stroke, 1.0, 1.0);
    for m in &node.markers {
        canvas.draw_circle((m.center.x, m.center.y), m.radius, &marker_fill);
        canvas.draw_circle((m.center.x, m.center.y), m.radius, &marker_stroke);
    }
}

fn draw_titles(canvas: &skia::Canvas, scene: &Scene, theme: &Theme, text: &TextShaper) {
    let plot = scene.plot;
    let center_x = plot.left + plot.width * 0.5;
    if let Some(title) = &scene.labels.title {
        text.draw(canvas, title, center_x, plot.top * 0.5, TITLE_SIZE, theme.title, Anchor::Middle);
    }
    if let Some(x_label) = &scene.labels.x {
        text.draw(canvas, x_label, center_x, scene.height as f32 - 6.0, LABEL_SIZE + 2.0, theme.title, Anchor::Middle);
    }
    if let Some(y_label) = &scene.labels.y {
        canvas.save();
        canvas.translate((plot.left * 0.35, plot.top + plot.height * 0.5));
        canvas.rotate(-90.0, None);
        text.draw(canvas, y_label, 0.0, 0.0, TITLE_SIZE, theme.title, Anchor::Middle);
        canvas.restore();
    }
}

fn draw_tooltip(canvas: &skia::Canvas, tooltip: &Tooltip, theme: &Theme, text: &TextShaper) {
    let opacity = tooltip.fade.settled();
    if opacity <= 0.0 || tooltip.rows.is_empty() {
        return;
    }
    let line_h = TOOLTIP_TEXT_SIZE * 1.4;
    let swatch = TOOLTIP_TEXT_SIZE * 0.7;
    let rows: Vec<String> = tooltip.rows.iter().map(|r| format!("{}: {}", r.label, r.value)).collect();
    let content_w = rows
        .iter()
        .map(|r| text.width(r, TOOLTIP_TEXT_SIZE) + swatch + 4.0)
        .fold(text.width(&tooltip.header, TOOLTIP_TEXT_SIZE), f32::max);
    let box_w = content_w + TOOLTIP_PADDING * 2.0;
    let box_h = line_h * (rows.len() + 1) as f32 + TOOLTIP_PADDING * 2.0;
    let Point { x, y } = tooltip.anchor;

    let mut bg = fill(theme.tooltip_background, opacity);
    bg.set_anti_alias(true);
    canvas.draw_round_rect(skia::Rect::from_xywh(x, y, box_w, box_h), 4.0, 4.0, &bg);

    let left = x + TOOLTIP_PADDING;
    let mut baseline = y + TOOLTIP_PADDING + TOOLTIP_TEXT_SIZE;
    text.draw(canvas, &tooltip.header, left, baseline, TOOLTIP_TEXT_SIZE, theme.tooltip_text, Anchor::Start);
    for (row, label) in tooltip.rows.iter().zip(&rows) {
        baseline += line_h;
        let sw = skia::Rect::from_xywh(left, baseline - swatch, swatch, swatch);
        canvas.draw_rect(sw, &fill(row.color, opacity));
        text.draw(canvas, label, left + swatch + 4.0, baseline, TOOLTIP_TEXT_SIZE, theme.tooltip_text, Anchor::Start);
    }
}
