// File: crates/timechart-core/src/svg.rs
// Summary: Standalone SVG serialization of a scene, grouped and classed like the live widget.

use std::fmt::{self, Display, Formatter};

use ::svg::node::element::path::Data;
use ::svg::node::element::{Circle, Group, Line, Path, Rectangle, TSpan, Text};
use ::svg::Document;

use crate::geometry::Point;
use crate::scene::{AxisNode, Scene, SeriesNode, Tooltip};
use crate::text::{Anchor, LABEL_SIZE};
use crate::theme::Theme;

/// Borrowing view that writes `scene` as SVG markup through `Display`.
pub struct SvgDocument<'a> {
    scene: &'a Scene,
    theme: &'a Theme,
}

impl<'a> SvgDocument<'a> {
    pub fn new(scene: &'a Scene, theme: &'a Theme) -> Self {
        Self { scene, theme }
    }

    /// Build the element tree for the scene.
    pub fn document(&self) -> Document {
        let s = self.scene;
        let t = self.theme;
        let plot = s.plot;

        let mut axes = Group::new().set("class", "axes").add(self.grid());
        if let Some(axis) = &s.axes.bottom {
            axes = axes.add(self.bottom_major(axis)).add(self.bottom_minor(axis));
        }
        if let Some(axis) = &s.axes.left {
            axes = axes.add(self.left_axis(axis));
        }
        if let Some(guide) = &s.guide {
            axes = axes.add(
                Line::new()
                    .set("class", "mouseline")
                    .set("x1", num(guide.x))
                    .set("x2", num(guide.x))
                    .set("y1", num(plot.height))
                    .set("y2", 0)
                    .set("stroke", t.guide_line.to_string())
                    .set("opacity", num(guide.opacity)),
            );
        }

        let mut body = Group::new().set("transform", translate(plot.left, plot.top)).add(axes);
        for node in &s.series {
            body = body.add(self.series(node));
        }
        for title in self.titles() {
            body = body.add(title);
        }

        let mut annotations = Group::new()
            .set("class", "annotations")
            .set("transform", translate(plot.left, plot.top));
        for ring in &s.focus_rings {
            annotations = annotations.add(
                Circle::new()
                    .set("class", "focusring")
                    .set("data-key", ring.key.as_str())
                    .set("cx", num(ring.center.x))
                    .set("cy", num(ring.center.y))
                    .set("r", num(ring.radius))
                    .set("fill", t.marker_fill.to_string())
                    .set("stroke", ring.stroke.to_string())
                    .set("stroke-width", 2),
            );
        }

        Document::new()
            .set("width", s.width)
            .set("height", s.height)
            .set("viewBox", (0, 0, s.width, s.height))
            .set("font-family", "sans-serif")
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", t.background.to_string()),
            )
            .add(body)
            .add(annotations)
            .add(self.tooltip(&s.tooltip))
    }

    fn grid(&self) -> Group {
        let width = num(self.scene.plot.width);
        self.scene.axes.grid.iter().fold(
            Group::new().set("class", "grid").set("stroke", self.theme.grid.to_string()),
            |g, &y| {
                g.add(
                    Line::new()
                        .set("x1", 0)
                        .set("x2", width.as_str())
                        .set("y1", num(y))
                        .set("y2", num(y)),
                )
            },
        )
    }

    fn bottom_major(&self, axis: &AxisNode) -> Group {
        let t = self.theme;
        let plot = self.scene.plot;
        let mut group = Group::new()
            .set("class", "x axis major")
            .set("transform", translate(0.0, plot.height))
            .add(domain_path(Data::new().move_to((0, 0)).horizontal_line_to(plot.width), t));
        for mark in &axis.ticks {
            let mut label = Text::new("")
                .set("y", num(axis.tick_size + 3.0))
                .set("dy", "0.71em")
                .set("text-anchor", Anchor::Middle.as_svg())
                .set("font-size", num(LABEL_SIZE))
                .set("fill", t.axis_label.to_string());
            for (i, line) in mark.lines.iter().enumerate() {
                let dy = if i == 0 { "0" } else { "1.1em" };
                label = label.add(TSpan::new(line.as_str()).set("x", 0).set("dy", dy));
            }
            group = group.add(
                Group::new()
                    .set("class", "tick")
                    .set("transform", translate(mark.offset, 0.0))
                    .add(Line::new().set("y2", num(axis.tick_size)).set("stroke", t.tick.to_string()))
                    .add(label),
            );
        }
        group
    }

    fn bottom_minor(&self, axis: &AxisNode) -> Group {
        let stroke = self.theme.tick.to_string();
        axis.minor.iter().fold(
            Group::new()
                .set("class", "x axis minor")
                .set("transform", translate(0.0, self.scene.plot.height)),
            |g, &x| {
                g.add(
                    Line::new()
                        .set("class", "tick")
                        .set("x1", num(x))
                        .set("x2", num(x))
                        .set("y2", 6)
                        .set("stroke", stroke.as_str()),
                )
            },
        )
    }

    fn left_axis(&self, axis: &AxisNode) -> Group {
        let t = self.theme;
        let mut group = Group::new()
            .set("class", "y axis")
            .add(domain_path(Data::new().move_to((0, 0)).vertical_line_to(self.scene.plot.height), t));
        for mark in &axis.ticks {
            let label = mark.lines.first().map(String::as_str).unwrap_or_default();
            group = group.add(
                Group::new()
                    .set("class", "tick")
                    .set("transform", translate(0.0, mark.offset))
                    .add(Line::new().set("x2", num(-axis.tick_size)).set("stroke", t.tick.to_string()))
                    .add(
                        Text::new(label)
                            .set("x", num(-axis.tick_size - 3.0))
                            .set("dy", "0.32em")
                            .set("text-anchor", Anchor::End.as_svg())
                            .set("font-size", num(LABEL_SIZE))
                            .set("fill", t.axis_label.to_string()),
                    ),
            );
        }
        group
    }

    fn series(&self, node: &SeriesNode) -> Group {
        let stroke = node.stroke.to_string();
        let mut group = Group::new().set("class", "series").set("data-key", node.key.as_str());
        if !node.path.is_empty() {
            group = group.add(
                Path::new()
                    .set("class", "line")
                    .set("d", path_data(&node.path))
                    .set("stroke", stroke.as_str())
                    .set("stroke-width", 1.5)
                    .set("fill", "none"),
            );
        }
        for m in &node.markers {
            group = group.add(
                Circle::new()
                    .set("class", "dot")
                    .set("cx", num(m.center.x))
                    .set("cy", num(m.center.y))
                    .set("r", num(m.radius))
                    .set("fill", self.theme.marker_fill.to_string())
                    .set("stroke", stroke.as_str()),
            );
        }
        for c in &node.crosshairs {
            for [a, b] in [c.horizontal, c.vertical] {
                group = group.add(
                    Line::new()
                        .set("class", "crosshair")
                        .set("x1", num(a.x))
                        .set("y1", num(a.y))
                        .set("x2", num(b.x))
                        .set("y2", num(b.y))
                        .set("stroke", self.theme.crosshair.to_string())
                        .set("stroke-dasharray", "3,3")
                        .set("opacity", 0.6),
                );
            }
        }
        group
    }

    fn titles(&self) -> Vec<Text> {
        let s = self.scene;
        let fill = self.theme.title.to_string();
        let plot = s.plot;
        let center = num(plot.width * 0.5);
        let mut out = Vec::new();
        if let Some(title) = &s.labels.title {
            out.push(
                Text::new(title.as_str())
                    .set("class", "title")
                    .set("x", center.as_str())
                    .set("y", num(-plot.top * 0.5))
                    .set("font-size", 16),
            );
        }
        if let Some(x) = &s.labels.x {
            out.push(
                Text::new(x.as_str())
                    .set("class", "x label")
                    .set("x", center.as_str())
                    .set("y", num(s.height as f32 - plot.top - 6.0))
                    .set("font-size", 12),
            );
        }
        if let Some(y) = &s.labels.y {
            out.push(
                Text::new(y.as_str())
                    .set("class", "y label")
                    .set("transform", "rotate(-90)")
                    .set("x", num(-plot.height * 0.5))
                    .set("y", num(-plot.left * 0.65))
                    .set("font-size", 16),
            );
        }
        out.into_iter()
            .map(|text| text.set("text-anchor", "middle").set("fill", fill.as_str()))
            .collect()
    }

    fn tooltip(&self, tooltip: &Tooltip) -> Group {
        let t = self.theme;
        let mut group = Group::new()
            .set("class", "tooltip")
            .set("transform", translate(tooltip.anchor.x, tooltip.anchor.y))
            .set("opacity", num(tooltip.fade.settled()));
        if tooltip.rows.is_empty() {
            return group;
        }
        let height = 17.0 * (tooltip.rows.len() + 1) as f32 + 12.0;
        group = group
            .add(
                Rectangle::new()
                    .set("rx", 4)
                    .set("width", 180)
                    .set("height", num(height))
                    .set("fill", t.tooltip_background.to_string()),
            )
            .add(
                Text::new(tooltip.header.as_str())
                    .set("class", "header")
                    .set("x", 6)
                    .set("y", 18)
                    .set("font-size", 12)
                    .set("fill", t.tooltip_text.to_string()),
            );
        for (i, row) in tooltip.rows.iter().enumerate() {
            let y = 18.0 + 17.0 * (i + 1) as f32;
            group = group.add(
                Text::new("")
                    .set("class", "row")
                    .set("x", 6)
                    .set("y", num(y))
                    .set("font-size", 12)
                    .set("fill", t.tooltip_text.to_string())
                    .add(TSpan::new("\u{25A0}").set("fill", row.color.to_string()))
                    .add(TSpan::new(format!(" {}: {}", row.label, row.value))),
            );
        }
        group
    }
}

impl Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.document())
    }
}

/// Compact number: at most two decimals, trailing zeros dropped.
fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn translate(x: f32, y: f32) -> String {
    format!("translate({},{})", num(x), num(y))
}

fn domain_path(d: Data, theme: &Theme) -> Path {
    Path::new()
        .set("class", "domain")
        .set("d", d)
        .set("stroke", theme.axis_line.to_string())
        .set("fill", "none")
}

fn path_data(points: &[Point]) -> Data {
    let mut iter = points.iter();
    let Some(first) = iter.next() else { return Data::new() };
    iter.fold(Data::new().move_to((first.x, first.y)), |d, p| d.line_to((p.x, p.y)))
}
