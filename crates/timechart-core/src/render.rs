// File: crates/timechart-core/src/render.rs
// Summary: Redraw passes over the scene: axes/grid refresh and keyed series groups.

use crate::geometry::Point;
use crate::options::ChartOptions;
use crate::reconcile::{reconcile, ReconcileStats};
use crate::scale::Scales;
use crate::scene::{AxesNode, AxisNode, Crosshair, IdCounter, Marker, NodeState, SeriesNode, TickMark};
use crate::series::Series;
use crate::text::{TextMeasure, LABEL_SIZE};
use crate::ticks::{format_time_tick, format_value_tick, tick_step};
use crate::wrap::wrap_words;

/// Tick length of the left axis.
const LEFT_TICK_SIZE: f32 = 6.0;

/// Rebuild gridlines and axes from the current scales. Without scales the layer is emptied.
pub fn draw_axes(axes: &mut AxesNode, scales: Option<&Scales>, options: &ChartOptions, measure: &dyn TextMeasure) {
    let Some(scales) = scales else {
        *axes = AxesNode::default();
        return;
    };
    axes.grid = if options.grid {
        scales.y.ticks(options.y_ticks).into_iter().map(|v| scales.y.to_px(v)).collect()
    } else {
        Vec::new()
    };
    axes.bottom = options.axis_bottom.then(|| bottom_axis(scales, options, measure));
    axes.left = options.axis_left.then(|| left_axis(scales, options));
}

fn bottom_axis(scales: &Scales, options: &ChartOptions, measure: &dyn TextMeasure) -> AxisNode {
    let ticks = scales
        .x
        .ticks(options.x_ticks)
        .into_iter()
        .map(|t| TickMark {
            offset: scales.x.to_px(t),
            lines: wrap_words(&format_time_tick(t), options.label_wrap_width, LABEL_SIZE, measure),
        })
        .collect();
    let minor = scales.x.ticks(options.x_minor_ticks).into_iter().map(|t| scales.x.to_px(t)).collect();
    AxisNode { ticks, minor, tick_size: options.tick_size }
}

fn left_axis(scales: &Scales, options: &ChartOptions) -> AxisNode {
    let (d0, d1) = scales.y.domain();
    let step = tick_step(d0, d1, options.y_ticks);
    let ticks = scales
        .y
        .ticks(options.y_ticks)
        .into_iter()
        .map(|v| TickMark { offset: scales.y.to_px(v), lines: vec![format_value_tick(v, step)] })
        .collect();
    AxisNode { ticks, minor: Vec::new(), tick_size: LEFT_TICK_SIZE }
}

/// Reconcile series groups against `series`, keyed by name.
pub fn draw_series(
    nodes: &mut Vec<SeriesNode>,
    ids: &mut IdCounter,
    series: &[Series],
    scales: Option<&Scales>,
    options: &ChartOptions,
) -> ReconcileStats {
    let Some(scales) = scales else {
        let exited = nodes.len();
        nodes.clear();
        return ReconcileStats { exited, ..Default::default() };
    };
    reconcile(
        nodes,
        series,
        |n| n.key.as_str(),
        |s| s.name(),
        |s| {
            let mut node = SeriesNode {
                id: ids.next(),
                key: s.name().to_string(),
                state: NodeState::Entering,
                stroke: s.options.color,
                path: Vec::new(),
                markers: Vec::new(),
                crosshairs: Vec::new(),
            };
            layout_series(&mut node, s, scales, options);
            node
        },
        |node, s| {
            node.state = NodeState::Present;
            node.stroke = s.options.color;
            layout_series(node, s, scales, options);
        },
    )
}

fn layout_series(node: &mut SeriesNode, series: &Series, scales: &Scales, options: &ChartOptions) {
    node.path.clear();
    node.path.extend(series.points().map(|(x, y)| Point::new(scales.x.millis_to_px(x), scales.y.to_px(y))));

    node.markers.clear();
    if options.rings {
        node.markers.extend(node.path.iter().map(|&center| Marker { center, radius: options.marker_radius }));
    }

    node.crosshairs.clear();
    if options.crosshairs {
        let bottom = scales.y.range().0;
        node.crosshairs.extend(node.path.iter().map(|&c| Crosshair {
            horizontal: [Point::new(0.0, c.y), c],
            vertical: [c, Point::new(c.x, bottom)],
        }));
    }
}
