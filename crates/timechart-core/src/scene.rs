// File: crates/timechart-core/src/scene.rs
// Summary: Retained scene graph of one chart: axes, keyed series groups and the hover overlay.
// Notes:
// - Every shape inside the plot uses plot-local coordinates; `Scene::plot` gives the offset.
// - Series groups and focus rings carry a `NodeId` allocated when they enter, so callers can
//   tell an in-place refresh from a re-creation.

use crate::color::Rgb;
use crate::geometry::{PlotRect, Point};
use crate::options::ChartOptions;

pub type NodeId = u64;

/// Monotonic source of node ids; ids are never reused within a scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdCounter(NodeId);

impl IdCounter {
    pub fn next(&mut self) -> NodeId {
        self.0 += 1;
        self.0
    }

    pub fn issued(&self) -> u64 {
        self.0
    }
}

/// Tooltip opacity once faded in.
pub const TOOLTIP_OPACITY: f32 = 0.9;
pub const TOOLTIP_FADE_IN_MS: u32 = 200;
pub const TOOLTIP_FADE_OUT_MS: u32 = 500;

/// Lifecycle of a keyed group. Groups leaving the scene are dropped outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    /// Created during the latest pass.
    Entering,
    /// Survived at least one pass after creation.
    Present,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TickMark {
    /// Position along the axis, in plot pixels.
    pub offset: f32,
    /// Label lines after wrapping; empty for unlabeled ticks.
    pub lines: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisNode {
    pub ticks: Vec<TickMark>,
    /// Unlabeled minor tick positions.
    pub minor: Vec<f32>,
    pub tick_size: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxesNode {
    /// y positions of horizontal gridlines spanning the plot width.
    pub grid: Vec<f32>,
    pub bottom: Option<AxisNode>,
    pub left: Option<AxisNode>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub center: Point,
    pub radius: f32,
}

/// Dashed guides from a marker to the bottom and left axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crosshair {
    pub horizontal: [Point; 2],
    pub vertical: [Point; 2],
}

/// One series group: line path, markers, optional crosshairs.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesNode {
    pub id: NodeId,
    pub key: String,
    pub state: NodeState,
    pub stroke: Rgb,
    pub path: Vec<Point>,
    pub markers: Vec<Marker>,
    pub crosshairs: Vec<Crosshair>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideLine {
    pub x: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FocusRing {
    pub id: NodeId,
    pub key: String,
    pub center: Point,
    pub radius: f32,
    pub stroke: Rgb,
}

/// Opacity transition. Without a clock the scene reports the settled value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    pub from: f32,
    pub to: f32,
    pub duration_ms: u32,
}

impl Fade {
    pub const fn hidden() -> Self {
        Self { from: 0.0, to: 0.0, duration_ms: 0 }
    }

    pub fn opacity_at(&self, elapsed_ms: u32) -> f32 {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return self.to;
        }
        let t = elapsed_ms as f32 / self.duration_ms as f32;
        self.from + (self.to - self.from) * t
    }

    pub fn settled(&self) -> f32 {
        self.to
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipRow {
    pub label: String,
    pub value: String,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub header: String,
    pub rows: Vec<TooltipRow>,
    /// Top-left corner in canvas pixels.
    pub anchor: Point,
    pub fade: Fade,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self { header: String::new(), rows: Vec::new(), anchor: Point::default(), fade: Fade::hidden() }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Labels {
    pub title: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub plot: PlotRect,
    pub labels: Labels,
    pub axes: AxesNode,
    pub series: Vec<SeriesNode>,
    /// Present only when hover is enabled.
    pub guide: Option<GuideLine>,
    pub focus_rings: Vec<FocusRing>,
    pub tooltip: Tooltip,
    pub(crate) ids: IdCounter,
}

impl Scene {
    /// Static skeleton: plot area, titles, an empty axes layer and, with hover on, a hidden guide.
    pub fn new(options: &ChartOptions) -> Self {
        Self {
            width: options.width,
            height: options.height,
            plot: options.plot_rect(),
            labels: Labels {
                title: options.title.clone(),
                x: options.x_label.clone(),
                y: options.y_label.clone(),
            },
            axes: AxesNode::default(),
            series: Vec::new(),
            guide: options.hover.then_some(GuideLine { x: 0.0, opacity: 0.0 }),
            focus_rings: Vec::new(),
            tooltip: Tooltip::default(),
            ids: IdCounter::default(),
        }
    }

    /// Number of keyed nodes ever created in this scene.
    pub fn created_nodes(&self) -> u64 {
        self.ids.issued()
    }

    pub fn series_node(&self, key: &str) -> Option<&SeriesNode> {
        self.series.iter().find(|n| n.key == key)
    }

    /// Drop every shape; used on teardown.
    pub fn clear(&mut self) {
        self.axes = AxesNode::default();
        self.series.clear();
        self.guide = None;
        self.focus_rings.clear();
        self.tooltip = Tooltip::default();
    }
}
