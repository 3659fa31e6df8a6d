// File: crates/timechart-core/src/hover.rs
// Summary: Pointer tracking: guide line, per-series focus rings and tooltip content.

use chrono::DateTime;
use tracing::trace;

use crate::color::Rgb;
use crate::geometry::Point;
use crate::options::ChartOptions;
use crate::reconcile::{reconcile, ReconcileStats};
use crate::scale::Scales;
use crate::scene::{
    Fade, FocusRing, Scene, TooltipRow, TOOLTIP_FADE_IN_MS, TOOLTIP_FADE_OUT_MS, TOOLTIP_OPACITY,
};
use crate::series::Series;
use crate::ticks::group_thousands;

/// Tooltip offset from the pointer, in canvas pixels.
const TOOLTIP_OFFSET: Point = Point::new(-20.0, 6.0);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum HoverState {
    #[default]
    Idle,
    /// Pointer inside the plot, at this canvas position.
    Tracking { pointer: Point },
}

/// Nearest point of one series to the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct Focus {
    pub key: String,
    pub label: String,
    pub color: Rgb,
    pub millis: i64,
    pub value: f64,
}

/// Nearest point per series, in series order. Series without a match, or whose
/// match has a non-finite value, are left out.
pub fn nearest_points(series: &[Series], target_millis: i64) -> Vec<Focus> {
    series
        .iter()
        .filter_map(|s| {
            let (millis, value) = s.point(s.find_index(target_millis)?)?;
            value.is_finite().then(|| Focus {
                key: s.name().to_string(),
                label: s.label().to_string(),
                color: s.options.color,
                millis,
                value,
            })
        })
        .collect()
}

pub fn format_time(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%dT%H:%M:%S%z").to_string())
        .unwrap_or_default()
}

/// Value with thousands separators; integers print without decimals.
pub fn format_count(value: f64) -> String {
    let decimals = if value.fract() == 0.0 { 0 } else { 3 };
    group_thousands(value, decimals)
}

/// Tooltip header and rows: rows sorted by series name, header from the first row's point.
pub fn tooltip_content(focus: &[Focus]) -> (String, Vec<TooltipRow>) {
    let mut sorted: Vec<&Focus> = focus.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));
    let header = sorted.first().map(|f| format_time(f.millis)).unwrap_or_default();
    let rows = sorted
        .into_iter()
        .map(|f| TooltipRow { label: f.label.clone(), value: format_count(f.value), color: f.color })
        .collect();
    (header, rows)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HoverController {
    state: HoverState,
}

impl HoverController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    /// Pointer moved to `pointer` (canvas pixels). Outside the plot, or with nothing
    /// plotted, this behaves like the pointer leaving.
    pub fn track(
        &mut self,
        scene: &mut Scene,
        series: &[Series],
        scales: Option<&Scales>,
        options: &ChartOptions,
        pointer: Point,
    ) -> ReconcileStats {
        let (Some(local), Some(scales)) = (scene.plot.to_local(pointer), scales) else {
            return self.leave(scene);
        };
        let target = scales.x.invert_millis(local.x);

        if let Some(guide) = scene.guide.as_mut() {
            guide.x = local.x;
            guide.opacity = 1.0;
        }

        let focus = nearest_points(series, target);
        let Scene { focus_rings, ids, .. } = &mut *scene;
        let radius = options.focus_ring_radius;
        let center = |f: &Focus| Point::new(scales.x.millis_to_px(f.millis), scales.y.to_px(f.value));
        let stats = reconcile(
            focus_rings,
            &focus,
            |r| r.key.as_str(),
            |f| f.key.as_str(),
            |f| FocusRing { id: ids.next(), key: f.key.clone(), center: center(f), radius, stroke: f.color },
            |ring, f| {
                ring.center = center(f);
                ring.stroke = f.color;
            },
        );

        let current = scene.tooltip.fade.settled();
        if focus.is_empty() {
            scene.tooltip.fade = Fade { from: current, to: 0.0, duration_ms: TOOLTIP_FADE_OUT_MS };
        } else {
            let (header, rows) = tooltip_content(&focus);
            scene.tooltip.header = header;
            scene.tooltip.rows = rows;
            scene.tooltip.anchor = Point::new(pointer.x + TOOLTIP_OFFSET.x, pointer.y + TOOLTIP_OFFSET.y);
            scene.tooltip.fade = Fade { from: current, to: TOOLTIP_OPACITY, duration_ms: TOOLTIP_FADE_IN_MS };
        }

        if self.state == HoverState::Idle {
            trace!(x = pointer.x, y = pointer.y, "hover: tracking");
        }
        self.state = HoverState::Tracking { pointer };
        stats
    }

    /// Pointer left the plot: hide the guide, clear the rings, fade the tooltip out.
    pub fn leave(&mut self, scene: &mut Scene) -> ReconcileStats {
        if let Some(guide) = scene.guide.as_mut() {
            guide.opacity = 0.0;
        }
        let exited = scene.focus_rings.len();
        scene.focus_rings.clear();
        let current = scene.tooltip.fade.settled();
        scene.tooltip.fade = Fade { from: current, to: 0.0, duration_ms: TOOLTIP_FADE_OUT_MS };
        if let HoverState::Tracking { .. } = self.state {
            trace!("hover: idle");
        }
        self.state = HoverState::Idle;
        ReconcileStats { exited, ..Default::default() }
    }
}
