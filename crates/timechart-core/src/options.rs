// File: crates/timechart-core/src/options.rs
// Summary: Widget configuration (canvas size, feature toggles, layout knobs) and raster options.

use serde::{Deserialize, Serialize};

use crate::color::Palette;
use crate::error::{ChartError, Result};
use crate::geometry::PlotRect;
use crate::types::{Margins, HEIGHT, WIDTH};

fn yes() -> bool { true }
fn x_ticks() -> usize { 8 }
fn x_minor_ticks() -> usize { 16 }
fn y_ticks() -> usize { 10 }
fn tick_size() -> f32 { 10.0 }
fn label_wrap_width() -> f32 { 35.0 }
fn marker_radius() -> f32 { 2.0 }
fn focus_ring_radius() -> f32 { 5.0 }
fn theme() -> String { "light".to_string() }
fn x_label() -> Option<String> { Some("Date".to_string()) }

/// Chart options. `width` and `height` are required when deserializing; every
/// other key falls back to its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub margins: Margins,
    /// Horizontal gridlines at the y ticks.
    #[serde(default = "yes")]
    pub grid: bool,
    #[serde(default = "yes")]
    pub axis_bottom: bool,
    #[serde(default = "yes")]
    pub axis_left: bool,
    /// Marker circles on every observation.
    #[serde(default = "yes")]
    pub rings: bool,
    /// Pointer tracking: guide line, focus rings, tooltip.
    #[serde(default = "yes")]
    pub hover: bool,
    /// Dashed lines from every marker to both axes.
    #[serde(default)]
    pub crosshairs: bool,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default = "theme")]
    pub theme: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "x_label")]
    pub x_label: Option<String>,
    #[serde(default)]
    pub y_label: Option<String>,
    #[serde(default = "x_ticks")]
    pub x_ticks: usize,
    #[serde(default = "x_minor_ticks")]
    pub x_minor_ticks: usize,
    #[serde(default = "y_ticks")]
    pub y_ticks: usize,
    #[serde(default = "tick_size")]
    pub tick_size: f32,
    /// Pixel budget before an x tick label wraps onto another line.
    #[serde(default = "label_wrap_width")]
    pub label_wrap_width: f32,
    #[serde(default = "marker_radius")]
    pub marker_radius: f32,
    #[serde(default = "focus_ring_radius")]
    pub focus_ring_radius: f32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

impl ChartOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            margins: Margins::default(),
            grid: true,
            axis_bottom: true,
            axis_left: true,
            rings: true,
            hover: true,
            crosshairs: false,
            palette: Palette::default(),
            theme: theme(),
            title: None,
            x_label: x_label(),
            y_label: None,
            x_ticks: x_ticks(),
            x_minor_ticks: x_minor_ticks(),
            y_ticks: y_ticks(),
            tick_size: tick_size(),
            label_wrap_width: label_wrap_width(),
            marker_radius: marker_radius(),
            focus_ring_radius: focus_ring_radius(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Plot area in canvas pixels; empty when the margins leave no room.
    pub fn plot_rect(&self) -> PlotRect {
        self.margins
            .plot_rect(self.width, self.height)
            .unwrap_or(PlotRect::from_ltwh(self.margins.left as f32, self.margins.top as f32, 0.0, 0.0))
    }

    /// Plot area size in pixels (canvas minus margins).
    pub fn plot_size(&self) -> (f32, f32) {
        let plot = self.plot_rect();
        (plot.width, plot.height)
    }

    pub fn validate(&self) -> Result<()> {
        if self.margins.plot_rect(self.width, self.height).is_none() {
            return Err(ChartError::InvalidOptions(format!(
                "{}x{} canvas leaves no plot area inside margins {:?}",
                self.width, self.height, self.margins
            )));
        }
        if self.label_wrap_width <= 0.0 {
            return Err(ChartError::InvalidOptions("labelWrapWidth must be positive".to_string()));
        }
        Ok(())
    }
}

/// Raster output settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    /// Skip all text; snapshot tests use this to avoid font variance.
    pub draw_labels: bool,
    /// Device pixels per canvas pixel.
    pub pixel_ratio: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { draw_labels: true, pixel_ratio: 1.0 }
    }
}
