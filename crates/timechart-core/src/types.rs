// File: crates/timechart-core/src/types.rs
// Summary: Canvas defaults and the margins that carve the plot area out of the canvas.

use serde::{Deserialize, Serialize};

use crate::geometry::PlotRect;

/// Canvas width used when options do not say otherwise.
pub const WIDTH: u32 = 800;
/// Canvas height used when options do not say otherwise.
pub const HEIGHT: u32 = 600;

/// Space around the plot, in pixels. The left margin holds the y axis and its rotated
/// title, the bottom one the wrapped date labels and the x title.
/// Missing keys in JSON take their default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margins {
    /// CSS order: top, right, bottom, left.
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Plot area of a `width` x `height` canvas; `None` when the margins leave nothing.
    pub fn plot_rect(&self, width: u32, height: u32) -> Option<PlotRect> {
        let w = width.checked_sub(self.left.checked_add(self.right)?).filter(|&w| w > 0)?;
        let h = height.checked_sub(self.top.checked_add(self.bottom)?).filter(|&h| h > 0)?;
        Some(PlotRect::from_ltwh(self.left as f32, self.top as f32, w as f32, h as f32))
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(50, 20, 60, 90)
    }
}
