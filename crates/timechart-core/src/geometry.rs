// File: crates/timechart-core/src/geometry.rs
// Summary: Points and the plot rectangle, in canvas pixels.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Plot area in canvas pixels. Shapes inside the scene use plot-local coordinates,
/// i.e. relative to `(left, top)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PlotRect {
    pub const fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a canvas position into plot-local coordinates when it lies inside the plot.
    pub fn to_local(&self, canvas: Point) -> Option<Point> {
        let x = canvas.x - self.left;
        let y = canvas.y - self.top;
        let inside = x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height;
        inside.then_some(Point::new(x, y))
    }
}
