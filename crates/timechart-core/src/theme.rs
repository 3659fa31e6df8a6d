// File: crates/timechart-core/src/theme.rs
// Summary: Light/Dark theming for chart chrome (series colors come from the palette).

use crate::color::Rgb;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgb,
    pub grid: Rgb,
    pub axis_line: Rgb,
    pub axis_label: Rgb,
    pub tick: Rgb,
    pub title: Rgb,
    pub guide_line: Rgb,
    pub marker_fill: Rgb,
    pub crosshair: Rgb,
    pub tooltip_background: Rgb,
    pub tooltip_text: Rgb,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgb::new(255, 255, 255),
            grid: Rgb::new(230, 230, 235),
            axis_line: Rgb::new(60, 60, 70),
            axis_label: Rgb::new(20, 20, 30),
            tick: Rgb::new(100, 100, 110),
            title: Rgb::new(20, 20, 30),
            guide_line: Rgb::new(120, 120, 130),
            marker_fill: Rgb::new(255, 255, 255),
            crosshair: Rgb::new(160, 160, 170),
            tooltip_background: Rgb::new(176, 196, 222),
            tooltip_text: Rgb::new(20, 20, 30),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgb::new(18, 18, 20),
            grid: Rgb::new(40, 40, 45),
            axis_line: Rgb::new(180, 180, 190),
            axis_label: Rgb::new(235, 235, 245),
            tick: Rgb::new(150, 150, 160),
            title: Rgb::new(235, 235, 245),
            guide_line: Rgb::new(255, 230, 70),
            marker_fill: Rgb::new(18, 18, 20),
            crosshair: Rgb::new(90, 90, 100),
            tooltip_background: Rgb::new(40, 40, 48),
            tooltip_text: Rgb::new(235, 235, 245),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_default()
}
