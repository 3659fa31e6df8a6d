// File: crates/timechart-core/src/color.rs
// Summary: RGB colors, series palettes and index-based color assignment.

use std::fmt;

use serde::{Deserialize, Serialize};
use skia_safe as skia;

use crate::series::Series;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channel-wise linear interpolation in RGB space, rounded to the nearest integer.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_skia(self, alpha: f32) -> skia::Color {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        skia::Color::from_argb(a, self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Blue-to-pink ramp.
pub const COOL: [Rgb; 8] = [
    Rgb::new(0xB2, 0xDF, 0xDB),
    Rgb::new(0x00, 0xC8, 0xD5),
    Rgb::new(0x03, 0xA9, 0xF4),
    Rgb::new(0x1D, 0x69, 0xE7),
    Rgb::new(0x40, 0x2D, 0x9F),
    Rgb::new(0x67, 0x3A, 0xB7),
    Rgb::new(0x9C, 0x27, 0xB0),
    Rgb::new(0xE9, 0x1E, 0x63),
];

/// Green-to-red ramp.
pub const WARM: [Rgb; 8] = [
    Rgb::new(0x4C, 0xAF, 0x50),
    Rgb::new(0x8B, 0xC3, 0x4A),
    Rgb::new(0xCD, 0xDC, 0x39),
    Rgb::new(0xFF, 0xEB, 0x3B),
    Rgb::new(0xFF, 0xC1, 0x07),
    Rgb::new(0xFF, 0x98, 0x00),
    Rgb::new(0xFF, 0x57, 0x22),
    Rgb::new(0xF4, 0x43, 0x36),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Cool,
    Warm,
}

impl Palette {
    pub fn stops(&self) -> &'static [Rgb] {
        match self {
            Palette::Cool => &COOL,
            Palette::Warm => &WARM,
        }
    }
}

/// Continuous color scale spreading `stops` evenly over `count` positions:
/// position 0 takes the first stop, position `count - 1` the last. A lone
/// position collapses every stop onto 0 and resolves to the second-to-last stop.
#[derive(Clone, Copy, Debug)]
pub struct ColorScale<'a> {
    stops: &'a [Rgb],
    count: usize,
}

impl<'a> ColorScale<'a> {
    pub fn new(stops: &'a [Rgb], count: usize) -> Self {
        Self { stops, count }
    }

    pub fn color(&self, index: usize) -> Rgb {
        let Some(&first) = self.stops.first() else {
            return Rgb::new(0, 0, 0);
        };
        if self.stops.len() == 1 {
            return first;
        }
        if self.count <= 1 {
            return self.stops[self.stops.len() - 2];
        }
        let segments = self.stops.len() - 1;
        let t = index.min(self.count - 1) as f64 * segments as f64 / (self.count - 1) as f64;
        let k = (t.floor() as usize).min(segments - 1);
        self.stops[k].lerp(self.stops[k + 1], t - k as f64)
    }
}

/// Recolor every series from scratch for the current count and order.
pub fn assign_colors(series: &mut [Series], palette: Palette) {
    let scale = ColorScale::new(palette.stops(), series.len());
    for (i, s) in series.iter_mut().enumerate() {
        s.options.color = scale.color(i);
    }
}
