// File: crates/timechart-core/src/text.rs
// Summary: Text measurement seam plus the Skia textlayout shaper used for painting labels.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

use crate::color::Rgb;

/// Font size of tick labels, in pixels.
pub const LABEL_SIZE: f32 = 10.0;

/// Width of a run of text at a given font size, used for label wrapping.
pub trait TextMeasure {
    fn width(&self, text: &str, size: f32) -> f32;
}

/// Every character advances by `advance` ems. Deterministic, needs no fonts.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvance {
    pub advance: f32,
}

impl FixedAdvance {
    pub const fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl TextMeasure for FixedAdvance {
    fn width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * self.advance * size
    }
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, align: TextAlign) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(align);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Draw `text` with its baseline at `y`, anchored at `x` on the left, center or right.
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: Rgb, anchor: Anchor) {
        let mut p = self.layout(text, size, color.to_skia(1.0), TextAlign::Left);
        let w = p.longest_line();
        let left = match anchor {
            Anchor::Start => x,
            Anchor::Middle => x - w * 0.5,
            Anchor::End => x - w,
        };
        // Paragraph draws from top-left; adjust baseline by glyph height approximation
        p.paint(canvas, (left, y - size * 0.8));
    }
}

impl TextMeasure for TextShaper {
    fn width(&self, text: &str, size: f32) -> f32 {
        self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0), TextAlign::Left).longest_line()
    }
}

/// Horizontal text anchor, as in SVG's `text-anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_svg(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}
