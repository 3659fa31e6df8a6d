// File: crates/timechart-core/src/lib.rs
// Summary: Core library entry point; exports the time-series chart widget and its building blocks.

pub mod chart;
pub mod color;
pub mod error;
pub mod geometry;
pub mod hover;
pub mod observation;
pub mod options;
pub mod raster;
pub mod reconcile;
pub mod render;
pub mod scale;
pub mod scene;
pub mod series;
pub mod source;
pub mod svg;
pub mod text;
pub mod theme;
pub mod ticks;
pub mod types;
pub mod wrap;

pub use chart::Chart;
pub use color::{assign_colors, ColorScale, Palette, Rgb};
pub use error::{ChartError, Result, ValidationError};
pub use hover::HoverState;
pub use observation::{Accessors, Observation, TimeAccessor, ValueAccessor};
pub use options::{ChartOptions, RenderOptions};
pub use reconcile::{diff_keys, KeyedDiff, ReconcileStats};
pub use scale::{Domains, Scales};
pub use scene::Scene;
pub use series::{Series, SeriesOptions};
pub use source::{parse_metric_document, read_metric_file};
pub use text::{FixedAdvance, TextMeasure, TextShaper};
pub use theme::Theme;
pub use wrap::wrap_words;
