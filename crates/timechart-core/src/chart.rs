// File: crates/timechart-core/src/chart.rs
// Summary: Chart widget state (series collection, scales, scene, hover) and its public operations.

use std::collections::HashSet;

use tracing::debug;

use crate::color::assign_colors;
use crate::error::{ChartError, Result};
use crate::geometry::Point;
use crate::hover::{HoverController, HoverState};
use crate::observation::{Accessors, Observation};
use crate::options::{ChartOptions, RenderOptions};
use crate::reconcile::ReconcileStats;
use crate::render::{draw_axes, draw_series};
use crate::scale::{Domains, Scales};
use crate::scene::Scene;
use crate::series::Series;
use crate::svg::SvgDocument;
use crate::text::{TextMeasure, TextShaper};
use crate::theme::{self, Theme};

pub struct Chart {
    options: ChartOptions,
    theme: Theme,
    series: Vec<Series>,
    scales: Option<Scales>,
    scene: Scene,
    hover: HoverController,
    measure: Box<dyn TextMeasure>,
    mounted: bool,
}

impl Chart {
    /// Mount a chart measuring labels with the system fonts.
    pub fn new(options: ChartOptions) -> Result<Self> {
        Self::with_text_measure(options, TextShaper::new())
    }

    pub fn with_text_measure(options: ChartOptions, measure: impl TextMeasure + 'static) -> Result<Self> {
        options.validate()?;
        let theme = theme::find(&options.theme);
        let scene = Scene::new(&options);
        Ok(Self {
            options,
            theme,
            series: Vec::new(),
            scales: None,
            scene,
            hover: HoverController::new(),
            measure: Box::new(measure),
            mounted: true,
        })
    }

    pub fn options(&self) -> &ChartOptions { &self.options }
    pub fn theme(&self) -> &Theme { &self.theme }
    pub fn series(&self) -> &[Series] { &self.series }
    pub fn scales(&self) -> Option<&Scales> { self.scales.as_ref() }
    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn hover_state(&self) -> HoverState { self.hover.state() }
    pub fn is_mounted(&self) -> bool { self.mounted }

    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name() == name)
    }

    fn ensure_mounted(&self) -> Result<()> {
        if self.mounted { Ok(()) } else { Err(ChartError::Detached) }
    }

    /// Append a series and redraw. Names are the reconciliation key and must be unique.
    pub fn add_series(&mut self, series: Series) -> Result<ReconcileStats> {
        self.ensure_mounted()?;
        if self.series_named(series.name()).is_some() {
            return Err(ChartError::DuplicateSeries(series.name().to_string()));
        }
        self.series.push(series);
        Ok(self.redraw())
    }

    /// Replace the whole collection; series missing from `desired` exit on this pass.
    pub fn set_series(&mut self, desired: Vec<Series>) -> Result<ReconcileStats> {
        self.ensure_mounted()?;
        {
            let mut seen = HashSet::with_capacity(desired.len());
            if let Some(dup) = desired.iter().find(|s| !seen.insert(s.name())) {
                return Err(ChartError::DuplicateSeries(dup.name().to_string()));
            }
        }
        self.series = desired;
        Ok(self.redraw())
    }

    /// Apply `accessors` to every series, then redraw. All series are validated
    /// before any is changed, so a failure leaves the chart as it was.
    pub fn set_accessors(&mut self, accessors: Accessors) -> Result<ReconcileStats> {
        self.ensure_mounted()?;
        let mut staged = self.series.clone();
        for s in &mut staged {
            s.set_accessors(accessors.clone())?;
        }
        self.series = staged;
        Ok(self.redraw())
    }

    /// A data source finished loading. Builds a series with default accessors and adds it.
    /// Completions arriving after teardown are dropped and yield `Ok(None)`.
    pub fn on_data_loaded(&mut self, name: &str, observations: Vec<Observation>) -> Result<Option<ReconcileStats>> {
        if !self.mounted {
            debug!(series = name, "chart torn down, dropping late data");
            return Ok(None);
        }
        let series = Series::new(name, observations, Accessors::default())?;
        self.add_series(series).map(Some)
    }

    /// Full redraw: recolor, rescale, refresh axes, reconcile series groups by name.
    pub fn redraw(&mut self) -> ReconcileStats {
        if !self.mounted {
            return ReconcileStats::default();
        }
        assign_colors(&mut self.series, self.options.palette);

        let (plot_w, plot_h) = self.options.plot_size();
        self.scales = Domains::from_series(&self.series).map(|d| Scales::new(&d, plot_w, plot_h));

        draw_axes(&mut self.scene.axes, self.scales.as_ref(), &self.options, self.measure.as_ref());
        let Scene { series: nodes, ids, .. } = &mut self.scene;
        let stats = draw_series(nodes, ids, &self.series, self.scales.as_ref(), &self.options);
        debug!(
            series = self.series.len(),
            entered = stats.entered,
            updated = stats.updated,
            exited = stats.exited,
            "redraw"
        );

        // Keep the overlay in step with the new scales.
        if let HoverState::Tracking { pointer } = self.hover.state() {
            self.hover.track(&mut self.scene, &self.series, self.scales.as_ref(), &self.options, pointer);
        }
        stats
    }

    /// Pointer moved to canvas position `(x, y)`. Returns focus-ring reconciliation counts.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> ReconcileStats {
        if !self.mounted || !self.options.hover {
            return ReconcileStats::default();
        }
        self.hover.track(&mut self.scene, &self.series, self.scales.as_ref(), &self.options, Point::new(x, y))
    }

    pub fn pointer_leave(&mut self) -> ReconcileStats {
        if !self.mounted || !self.options.hover {
            return ReconcileStats::default();
        }
        self.hover.leave(&mut self.scene)
    }

    /// Release every shape and the series collection; later loads are ignored.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.hover.leave(&mut self.scene);
        self.scene.clear();
        self.series.clear();
        self.scales = None;
        self.mounted = false;
        debug!("chart torn down");
    }

    /// Render the current scene to PNG bytes using a CPU raster surface.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> anyhow::Result<Vec<u8>> {
        crate::raster::render_png(&self.scene, &self.theme, opts)
    }

    /// Render the current scene to a PNG at `output_png_path`.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    /// Serialize the current scene as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        SvgDocument::new(&self.scene, &self.theme).to_string()
    }
}
