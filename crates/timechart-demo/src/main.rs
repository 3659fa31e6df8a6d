// File: crates/timechart-demo/src/main.rs
// Summary: Demo loads metric files on worker threads, feeds them to a chart, simulates a hover and writes PNG/SVG.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use timechart_core::{read_metric_file, Accessors, Chart, ChartOptions, Observation, RenderOptions};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[clap(author, version, about = "Render metric files as a time-series line chart", long_about = None)]
struct Args {
    /// Directory holding `*.json` metric documents and `*.csv` metric tables.
    #[clap(long, default_value = "demos/data")]
    data_dir: PathBuf,

    /// Chart options as JSON (`width`/`height` required).
    #[clap(long)]
    options: Option<PathBuf>,

    /// Output directory for the rendered files.
    #[clap(long, default_value = "target/out")]
    out_dir: PathBuf,

    /// Simulated pointer x, in canvas pixels. Defaults to the plot center.
    #[clap(long)]
    hover_x: Option<f32>,

    /// Simulated pointer y, in canvas pixels. Defaults to the plot center.
    #[clap(long)]
    hover_y: Option<f32>,

    /// Also render with this numeric field on the y axis (e.g. `min`).
    #[clap(long)]
    value_field: Option<String>,

    /// Theme preset, overrides the options file.
    #[clap(long)]
    theme: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut options = match &args.options {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            ChartOptions::from_json_str(&text)?
        }
        None => ChartOptions::default(),
    };
    if let Some(theme) = &args.theme {
        options.theme = theme.clone();
    }

    let files = discover(&args.data_dir)?;
    if files.is_empty() {
        anyhow::bail!("no *.json or *.csv files in {}", args.data_dir.display());
    }
    info!(count = files.len(), dir = %args.data_dir.display(), "loading metric files");

    let mut chart = Chart::new(options)?;

    // One loader per file; completions are applied on this thread in arrival order.
    let (tx, rx) = mpsc::channel::<(String, Result<Vec<Observation>>)>();
    for path in files {
        let tx = tx.clone();
        thread::spawn(move || {
            let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("series").to_string();
            let loaded = load(&path).with_context(|| format!("loading {}", path.display()));
            let _ = tx.send((name, loaded));
        });
    }
    drop(tx);

    for (name, loaded) in rx {
        match loaded.and_then(|obs| Ok(chart.on_data_loaded(&name, obs)?)) {
            Ok(Some(stats)) => info!(series = %name, entered = stats.entered, updated = stats.updated, "series added"),
            Ok(None) => {}
            Err(e) => warn!(series = %name, error = %e, "series skipped"),
        }
    }

    let plot = chart.scene().plot;
    let pointer_x = args.hover_x.unwrap_or(plot.left + plot.width * 0.5);
    let pointer_y = args.hover_y.unwrap_or(plot.top + plot.height * 0.5);
    let rings = chart.pointer_move(pointer_x, pointer_y);
    info!(x = pointer_x, y = pointer_y, rings = rings.entered, "hover simulated");

    write_outputs(&chart, &args.out_dir, "timechart")?;

    if let Some(field) = &args.value_field {
        chart
            .set_accessors(Accessors::value_field(field.clone()))
            .with_context(|| format!("switching value field to `{field}`"))?;
        write_outputs(&chart, &args.out_dir, &format!("timechart_{field}"))?;
    }

    chart.teardown();
    Ok(())
}

fn write_outputs(chart: &Chart, out_dir: &Path, stem: &str) -> Result<()> {
    std::fs::create_dir_all(out_dir)?;
    let png = out_dir.join(format!("{stem}.png"));
    chart.render_to_png(&RenderOptions::default(), &png)?;
    let svg = png.with_extension("svg");
    std::fs::write(&svg, chart.to_svg())?;
    info!(png = %png.display(), svg = %svg.display(), "wrote chart");
    Ok(())
}

/// Metric files in `dir`, sorted by name.
fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        if matches!(ext.as_deref(), Some("json") | Some("csv")) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load(path: &Path) -> Result<Vec<Observation>> {
    let is_csv = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        load_metric_csv(path)
    } else {
        Ok(read_metric_file(path)?)
    }
}

/// Load a metric table: a time column in epoch millis, a `value` column, and any
/// other numeric columns as extra fields.
fn load_metric_csv(path: &Path) -> Result<Vec<Observation>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_string()).collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)));
    let i_time = idx(&["startTimeInMillis", "time", "timestamp"]).context("missing time column")?;
    let i_value = idx(&["value"]).context("missing value column")?;

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let millis: i64 = rec
            .get(i_time)
            .and_then(|s| s.parse().ok())
            .with_context(|| format!("row {row}: bad time"))?;
        let value: f64 = rec
            .get(i_value)
            .and_then(|s| s.parse().ok())
            .with_context(|| format!("row {row}: bad value"))?;
        let mut obs = Observation::from_millis(millis, value)
            .with_context(|| format!("row {row}: timestamp {millis} out of range"))?;
        for (i, field) in rec.iter().enumerate() {
            if i == i_time || i == i_value {
                continue;
            }
            if let Ok(v) = field.parse::<f64>() {
                obs = obs.with_field(headers[i].clone(), v);
            }
        }
        out.push(obs);
    }
    Ok(out)
}
