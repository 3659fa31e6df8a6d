// File: crates/timechart-core/src/series.rs
// Summary: Named time series with validated accessors, derived domain and nearest-point lookup.
// Notes:
// - Projected x (epoch millis) and y values are cached next to the data so that
//   lookups, domains and rendering never re-run accessors.
// - Data is kept sorted by the x accessor; the sort is stable, ties keep input order.

use chrono::{DateTime, Utc};

use crate::color::{Rgb, COOL};
use crate::error::{ChartError, Result, ValidationError};
use crate::observation::{Accessors, Observation, TimeAccessor};

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesOptions {
    /// Stroke color; reassigned by the chart on every structural change.
    pub color: Rgb,
    /// Label used by the tooltip, falls back to the series name.
    pub display_name: Option<String>,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self { color: COOL[0], display_name: None }
    }
}

/// Min/max extent of a series along both dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub x: (DateTime<Utc>, DateTime<Utc>),
    pub y: (f64, f64),
}

#[derive(Clone, Debug)]
pub struct Series {
    name: String,
    data: Vec<Observation>,
    accessors: Accessors,
    pub options: SeriesOptions,
    xs: Vec<i64>,
    ys: Vec<f64>,
    domain: Domain,
}

struct Projection {
    order: Vec<usize>,
    xs: Vec<i64>,
    ys: Vec<f64>,
    domain: Domain,
}

impl Series {
    /// Build a series, validating that every observation yields a time and an integer value.
    pub fn new(name: impl Into<String>, data: Vec<Observation>, accessors: Accessors) -> Result<Self> {
        let name = name.into();
        if data.is_empty() {
            return Err(ChartError::EmptySeries(name));
        }
        let p = project(&name, &data, &accessors)?;
        let data = reorder(data, &p.order);
        Ok(Self { name, data, accessors, options: SeriesOptions::default(), xs: p.xs, ys: p.ys, domain: p.domain })
    }

    pub fn with_options(mut self, options: SeriesOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.options.display_name = Some(display_name.into());
        self
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn data(&self) -> &[Observation] { &self.data }
    pub fn accessors(&self) -> &Accessors { &self.accessors }
    pub fn domain(&self) -> &Domain { &self.domain }
    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Tooltip label: display name when set, else the series name.
    pub fn label(&self) -> &str {
        self.options.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Projected `(epoch millis, value)` pairs in x order.
    pub fn points(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Projected `(epoch millis, value)` of the observation at `index`.
    pub fn point(&self, index: usize) -> Option<(i64, f64)> {
        Some((*self.xs.get(index)?, *self.ys.get(index)?))
    }

    /// Replace the accessors. On validation failure the series is left untouched.
    /// Does not redraw; the owning chart does that.
    pub fn set_accessors(&mut self, accessors: Accessors) -> Result<()> {
        let p = project(&self.name, &self.data, &accessors)?;
        self.data = reorder(std::mem::take(&mut self.data), &p.order);
        self.accessors = accessors;
        self.xs = p.xs;
        self.ys = p.ys;
        self.domain = p.domain;
        Ok(())
    }

    /// Nearest observation at or before `target`.
    ///
    /// Returns `None` before the first observation, and past the last one once the
    /// distance exceeds the gap between the last two observations.
    pub fn find(&self, target: DateTime<Utc>) -> Option<&Observation> {
        self.find_index(target.timestamp_millis()).map(|i| &self.data[i])
    }

    /// Index form of [`Series::find`] on epoch milliseconds.
    pub fn find_index(&self, target_millis: i64) -> Option<usize> {
        let i = self.xs.partition_point(|&x| x <= target_millis).checked_sub(1)?;
        let last = self.xs.len() - 1;
        if i == last && last > 0 {
            let gap = self.xs[last].saturating_sub(self.xs[last - 1]);
            if target_millis.saturating_sub(self.xs[last]) > gap {
                return None;
            }
        }
        Some(i)
    }
}

fn is_integer(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0
}

fn project(name: &str, data: &[Observation], accessors: &Accessors) -> Result<Projection, ValidationError> {
    let mut keyed = Vec::with_capacity(data.len());
    for (index, obs) in data.iter().enumerate() {
        let x = accessors
            .x
            .millis(obs)
            .filter(|&ms| DateTime::from_timestamp_millis(ms).is_some())
            .ok_or_else(|| ValidationError::MissingTime {
                series: name.to_string(),
                index,
                field: match &accessors.x {
                    TimeAccessor::EpochMillis(field) => field.clone(),
                    TimeAccessor::Timestamp => "time".to_string(),
                },
            })?;
        let y = accessors.y.get(obs);
        if !is_integer(y) {
            return Err(ValidationError::NonInteger { series: name.to_string(), index, value: y });
        }
        keyed.push((x, y, index));
    }
    keyed.sort_by_key(|&(x, _, _)| x);

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(_, y, _) in &keyed {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    let time_at = |k: Option<&(i64, f64, usize)>| {
        k.and_then(|k| DateTime::from_timestamp_millis(k.0)).unwrap_or_default()
    };
    let domain = Domain { x: (time_at(keyed.first()), time_at(keyed.last())), y: (y_min, y_max) };
    Ok(Projection {
        order: keyed.iter().map(|k| k.2).collect(),
        xs: keyed.iter().map(|k| k.0).collect(),
        ys: keyed.iter().map(|k| k.1).collect(),
        domain,
    })
}

fn reorder(data: Vec<Observation>, order: &[usize]) -> Vec<Observation> {
    let mut slots: Vec<Option<Observation>> = data.into_iter().map(Some).collect();
    order.iter().filter_map(|&i| slots[i].take()).collect()
}
