// File: crates/timechart-core/src/scale.rs
// Summary: Time (X) and value (Y) scales plus the domain union they are built from.

use chrono::{DateTime, Utc};

use crate::series::Series;
use crate::ticks::{linear_ticks, time_ticks};

/// Headroom above the largest value so the top point never touches the plot edge.
pub const Y_HEADROOM: f64 = 1.05;

/// Continuous linear map from a data domain onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) { self.domain }
    pub fn range(&self) -> (f32, f32) { self.range }

    /// A collapsed domain maps everything to the middle of the range.
    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) * 0.5;
        }
        r0 + ((v - d0) / span) as f32 * (r1 - r0)
    }

    #[inline]
    pub fn from_px(&self, px: f32) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return d0;
        }
        d0 + ((px - r0) / span) as f64 * (d1 - d0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Linear scale over instants; the domain is held in epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f32, f32)) -> Self {
        let domain = (domain.0.timestamp_millis() as f64, domain.1.timestamp_millis() as f64);
        Self { inner: LinearScale::new(domain, range) }
    }

    #[inline]
    pub fn millis_to_px(&self, millis: i64) -> f32 {
        self.inner.to_px(millis as f64)
    }

    #[inline]
    pub fn to_px(&self, t: DateTime<Utc>) -> f32 {
        self.millis_to_px(t.timestamp_millis())
    }

    /// Inverse map, in epoch milliseconds (rounded to the nearest millisecond).
    pub fn invert_millis(&self, px: f32) -> i64 {
        self.inner.from_px(px).round() as i64
    }

    pub fn invert(&self, px: f32) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.invert_millis(px))
    }

    pub fn domain(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (d0, d1) = self.inner.domain();
        let at = |ms: f64| DateTime::from_timestamp_millis(ms as i64).unwrap_or_default();
        (at(d0), at(d1))
    }

    pub fn range(&self) -> (f32, f32) { self.inner.range() }

    pub fn ticks(&self, count: usize) -> Vec<DateTime<Utc>> {
        let (d0, d1) = self.domain();
        time_ticks(d0, d1, count)
    }
}

/// Union of all series domains; y always starts at zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domains {
    pub x: (DateTime<Utc>, DateTime<Utc>),
    pub y: (f64, f64),
}

impl Domains {
    /// `None` for an empty collection: there is nothing to scale against.
    pub fn from_series(series: &[Series]) -> Option<Self> {
        let first = series.first()?.domain();
        let mut x = first.x;
        let mut y_max = first.y.1;
        for s in &series[1..] {
            let d = s.domain();
            x.0 = x.0.min(d.x.0);
            x.1 = x.1.max(d.x.1);
            y_max = y_max.max(d.y.1);
        }
        Some(Self { x, y: (0.0, y_max * Y_HEADROOM) })
    }
}

/// Scales for the current redraw, y inverted so that zero sits on the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    pub x: TimeScale,
    pub y: LinearScale,
}

impl Scales {
    pub fn new(domains: &Domains, plot_width: f32, plot_height: f32) -> Self {
        Self {
            x: TimeScale::new(domains.x, (0.0, plot_width)),
            y: LinearScale::new(domains.y, (plot_height, 0.0)),
        }
    }
}
