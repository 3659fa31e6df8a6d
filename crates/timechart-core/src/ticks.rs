// File: crates/timechart-core/src/ticks.rs
// Summary: Tick layout for value and time axes, plus the matching label formats.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};
use num_format::{Locale, ToFormattedString};

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;
/// 1970-01-04 was the first Sunday after the epoch.
const FIRST_SUNDAY: i64 = 3 * DAY;

/// Step between "nice" ticks (1, 2 or 5 times a power of ten) covering `[start, stop]`
/// with roughly `count` ticks. Negative results encode `1 / step` for sub-unit steps.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Absolute distance between nice ticks.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let inc = tick_increment(start.min(stop), start.max(stop), count);
    if inc < 0.0 { -1.0 / inc } else { inc }
}

/// Nice, evenly spaced values inside `[start, stop]`.
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = (start.min(stop), start.max(stop));
    let inc = tick_increment(lo, hi, count);
    if !inc.is_finite() || inc == 0.0 {
        return Vec::new();
    }
    let mut ticks: Vec<f64> = if inc > 0.0 {
        let (i0, i1) = ((lo / inc).ceil() as i64, (hi / inc).floor() as i64);
        (i0..=i1).map(|i| i as f64 * inc).collect()
    } else {
        let inv = -inc;
        let (i0, i1) = ((lo * inv).ceil() as i64, (hi * inv).floor() as i64);
        (i0..=i1).map(|i| i as f64 / inv).collect()
    };
    if stop < start {
        ticks.reverse();
    }
    ticks
}

/// Label for a value tick, with as many decimals as the tick step needs.
pub fn format_value_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 { (-step.log10().floor()) as usize } else { 0 };
    group_thousands(value, decimals)
}

/// Fixed-point rendering with `,` between groups of three integer digits.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let text = format!("{:.decimals$}", value.abs());
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (text.as_str(), None),
    };
    // "-0" reads badly on an axis
    let zero = text.chars().all(|c| c == '0' || c == '.');
    let sign = if value.is_sign_negative() && !zero { "-" } else { "" };
    let int = int
        .parse::<u128>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| int.to_string());
    match frac {
        Some(frac) => format!("{sign}{int}.{frac}"),
        None => format!("{sign}{int}"),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimeInterval {
    Millis(i64),
    Week,
    Months(u32),
    Years(i32),
}

const INTERVALS: [(TimeInterval, i64); 17] = [
    (TimeInterval::Millis(SECOND), SECOND),
    (TimeInterval::Millis(5 * SECOND), 5 * SECOND),
    (TimeInterval::Millis(15 * SECOND), 15 * SECOND),
    (TimeInterval::Millis(30 * SECOND), 30 * SECOND),
    (TimeInterval::Millis(MINUTE), MINUTE),
    (TimeInterval::Millis(5 * MINUTE), 5 * MINUTE),
    (TimeInterval::Millis(15 * MINUTE), 15 * MINUTE),
    (TimeInterval::Millis(30 * MINUTE), 30 * MINUTE),
    (TimeInterval::Millis(HOUR), HOUR),
    (TimeInterval::Millis(3 * HOUR), 3 * HOUR),
    (TimeInterval::Millis(6 * HOUR), 6 * HOUR),
    (TimeInterval::Millis(12 * HOUR), 12 * HOUR),
    (TimeInterval::Millis(DAY), DAY),
    (TimeInterval::Millis(2 * DAY), 2 * DAY),
    (TimeInterval::Week, WEEK),
    (TimeInterval::Months(1), MONTH),
    (TimeInterval::Months(3), 3 * MONTH),
];

fn choose_interval(span: i64, count: usize) -> TimeInterval {
    let target = span as f64 / count.max(1) as f64;
    let i = INTERVALS.partition_point(|&(_, ms)| (ms as f64) <= target);
    if i == INTERVALS.len() {
        let years = tick_step(0.0, span as f64 / YEAR as f64, count).max(1.0);
        return TimeInterval::Years(years as i32);
    }
    if i == 0 {
        let ms = tick_step(0.0, span as f64, count).max(1.0);
        return TimeInterval::Millis(ms as i64);
    }
    let (below, below_ms) = INTERVALS[i - 1];
    let (above, above_ms) = INTERVALS[i];
    if target / (below_ms as f64) < (above_ms as f64) / target { below } else { above }
}

fn first_multiple(lo: i64, step: i64, offset: i64) -> i64 {
    let base = (lo - offset).div_euclid(step) * step + offset;
    if base < lo { base + step } else { base }
}

fn month_start(year: i32, month0: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month0 + 1, 1, 0, 0, 0).single()
}

/// Tick instants inside `[start, stop]`, aligned to calendar boundaries in UTC.
pub fn time_ticks(start: DateTime<Utc>, stop: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    let (lo, hi) = (start.min(stop), start.max(stop));
    if count == 0 {
        return Vec::new();
    }
    if lo == hi {
        return vec![lo];
    }
    let (lo_ms, hi_ms) = (lo.timestamp_millis(), hi.timestamp_millis());
    let mut out = Vec::new();
    match choose_interval(hi_ms - lo_ms, count) {
        TimeInterval::Millis(step) => {
            let mut t = first_multiple(lo_ms, step, 0);
            while t <= hi_ms {
                out.extend(DateTime::from_timestamp_millis(t));
                t += step;
            }
        }
        TimeInterval::Week => {
            let mut t = first_multiple(lo_ms, WEEK, FIRST_SUNDAY);
            while t <= hi_ms {
                out.extend(DateTime::from_timestamp_millis(t));
                t += WEEK;
            }
        }
        TimeInterval::Months(every) => {
            let (mut year, mut month0) = (lo.year(), lo.month0());
            while let Some(t) = month_start(year, month0) {
                if t > hi {
                    break;
                }
                if t >= lo && month0 % every == 0 {
                    out.push(t);
                }
                month0 += 1;
                if month0 == 12 {
                    month0 = 0;
                    year += 1;
                }
            }
        }
        TimeInterval::Years(every) => {
            let mut year = lo.year();
            while let Some(t) = month_start(year, 0) {
                if t > hi {
                    break;
                }
                if t >= lo && year.rem_euclid(every) == 0 {
                    out.push(t);
                }
                year += 1;
            }
        }
    }
    out
}

/// Multi-scale label: the coarsest unit at which `t` is not on a boundary decides the format.
pub fn format_time_tick(t: DateTime<Utc>) -> String {
    let fmt = if t.nanosecond() != 0 {
        "%.3f"
    } else if t.second() != 0 {
        ":%S"
    } else if t.minute() != 0 {
        "%I:%M"
    } else if t.hour() != 0 {
        "%I %p"
    } else if t.day() != 1 {
        if t.weekday() != Weekday::Sun { "%a %d" } else { "%b %d" }
    } else if t.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    t.format(fmt).to_string()
}
