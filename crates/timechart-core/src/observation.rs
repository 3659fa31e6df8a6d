// File: crates/timechart-core/src/observation.rs
// Summary: Timestamped observations and the accessor pair that projects them onto (time, value).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One timestamped sample. Fields beyond `time`/`value` are carried opaquely
/// and only become visible to the chart through a field accessor.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub time: DateTime<Utc>,
    pub value: f64,
    pub fields: Map<String, Value>,
}

impl Observation {
    pub fn new(time: DateTime<Utc>, value: f64) -> Self {
        Self { time, value, fields: Map::new() }
    }

    /// Build from epoch milliseconds; `None` when the instant is out of chrono's range.
    pub fn from_millis(millis: i64, value: f64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|time| Self::new(time, value))
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Numeric extra field, if present.
    pub fn field_f64(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }
}

/// Where the x position of an observation comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum TimeAccessor {
    /// The observation's own timestamp.
    #[default]
    Timestamp,
    /// An extra field holding epoch milliseconds.
    EpochMillis(String),
}

impl TimeAccessor {
    /// Epoch milliseconds of `obs`, `None` when a field-based accessor finds nothing usable.
    pub fn millis(&self, obs: &Observation) -> Option<i64> {
        match self {
            TimeAccessor::Timestamp => Some(obs.time.timestamp_millis()),
            TimeAccessor::EpochMillis(field) => obs
                .fields
                .get(field)
                .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))),
        }
    }
}

/// Where the y value of an observation comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum ValueAccessor {
    #[default]
    Value,
    /// A numeric extra field, e.g. `min`.
    Field(String),
}

impl ValueAccessor {
    /// Value of `obs`; NaN when the field is missing or not numeric.
    pub fn get(&self, obs: &Observation) -> f64 {
        match self {
            ValueAccessor::Value => obs.value,
            ValueAccessor::Field(field) => obs.field_f64(field).unwrap_or(f64::NAN),
        }
    }
}

/// The (x, y) accessor pair of a series.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessors {
    pub x: TimeAccessor,
    pub y: ValueAccessor,
}

impl Accessors {
    pub fn new(x: TimeAccessor, y: ValueAccessor) -> Self {
        Self { x, y }
    }

    /// Timestamp on x, the named field on y.
    pub fn value_field(field: impl Into<String>) -> Self {
        Self::new(TimeAccessor::Timestamp, ValueAccessor::Field(field.into()))
    }
}
