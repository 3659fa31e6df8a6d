// File: crates/timechart-core/src/source.rs
// Summary: Decoding of JSON metric documents into observations.
// Notes:
// - A document is an array whose first element carries `metricValues`, a list of
//   `{ "startTimeInMillis": i64, "value": number, ...extra }` records.
// - Extra record fields are preserved on the observation for field accessors.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ChartError, Result};
use crate::observation::Observation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawObservation {
    start_time_in_millis: i64,
    value: f64,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawObservation> for Observation {
    type Error = ChartError;

    fn try_from(raw: RawObservation) -> Result<Self> {
        let mut obs = Observation::from_millis(raw.start_time_in_millis, raw.value)
            .ok_or(ChartError::InvalidTimestamp(raw.start_time_in_millis))?;
        obs.fields = raw.extra;
        Ok(obs)
    }
}

/// Decode a metric document held in memory.
pub fn parse_metric_document(json: &str) -> Result<Vec<Observation>> {
    let doc: Value = serde_json::from_str(json)?;
    let values = doc
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get("metricValues"))
        .ok_or(ChartError::TypeMismatch { expected: "array whose first element has `metricValues`" })?;
    if !values.is_array() {
        return Err(ChartError::TypeMismatch { expected: "`metricValues` array" });
    }
    let raw: Vec<RawObservation> = serde_json::from_value(values.clone())?;
    raw.into_iter().map(Observation::try_from).collect()
}

/// Read and decode a metric document from disk.
pub fn read_metric_file(path: impl AsRef<Path>) -> Result<Vec<Observation>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let observations = parse_metric_document(&text)?;
    debug!(path = %path.display(), count = observations.len(), "metric document decoded");
    Ok(observations)
}
