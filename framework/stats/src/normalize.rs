use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::extract::{extract_keys_and_values, RawStats};
use crate::number::Number;

/// The single category that holds the totals of a run.
pub const COMBINED: &str = "Combined";

/// How a raw value is coerced into the normalized schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coercion {
    Int,
    Float,
}

/// A metric of the normalized schema and the raw label it is read from.
struct Metric {
    name: &'static str,
    raw_key: &'static str,
    coercion: Coercion,
}

/// The normalized schema. This is the only place that knows the tool's label text.
const METRICS: [Metric; 5] = [
    Metric {
        name: "Wrk requests",
        raw_key: "Transactions",
        coercion: Coercion::Int,
    },
    Metric {
        name: "Wrk wall sec",
        raw_key: "Elapsed time",
        coercion: Coercion::Float,
    },
    Metric {
        name: "Wrk RPS",
        raw_key: "Transaction rate",
        coercion: Coercion::Float,
    },
    Metric {
        name: "Wrk successful requests",
        raw_key: "Successful transactions",
        coercion: Coercion::Int,
    },
    Metric {
        name: "Wrk failed requests",
        raw_key: "Failed transactions",
        coercion: Coercion::Int,
    },
];

/// Error produced while collecting stats from a run.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Failed to read log file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The tool's output format changed or the run never produced a report.
    #[error("Required stat '{key}' missing from wrk output")]
    MissingMetric { key: String },
}

/// Stats in the stable schema that callers depend on: category, then metric name, then value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedStats(BTreeMap<String, BTreeMap<String, Number>>);

impl NormalizedStats {
    /// Look up a single metric.
    pub fn get(&self, category: &str, metric: &str) -> Option<Number> {
        self.0.get(category)?.get(metric).copied()
    }

    /// The metrics of one category.
    pub fn category(&self, category: &str) -> Option<&BTreeMap<String, Number>> {
        self.0.get(category)
    }

    pub fn into_inner(self) -> BTreeMap<String, BTreeMap<String, Number>> {
        self.0
    }
}

/// Map the raw stats onto the normalized schema.
///
/// Every metric is required. A missing one is an error and is never replaced by a default,
/// since a zero would silently corrupt benchmark comparisons.
pub fn normalize(raw: &RawStats) -> Result<NormalizedStats, StatsError> {
    let mut combined = BTreeMap::new();
    for metric in &METRICS {
        let value = raw
            .get(metric.raw_key)
            .ok_or_else(|| StatsError::MissingMetric {
                key: metric.raw_key.to_string(),
            })?;

        let value = match metric.coercion {
            Coercion::Int => Number::Int(value.as_int()),
            Coercion::Float => Number::Float(value.as_float()),
        };
        combined.insert(metric.name.to_string(), value);
    }

    Ok(NormalizedStats(BTreeMap::from([(
        COMBINED.to_string(),
        combined,
    )])))
}

/// Read a run's log file and produce its normalized stats.
///
/// Only call this once the process writing the log has exited.
pub fn collect_stats(log_file: &Path) -> Result<NormalizedStats, StatsError> {
    let bytes = std::fs::read(log_file).map_err(|source| StatsError::Io {
        path: log_file.display().to_string(),
        source,
    })?;

    // Invalid UTF-8 only spoils the line it is on.
    normalize(&extract_keys_and_values(&String::from_utf8_lossy(&bytes)))
}
