//! Last-run values kept in the tempfile
//!
//! The file is a flat JSON object of metric values plus a `_lastTime` entry
//! holding the unix time of the run that wrote it.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::trace;

use super::error::ReportResult;
use crate::aggregator::MetricValues;

const LAST_TIME_KEY: &str = "_lastTime";

/// Runs further apart than this do not produce a delta
pub const MAX_DIFF_SECONDS: i64 = 600;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LastValues {
    pub values: MetricValues,
    pub last_time: Option<DateTime<Utc>>,
}

impl LastValues {
    pub fn new(values: MetricValues, last_time: DateTime<Utc>) -> Self {
        Self {
            values,
            last_time: Some(last_time),
        }
    }

    /// Load the previous run; a missing file is an empty state
    pub fn load(path: &Path) -> ReportResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!("no previous values at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut values: BTreeMap<String, f64> = serde_json::from_str(&content)?;
        let last_time = values
            .remove(LAST_TIME_KEY)
            .and_then(|seconds| DateTime::from_timestamp(seconds as i64, 0));

        Ok(Self { values, last_time })
    }

    /// Replace the file atomically with the current values
    pub fn save(&self, path: &Path) -> ReportResult<()> {
        let mut values = self.values.clone();
        if let Some(last_time) = self.last_time {
            values.insert(LAST_TIME_KEY.to_string(), last_time.timestamp() as f64);
        }

        let content = serde_json::to_string(&values)?;

        let staging = path.with_extension("tmp");
        std::fs::write(&staging, content)?;
        std::fs::rename(&staging, path)?;

        trace!("saved {} values to {}", self.values.len(), path.display());
        Ok(())
    }

    /// Per-minute rate of `name` since the previous run
    ///
    /// `None` when there is no previous value, the runs are too far apart
    /// (or not apart at all), or the counter went backwards.
    pub fn per_minute(&self, name: &str, value: f64, now: DateTime<Utc>) -> Option<f64> {
        let last_value = *self.values.get(name)?;
        let elapsed = (now - self.last_time?).num_seconds();

        if elapsed <= 0 || elapsed > MAX_DIFF_SECONDS {
            return None;
        }

        if value < last_value {
            return None;
        }

        Some((value - last_value) * 60.0 / elapsed as f64)
    }
}
