//! mackerel-agent plugin output
//!
//! Values are printed one per line as `{prefix}.{graph}.{metric}\t{value}\t{epoch}`.
//! When the agent asks for metadata, a `# mackerel-agent-plugin` header is
//! followed by the graph definitions as JSON instead.

pub mod error;
pub mod state;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::aggregator::MetricValues;
use crate::schema::{GRAPHS, GraphDef, Unit, has_diff};

pub use error::{ReportError, ReportResult};
pub use state::LastValues;

const META_HEADER: &str = "# mackerel-agent-plugin";

#[derive(Debug, Serialize)]
struct GraphDefinitions<'a> {
    graphs: BTreeMap<String, GraphOutput<'a>>,
}

#[derive(Debug, Serialize)]
struct GraphOutput<'a> {
    label: &'a str,
    unit: Unit,
    metrics: Vec<MetricOutput<'a>>,
}

#[derive(Debug, Serialize)]
struct MetricOutput<'a> {
    name: &'a str,
    label: &'a str,
    stacked: bool,
}

#[derive(Debug, Clone)]
pub struct Reporter {
    prefix: String,
    tempfile: PathBuf,
    graphs: &'static [GraphDef],
}

impl Reporter {
    pub fn new(prefix: impl Into<String>, tempfile: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            tempfile: tempfile.into(),
            graphs: GRAPHS,
        }
    }

    /// Report against a different graph table
    pub fn with_graphs(mut self, graphs: &'static [GraphDef]) -> Self {
        self.graphs = graphs;
        self
    }

    fn join_key(&self, parts: &[&str]) -> String {
        std::iter::once(self.prefix.as_str())
            .chain(parts.iter().copied())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn write_definitions<W: Write>(&self, out: &mut W) -> ReportResult<()> {
        let graphs = self
            .graphs
            .iter()
            .map(|graph| {
                let output = GraphOutput {
                    label: graph.label,
                    unit: graph.unit,
                    metrics: graph
                        .metrics
                        .iter()
                        .map(|metric| MetricOutput {
                            name: metric.name,
                            label: metric.label,
                            stacked: metric.stacked,
                        })
                        .collect(),
                };
                (self.join_key(&[graph.key]), output)
            })
            .collect();

        writeln!(out, "{META_HEADER}")?;
        serde_json::to_writer(&mut *out, &GraphDefinitions { graphs })?;
        writeln!(out)?;
        Ok(())
    }

    /// Print every schema metric present in `metrics`
    ///
    /// Diff metrics are turned into per-minute rates against the tempfile,
    /// which is rewritten with the current values afterwards.
    #[instrument(skip_all, fields(prefix = %self.prefix))]
    pub fn write_values<W: Write>(
        &self,
        out: &mut W,
        metrics: &MetricValues,
        now: DateTime<Utc>,
    ) -> ReportResult<()> {
        let diffing = has_diff(self.graphs);

        let last = if diffing {
            LastValues::load(&self.tempfile).unwrap_or_else(|e| {
                warn!("ignoring last values in {}: {e}", self.tempfile.display());
                LastValues::default()
            })
        } else {
            LastValues::default()
        };

        let epoch = now.timestamp();

        for graph in self.graphs {
            for metric in graph.metrics {
                let Some(&value) = metrics.get(metric.name) else {
                    debug!("no value for {}.{}", graph.key, metric.name);
                    continue;
                };

                let value = if metric.diff {
                    match last.per_minute(metric.name, value, now) {
                        Some(rate) => rate,
                        None => {
                            debug!("no delta for {}.{} yet", graph.key, metric.name);
                            continue;
                        }
                    }
                } else {
                    value
                };

                writeln!(
                    out,
                    "{}\t{:.6}\t{}",
                    self.join_key(&[graph.key, metric.name]),
                    value,
                    epoch
                )?;
            }
        }

        if diffing {
            LastValues::new(metrics.clone(), now).save(&self.tempfile)?;
        }

        Ok(())
    }
}
