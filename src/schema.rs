//! Graph definitions reported to mackerel-agent
//!
//! The table is static: five graphs, fourteen metrics. Metric names are the
//! keys of the mapping produced by the aggregator; the reporter prefixes them
//! with `{prefix}.{graph}.` when printing.

use serde::Serialize;

pub const KEY_STREAMS_LIVE_STREAM: &str = "live_stream";
pub const KEY_STREAMS_LIVE_HLS: &str = "live_hls";
pub const KEY_STREAMS_RECORDED_STREAM: &str = "recorded_stream";
pub const KEY_STREAMS_RECORDED_HLS: &str = "recorded_hls";
pub const KEY_RESERVE_NORMAL: &str = "normal";
pub const KEY_RESERVE_SKIPS: &str = "skips";
pub const KEY_RESERVE_OVERLAPS: &str = "overlaps";
pub const KEY_RESERVE_CONFLICTS: &str = "conflicts";
pub const KEY_RECORDING_COUNT: &str = "recording";
pub const KEY_ENCODE_RUNNING: &str = "running";
pub const KEY_ENCODE_WAITING: &str = "waiting";
pub const KEY_STORAGES_AVAILABLE: &str = "available";
pub const KEY_STORAGES_USED: &str = "used";
pub const KEY_STORAGES_TOTAL: &str = "total";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Integer,
    Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDef {
    pub name: &'static str,
    pub label: &'static str,
    pub stacked: bool,
    /// Report the per-minute delta against the previous run instead of the raw value
    pub diff: bool,
}

impl MetricDef {
    const fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            stacked: false,
            diff: false,
        }
    }

    const fn stacked(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            stacked: true,
            diff: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphDef {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: Unit,
    pub metrics: &'static [MetricDef],
}

pub static GRAPHS: &[GraphDef] = &[
    GraphDef {
        key: "streams",
        label: "EPGStation Streams",
        unit: Unit::Integer,
        metrics: &[
            MetricDef::stacked(KEY_STREAMS_LIVE_STREAM, "Live Stream"),
            MetricDef::stacked(KEY_STREAMS_LIVE_HLS, "Live HLS"),
            MetricDef::stacked(KEY_STREAMS_RECORDED_STREAM, "Recorded Stream"),
            MetricDef::stacked(KEY_STREAMS_RECORDED_HLS, "Recorded HLS"),
        ],
    },
    GraphDef {
        key: "reservation",
        label: "EPGStation Reservation",
        unit: Unit::Integer,
        metrics: &[
            MetricDef::stacked(KEY_RESERVE_NORMAL, "Normal"),
            MetricDef::stacked(KEY_RESERVE_SKIPS, "Skips"),
            MetricDef::stacked(KEY_RESERVE_OVERLAPS, "Overlaps"),
            MetricDef::stacked(KEY_RESERVE_CONFLICTS, "Conflicts"),
        ],
    },
    GraphDef {
        key: "recording",
        label: "EPGStation Recording",
        unit: Unit::Integer,
        metrics: &[MetricDef::new(KEY_RECORDING_COUNT, "Count")],
    },
    GraphDef {
        key: "encode",
        label: "EPGStation Encoding",
        unit: Unit::Integer,
        metrics: &[
            MetricDef::stacked(KEY_ENCODE_RUNNING, "Running"),
            MetricDef::stacked(KEY_ENCODE_WAITING, "Waiting"),
        ],
    },
    GraphDef {
        key: "storages",
        label: "EPGStation Storages",
        unit: Unit::Bytes,
        metrics: &[
            MetricDef::new(KEY_STORAGES_TOTAL, "Total"),
            MetricDef::stacked(KEY_STORAGES_AVAILABLE, "Available"),
            MetricDef::stacked(KEY_STORAGES_USED, "Used"),
        ],
    },
];

/// Every metric name declared in `graphs`, in declaration order
pub fn metric_names(graphs: &[GraphDef]) -> impl Iterator<Item = &'static str> + '_ {
    graphs
        .iter()
        .flat_map(|graph| graph.metrics.iter().map(|metric| metric.name))
}

pub fn has_diff(graphs: &[GraphDef]) -> bool {
    graphs
        .iter()
        .any(|graph| graph.metrics.iter().any(|metric| metric.diff))
}
