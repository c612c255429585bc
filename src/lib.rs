pub mod aggregator;
pub mod client;
pub mod config;
pub mod report;
pub mod schema;
pub mod util;

pub use aggregator::{FetchError, MetricAggregator, MetricValues};
pub use client::{EpgStationClient, StationApi};
pub use report::Reporter;
