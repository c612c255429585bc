//! MetricAggregator - folds the five EPGStation responses into gauges
//!
//! ## Flow
//!
//! ```text
//! streams → reserve counts → recording → encode → storages → MetricValues
//! ```
//!
//! Calls run strictly one after the other. The first transport failure or
//! non-zero status code aborts the run; no partial mapping is returned.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::client::{
    ApiResponse, ApiStatus, ClientError, ClientResult, EncodeQueue, Endpoint, RecordingList,
    ReserveCounts, StationApi, StorageList, StreamKind, StreamList,
};
use crate::schema::*;

/// Metric name to value, keyed by the names declared in [`crate::schema::GRAPHS`]
pub type MetricValues = BTreeMap<String, f64>;

/// Why a metrics run was aborted
#[derive(Debug)]
pub enum FetchError {
    /// The request failed or the body could not be decoded
    Client {
        endpoint: Endpoint,
        source: ClientError,
    },

    /// EPGStation answered with a non-zero status code
    Application { endpoint: Endpoint, status: ApiStatus },
}

impl FetchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            FetchError::Client { endpoint, .. } | FetchError::Application { endpoint, .. } => {
                *endpoint
            }
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Client { endpoint, source } => {
                write!(f, "failed to get {}: {}", endpoint, source)
            }
            FetchError::Application { endpoint, status } => write!(
                f,
                "failed to get {}: {}: {}, {}",
                endpoint,
                status.code,
                status.message.as_deref().unwrap_or_default(),
                status.errors.as_deref().unwrap_or_default()
            ),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Client { source, .. } => Some(source),
            FetchError::Application { .. } => None,
        }
    }
}

/// Unwrap a response, rejecting transport failures and non-zero status codes
fn accept<T>(endpoint: Endpoint, response: ClientResult<ApiResponse<T>>) -> Result<T, FetchError> {
    let ApiResponse { status, payload } =
        response.map_err(|source| FetchError::Client { endpoint, source })?;

    if !status.is_ok() {
        return Err(FetchError::Application { endpoint, status });
    }

    Ok(payload)
}

pub struct MetricAggregator<A> {
    api: A,
}

impl<A: StationApi> MetricAggregator<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Run one collection cycle against the API
    #[instrument(skip_all)]
    pub async fn fetch_metrics(&self) -> Result<MetricValues, FetchError> {
        let mut metrics = MetricValues::new();

        let streams = accept(Endpoint::Streams, self.api.streams().await)?;
        fold_streams(&mut metrics, &streams);

        let counts = accept(Endpoint::ReserveCounts, self.api.reserve_counts().await)?;
        fold_reserve_counts(&mut metrics, &counts);

        let recording = accept(Endpoint::Recording, self.api.recording().await)?;
        fold_recording(&mut metrics, &recording);

        let encode = accept(Endpoint::Encode, self.api.encode().await)?;
        fold_encode(&mut metrics, &encode);

        let storages = accept(Endpoint::Storages, self.api.storages().await)?;
        fold_storages(&mut metrics, &storages);

        debug!("collected {} metrics", metrics.len());

        Ok(metrics)
    }
}

#[cfg(test)]
impl<A> MetricAggregator<A> {
    fn api(&self) -> &A {
        &self.api
    }
}

/// Count streams per kind; unrecognised tags are ignored
pub fn fold_streams(metrics: &mut MetricValues, streams: &StreamList) {
    let (mut ls, mut lh, mut rs, mut rh) = (0.0, 0.0, 0.0, 0.0);

    for stream in &streams.items {
        match stream.kind() {
            Some(StreamKind::LiveStream) => ls += 1.0,
            Some(StreamKind::LiveHls) => lh += 1.0,
            Some(StreamKind::RecordedStream) => rs += 1.0,
            Some(StreamKind::RecordedHls) => rh += 1.0,
            None => trace!("ignoring stream {} with type {:?}", stream.stream_id, stream.tag),
        }
    }

    metrics.insert(KEY_STREAMS_LIVE_STREAM.to_string(), ls);
    metrics.insert(KEY_STREAMS_LIVE_HLS.to_string(), lh);
    metrics.insert(KEY_STREAMS_RECORDED_STREAM.to_string(), rs);
    metrics.insert(KEY_STREAMS_RECORDED_HLS.to_string(), rh);
}

pub fn fold_reserve_counts(metrics: &mut MetricValues, counts: &ReserveCounts) {
    metrics.insert(KEY_RESERVE_NORMAL.to_string(), counts.normal as f64);
    metrics.insert(KEY_RESERVE_SKIPS.to_string(), counts.skips as f64);
    metrics.insert(KEY_RESERVE_OVERLAPS.to_string(), counts.overlaps as f64);
    metrics.insert(KEY_RESERVE_CONFLICTS.to_string(), counts.conflicts as f64);
}

pub fn fold_recording(metrics: &mut MetricValues, recording: &RecordingList) {
    metrics.insert(
        KEY_RECORDING_COUNT.to_string(),
        recording.records.len() as f64,
    );
}

pub fn fold_encode(metrics: &mut MetricValues, encode: &EncodeQueue) {
    metrics.insert(
        KEY_ENCODE_RUNNING.to_string(),
        encode.running_items.len() as f64,
    );
    metrics.insert(
        KEY_ENCODE_WAITING.to_string(),
        encode.wait_items.len() as f64,
    );
}

/// Sum byte counts across volumes; accumulated as f64 so huge totals cannot overflow
pub fn fold_storages(metrics: &mut MetricValues, storages: &StorageList) {
    let (available, used, total) = storages
        .items
        .iter()
        .fold((0.0, 0.0, 0.0), |(available, used, total), volume| {
            (
                available + volume.available as f64,
                used + volume.used as f64,
                total + volume.total as f64,
            )
        });

    metrics.insert(KEY_STORAGES_AVAILABLE.to_string(), available);
    metrics.insert(KEY_STORAGES_USED.to_string(), used);
    metrics.insert(KEY_STORAGES_TOTAL.to_string(), total);
}
