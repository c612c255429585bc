//! Response records of the EPGStation API
//!
//! All records are lenient: missing fields fall back to their defaults and
//! unknown fields are ignored, so error bodies (which only carry the status
//! envelope) decode into empty payloads.

use serde::{Deserialize, Deserializer};

/// Status envelope every EPGStation response may carry
///
/// A non-zero `code` signals an application-level failure, even when the
/// HTTP request itself succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiStatus {
    #[serde(deserialize_with = "null_as_zero")]
    pub code: i64,
    pub message: Option<String>,
    pub errors: Option<String>,
}

impl ApiStatus {
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

/// A decoded response: the status envelope paired with the typed payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(flatten)]
    pub payload: T,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Kinds of streams EPGStation can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    LiveStream,
    LiveHls,
    RecordedStream,
    RecordedHls,
}

impl StreamKind {
    /// Exact match on the wire tag, anything else is not a known kind.
    pub fn from_tag(tag: &str) -> Option<StreamKind> {
        match tag {
            "LiveStream" => Some(StreamKind::LiveStream),
            "LiveHLS" => Some(StreamKind::LiveHls),
            "RecordedStream" => Some(StreamKind::RecordedStream),
            "RecordedHLS" => Some(StreamKind::RecordedHls),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamList {
    pub items: Vec<StreamRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamRecord {
    pub stream_id: i64,
    #[serde(rename = "type")]
    pub tag: Option<String>,
    pub mode: i64,
    pub is_enable: bool,
    pub channel_id: Option<i64>,
    pub video_file_id: Option<i64>,
    pub recorded_id: Option<i64>,
    pub name: Option<String>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
}

impl StreamRecord {
    pub fn kind(&self) -> Option<StreamKind> {
        self.tag.as_deref().and_then(StreamKind::from_tag)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReserveCounts {
    pub normal: u64,
    pub conflicts: u64,
    pub skips: u64,
    pub overlaps: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordingList {
    pub records: Vec<RecordingRecord>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordingRecord {
    pub id: i64,
    pub rule_id: Option<i64>,
    pub program_id: Option<i64>,
    pub channel_id: Option<i64>,
    pub name: Option<String>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub is_recording: bool,
    pub is_encoding: bool,
    pub is_protected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncodeQueue {
    pub running_items: Vec<EncodeJob>,
    pub wait_items: Vec<EncodeJob>,
}

/// One transcode job, with the nested recorded program reduced to its id
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "EncodeJobWire")]
pub struct EncodeJob {
    pub id: i64,
    pub mode: Option<String>,
    pub percent: Option<f64>,
    pub log: Option<String>,
    pub recorded_id: Option<i64>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct EncodeJobWire {
    id: i64,
    mode: Option<String>,
    percent: Option<f64>,
    log: Option<String>,
    recorded: Option<RecordedRef>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RecordedRef {
    id: i64,
}

impl From<EncodeJobWire> for EncodeJob {
    fn from(wire: EncodeJobWire) -> Self {
        EncodeJob {
            id: wire.id,
            mode: wire.mode,
            percent: wire.percent,
            log: wire.log,
            recorded_id: wire.recorded.map(|recorded| recorded.id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageList {
    pub items: Vec<StorageVolume>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageVolume {
    pub name: String,
    pub available: u64,
    pub used: u64,
    pub total: u64,
}
