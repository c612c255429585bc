//! The EPGStation API surface the aggregator depends on

use std::fmt;

use async_trait::async_trait;

use super::error::ClientResult;
use super::types::{
    ApiResponse, EncodeQueue, RecordingList, ReserveCounts, StorageList, StreamList,
};

/// The five endpoints polled on every run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Streams,
    ReserveCounts,
    Recording,
    Encode,
    Storages,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Streams => "/api/streams",
            Endpoint::ReserveCounts => "/api/reserves/cnts",
            Endpoint::Recording => "/api/recording",
            Endpoint::Encode => "/api/encode",
            Endpoint::Storages => "/api/storages",
        }
    }

    /// Listing endpoints are asked not to fold full-width characters.
    pub fn query(&self) -> Option<&'static str> {
        match self {
            Endpoint::Streams | Endpoint::Recording | Endpoint::Encode => {
                Some("isHalfWidth=false")
            }
            Endpoint::ReserveCounts | Endpoint::Storages => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Streams => "streams",
            Endpoint::ReserveCounts => "reserve counts",
            Endpoint::Recording => "recording",
            Endpoint::Encode => "encode",
            Endpoint::Storages => "storages",
        };
        f.write_str(name)
    }
}

/// Read access to an EPGStation instance
///
/// Implementations return the decoded response including its status
/// envelope; checking `status.code` is left to the caller.
#[async_trait]
pub trait StationApi: Send + Sync {
    async fn streams(&self) -> ClientResult<ApiResponse<StreamList>>;

    async fn reserve_counts(&self) -> ClientResult<ApiResponse<ReserveCounts>>;

    async fn recording(&self) -> ClientResult<ApiResponse<RecordingList>>;

    async fn encode(&self) -> ClientResult<ApiResponse<EncodeQueue>>;

    async fn storages(&self) -> ClientResult<ApiResponse<StorageList>>;
}
