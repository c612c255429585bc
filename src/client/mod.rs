//! HTTP client for the EPGStation REST API
//!
//! Every call is a single GET whose full body is read and decoded into an
//! [`ApiResponse`]. There are no retries and no timeout beyond the transport
//! default; a failed call surfaces as a [`ClientError`].

pub mod api;
pub mod error;
pub mod types;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{instrument, trace};

pub use api::{Endpoint, StationApi};
pub use error::{ClientError, ClientResult};
pub use types::{
    ApiResponse, ApiStatus, EncodeJob, EncodeQueue, RecordingList, RecordingRecord, ReserveCounts,
    StorageList, StorageVolume, StreamKind, StreamList, StreamRecord,
};

/// Identifier sent as the User-Agent on every request
pub const USER_AGENT: &str = concat!("mackerel-plugin-epgstation/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct EpgStationClient {
    base_url: Url,
    client: reqwest::Client,
}

impl EpgStationClient {
    /// Create a client for `http://{host}:{port}`
    pub fn new(host: &str, port: u16) -> ClientResult<Self> {
        let base_url = Url::parse(&format!("http://{host}:{port}"))
            .map_err(|e| ClientError::InvalidRequest(format!("{host}:{port}: {e}")))?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an endpoint, including its fixed query
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(endpoint.path());
        url.set_query(endpoint.query());
        url
    }

    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> ClientResult<ApiResponse<T>> {
        let url = self.endpoint_url(endpoint);

        trace!("requesting {url}");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        let body = response.text().await?;

        trace!("{url}: received {} bytes (HTTP {status})", body.len());

        let decoded = serde_json::from_str(&body)?;
        Ok(decoded)
    }
}

#[async_trait]
impl StationApi for EpgStationClient {
    async fn streams(&self) -> ClientResult<ApiResponse<StreamList>> {
        self.get(Endpoint::Streams).await
    }

    async fn reserve_counts(&self) -> ClientResult<ApiResponse<ReserveCounts>> {
        self.get(Endpoint::ReserveCounts).await
    }

    async fn recording(&self) -> ClientResult<ApiResponse<RecordingList>> {
        self.get(Endpoint::Recording).await
    }

    async fn encode(&self) -> ClientResult<ApiResponse<EncodeQueue>> {
        self.get(Endpoint::Encode).await
    }

    async fn storages(&self) -> ClientResult<ApiResponse<StorageList>> {
        self.get(Endpoint::Storages).await
    }
}
