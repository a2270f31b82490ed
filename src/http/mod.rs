mod cf;
mod feature;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, VersionsError};
use crate::upload::UploadForm;

pub use cf::{format_errors, ApiError, CfApiClient};
pub use feature::Feature;

/// A response whose body is handed back untouched.
#[derive(Clone, Debug, Default)]
pub struct RawResponse {
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// The authenticated calls the versions commands make against the
/// management API. Paths are relative to the API base URL.
///
/// Implementations surface failures as `NotFound`, `Transport` or
/// `PublishRejected` and never retry.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// GETs `path` and returns the `result` of the API envelope.
    async fn fetch_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value>;

    /// GETs `path` and returns headers and body as they arrived.
    async fn fetch_raw(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse>;

    /// POSTs an upload form and returns the `result` of the API envelope.
    async fn post_form(
        &self,
        path: &str,
        query: &[(&str, &str)],
        headers: HeaderMap,
        form: UploadForm,
    ) -> Result<Value>;
}

pub async fn fetch_result<T, C>(client: &C, path: &str, query: &[(&str, &str)]) -> Result<T>
where
    T: DeserializeOwned,
    C: ApiClient + ?Sized,
{
    let result = client.fetch_json(path, query).await?;
    serde_json::from_value(result)
        .map_err(|e| VersionsError::malformed(format!("unexpected result from {}: {}", path, e)))
}
