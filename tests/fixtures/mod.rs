// Each integration test uses a different slice of these helpers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};

use worker_versions::http::{ApiClient, RawResponse};
use worker_versions::upload::UploadForm;
use worker_versions::{Result, VersionsError};

pub const ACCOUNT_ID: &str = "account";
pub const SCRIPT_NAME: &str = "my-worker";
pub const BOUNDARY: &str = "----WorkerBoundaryFixture";

pub fn script_path() -> String {
    format!("/accounts/{}/workers/scripts/{}", ACCOUNT_ID, SCRIPT_NAME)
}

pub fn version_path(version_id: &str) -> String {
    format!("{}/versions/{}", script_path(), version_id)
}

pub fn versions_path() -> String {
    format!("{}/versions", script_path())
}

pub fn content_path() -> String {
    format!("{}/content/v2", script_path())
}

pub fn settings_path() -> String {
    format!("{}/script-settings", script_path())
}

pub fn deployments_path() -> String {
    format!("{}/deployments", script_path())
}

/// A version as the API describes it, with the given bindings.
pub fn version_details(version_id: &str, bindings: Value) -> Value {
    json!({
        "id": version_id,
        "number": 1,
        "metadata": {
            "author_email": "dev@example.com",
            "author_id": "author",
            "created_on": "2024-01-01T00:00:00Z",
            "modified_on": "2024-01-01T00:00:00Z",
            "source": "wrangler"
        },
        "annotations": { "workers/triggered_by": "upload" },
        "resources": {
            "bindings": bindings,
            "script": {
                "etag": "etag-1",
                "handlers": ["fetch"],
                "last_deployed_from": "wrangler"
            },
            "script_runtime": {
                "compatibility_date": "2024-01-01",
                "compatibility_flags": [],
                "usage_model": "standard"
            }
        }
    })
}

pub fn version_summary(version_id: &str, number: u64) -> Value {
    json!({
        "id": version_id,
        "number": number,
        "metadata": { "source": "wrangler" }
    })
}

pub fn multipart_content(entrypoint: Option<&str>, parts: &[(&str, &str, &str)]) -> RawResponse {
    let mut body = String::new();
    for (name, content_type, content) in parts {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n{}\r\n",
            BOUNDARY, name, name, content_type, content
        ));
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));

    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_str(&format!("multipart/form-data; boundary={}", BOUNDARY)).unwrap(),
    );
    if let Some(entrypoint) = entrypoint {
        headers.insert("cf-entrypoint", HeaderValue::from_str(entrypoint).unwrap());
    }
    RawResponse {
        headers,
        body: Bytes::from(body),
    }
}

pub fn single_body_content(content_type: &str, body: &str) -> RawResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
    RawResponse {
        headers,
        body: Bytes::copy_from_slice(body.as_bytes()),
    }
}

fn owned_query(query: &[(&str, &str)]) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// An upload the fake received.
pub struct PostedForm {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub form: UploadForm,
}

/// Serves canned API responses keyed by path and records every call.
pub struct FakeApiClient {
    json: HashMap<String, Value>,
    raw: HashMap<String, RawResponse>,
    publish_result: Option<Value>,
    requests: Mutex<Vec<String>>,
    queries: Mutex<Vec<(String, Vec<(String, String)>)>>,
    posted: Mutex<Vec<PostedForm>>,
}

impl Default for FakeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeApiClient {
    pub fn new() -> Self {
        FakeApiClient {
            json: HashMap::new(),
            raw: HashMap::new(),
            publish_result: Some(json!({
                "available_on_subdomain": true,
                "id": "new-version",
                "etag": "etag-2",
                "deployment_id": null
            })),
            requests: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            posted: Mutex::new(Vec::new()),
        }
    }

    /// A script with one version `v1` holding `bindings` and `content`.
    pub fn with_version(bindings: Value, content: RawResponse) -> Self {
        FakeApiClient::with_version_details(version_details("v1", bindings), content)
    }

    /// A script with one version `v1` described by `details`.
    pub fn with_version_details(details: Value, content: RawResponse) -> Self {
        FakeApiClient::new()
            .with_json(version_path("v1"), details)
            .with_json(settings_path(), json!({ "logpush": false, "tail_consumers": [] }))
            .with_raw(content_path(), content)
    }

    pub fn with_json(mut self, path: String, result: Value) -> Self {
        self.json.insert(path, result);
        self
    }

    pub fn with_raw(mut self, path: String, response: RawResponse) -> Self {
        self.raw.insert(path, response);
        self
    }

    pub fn rejecting_uploads(mut self) -> Self {
        self.publish_result = None;
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn posted(&self) -> MutexGuard<'_, Vec<PostedForm>> {
        self.posted.lock().unwrap()
    }

    /// Query parameters of every request made to `path`, oldest first.
    pub fn queries_for(&self, path: &str) -> Vec<Vec<(String, String)>> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|(requested, _)| requested == path)
            .map(|(_, query)| query.clone())
            .collect()
    }

    fn record(&self, method: &str, path: &str, query: &[(&str, &str)]) {
        self.requests
            .lock()
            .unwrap()
            .push(format!("{} {}", method, path));
        self.queries
            .lock()
            .unwrap()
            .push((path.to_string(), owned_query(query)));
    }

    fn not_found(path: &str) -> VersionsError {
        VersionsError::NotFound {
            resource: path.to_string(),
            detail: "This Worker does not exist on your account. [code: 10007]".to_string(),
        }
    }
}

#[async_trait]
impl ApiClient for FakeApiClient {
    async fn fetch_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.record("GET", path, query);
        self.json
            .get(path)
            .cloned()
            .ok_or_else(|| FakeApiClient::not_found(path))
    }

    async fn fetch_raw(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse> {
        self.record("GET", path, query);
        self.raw
            .get(path)
            .cloned()
            .ok_or_else(|| FakeApiClient::not_found(path))
    }

    async fn post_form(
        &self,
        path: &str,
        query: &[(&str, &str)],
        headers: HeaderMap,
        form: UploadForm,
    ) -> Result<Value> {
        self.record("POST", path, query);
        self.posted.lock().unwrap().push(PostedForm {
            path: path.to_string(),
            query: owned_query(query),
            headers,
            form,
        });
        self.publish_result
            .clone()
            .ok_or_else(|| VersionsError::PublishRejected {
                status: 400,
                body: r#"{"success":false,"errors":[{"code":10021,"message":"Uncaught SyntaxError"}]}"#
                    .to_string(),
            })
    }
}
