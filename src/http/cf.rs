use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, VersionsError};
use crate::http::{feature::headers, ApiClient, Feature, RawResponse};
use crate::settings::api_base_url;
use crate::settings::global_user::GlobalUser;
use crate::terminal::{emoji, message};
use crate::upload::UploadForm;

// "workers.api.error.script_not_found" and friends
const NOT_FOUND_CODE: u32 = 10007;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiError>,
    #[serde(default)]
    result: Value,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: u32,
    pub message: String,
}

/// Talks to the Cloudflare v4 API with the user's credentials.
pub struct CfApiClient {
    client: Client,
    base_url: String,
}

impl CfApiClient {
    pub fn new(user: &GlobalUser, feature: Option<Feature>) -> Result<Self> {
        let mut headers = headers(feature);
        add_auth_headers(&mut headers, user)?;

        let client = builder()
            .default_headers(headers)
            .redirect(Policy::none())
            .build()?;

        Ok(CfApiClient {
            client,
            base_url: api_base_url(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response> {
        log::debug!("requesting {}", path);
        request.send().await.map_err(|e| VersionsError::Transport {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ApiClient for CfApiClient {
    async fn fetch_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let request = self.client.get(&self.url(path)).query(query);
        let response = self.send(path, request).await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiResponse = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => return Err(failure(path, status, &[], &body)),
            Err(e) => {
                return Err(VersionsError::malformed(format!(
                    "{} did not return JSON: {}",
                    path, e
                )))
            }
        };

        if !status.is_success() || !envelope.success {
            return Err(failure(path, status, &envelope.errors, &body));
        }
        Ok(envelope.result)
    }

    async fn fetch_raw(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse> {
        let request = self.client.get(&self.url(path)).query(query);
        let response = self.send(path, request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            let errors = serde_json::from_str::<ApiResponse>(&body)
                .map(|envelope| envelope.errors)
                .unwrap_or_default();
            return Err(failure(path, status, &errors, &body));
        }

        let headers = response.headers().clone();
        let body: Bytes = response.bytes().await?;
        Ok(RawResponse { headers, body })
    }

    async fn post_form(
        &self,
        path: &str,
        query: &[(&str, &str)],
        headers: HeaderMap,
        form: UploadForm,
    ) -> Result<Value> {
        let request = self
            .client
            .post(&self.url(path))
            .query(query)
            .headers(headers)
            .multipart(form.into_multipart()?);
        let response = self.send(path, request).await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope = serde_json::from_str::<ApiResponse>(&body).ok();
        match envelope {
            Some(envelope) if status.is_success() && envelope.success => Ok(envelope.result),
            _ => {
                print_status_code_context(status);
                Err(VersionsError::PublishRejected {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

fn builder() -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
}

fn add_auth_headers(headers: &mut HeaderMap, user: &GlobalUser) -> Result<()> {
    let invalid = |_| VersionsError::Usage("your credentials contain invalid characters".into());
    match user {
        GlobalUser::TokenAuth { api_token } => {
            let mut token =
                HeaderValue::from_str(&format!("Bearer {}", api_token)).map_err(invalid)?;
            token.set_sensitive(true);
            headers.insert("Authorization", token);
        }
        GlobalUser::GlobalKeyAuth { email, api_key } => {
            let mut key = HeaderValue::from_str(api_key).map_err(invalid)?;
            key.set_sensitive(true);
            headers.insert("X-Auth-Email", HeaderValue::from_str(email).map_err(invalid)?);
            headers.insert("X-Auth-Key", key);
        }
    }
    Ok(())
}

fn failure(path: &str, status: StatusCode, errors: &[ApiError], body: &str) -> VersionsError {
    let not_found = status == StatusCode::NOT_FOUND
        || errors.iter().any(|error| error.code == NOT_FOUND_CODE);
    let detail = if errors.is_empty() {
        format!("Status: {}, Details {}", status, body)
    } else {
        format_errors(errors)
    };

    if not_found {
        VersionsError::NotFound {
            resource: path.to_string(),
            detail,
        }
    } else {
        VersionsError::Transport {
            path: path.to_string(),
            reason: detail,
        }
    }
}

/// Formats API errors for printing, one `Code N: message` line each.
pub fn format_errors(errors: &[ApiError]) -> String {
    let mut complete_err = String::new();
    for error in errors {
        complete_err.push_str(&format!(
            "{} Code {}: {}\n",
            emoji::WARN,
            error.code,
            error.message
        ));
    }
    complete_err.trim_end().to_string()
}

// For handling cases where the API gateway returns errors via HTTP status codes
// (no API-specific, more granular error code is given).
fn print_status_code_context(status_code: StatusCode) {
    match status_code {
        StatusCode::PAYLOAD_TOO_LARGE => message::warn("Returned status code 413, Payload Too Large. Please make sure your upload is less than 100MB in size"),
        StatusCode::GATEWAY_TIMEOUT => message::warn("Returned status code 504, Gateway Timeout. Please try again in a few seconds"),
        _ => (),
    }
}
