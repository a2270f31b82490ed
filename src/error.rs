use thiserror::Error;

pub type Result<T> = std::result::Result<T, VersionsError>;

/// Everything that can stop a version from being copied and republished.
///
/// None of these are retried. A failed publish may already have created a
/// version server-side, so retrying is left to whoever called us.
#[derive(Debug, Error)]
pub enum VersionsError {
    /// The script or version does not exist on the account.
    #[error("{resource} could not be found: {detail}")]
    NotFound { resource: String, detail: String },

    /// The request never produced a usable API response.
    #[error("request to {path} failed: {reason}")]
    Transport { path: String, reason: String },

    /// The API answered with something that breaks the content contract.
    #[error("unexpected response from the Cloudflare API: {0}")]
    MalformedResponse(String),

    /// A Worker shape we deliberately refuse to copy.
    #[error("{0}")]
    UnsupportedArtifact(String),

    /// The API refused the new version.
    #[error("the Cloudflare API rejected the new version (status {status}): {body}")]
    PublishRejected { status: u16, body: String },

    #[error("{0}")]
    Usage(String),

    #[error("your global config has an error, run `wrangler config`: {0}")]
    Config(#[from] config::ConfigError),
}

impl VersionsError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        VersionsError::MalformedResponse(msg.into())
    }
}

impl From<reqwest::Error> for VersionsError {
    fn from(err: reqwest::Error) -> Self {
        VersionsError::Transport {
            path: err.url().map(|u| u.path().to_string()).unwrap_or_default(),
            reason: err.to_string(),
        }
    }
}
