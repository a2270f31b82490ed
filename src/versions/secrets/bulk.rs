use serde_json::{Map, Value};

use crate::error::{Result, VersionsError};
use crate::http::ApiClient;
use crate::versions::api::{self, PublishedVersion};

use super::{rotate_secrets, RotateOptions, Secret};

/// Reads secrets from a JSON object of names to string values, keeping the
/// order of the file.
pub fn parse_secrets_json(contents: &str) -> Result<Vec<Secret>> {
    let object: Map<String, Value> = serde_json::from_str(contents).map_err(|e| {
        VersionsError::Usage(format!(
            "The contents of the secrets file are not a JSON object of secret names to values: {}",
            e
        ))
    })?;

    object
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(value) => Ok(Secret { name, value }),
            _ => Err(VersionsError::Usage(format!(
                "The value of secret {} must be a string",
                name
            ))),
        })
        .collect()
}

/// Creates or updates many secrets in a single new version.
pub async fn bulk_put<C: ApiClient + ?Sized>(
    client: &C,
    account_id: &str,
    script_name: &str,
    secrets: Vec<Secret>,
    mut options: RotateOptions,
) -> Result<PublishedVersion> {
    if secrets.is_empty() {
        return Err(VersionsError::Usage("No secrets found to upload.".to_string()));
    }

    let versions = api::list_versions(client, account_id, script_name).await?;
    let latest = versions.first().ok_or_else(|| {
        VersionsError::Usage(
            "There are currently no uploaded versions of this Worker. Please upload a version before uploading secrets."
                .to_string(),
        )
    })?;

    if options.message.is_none() {
        options.message = Some(format!("Bulk updated {} secrets", secrets.len()));
    }

    rotate_secrets(client, account_id, script_name, &latest.id, &secrets, &options).await
}
