use crate::error::{Result, VersionsError};
use crate::http::ApiClient;
use crate::versions::api::{self, PublishedVersion};

use super::{rotate_secrets, RotateOptions, Secret};

/// Creates or updates one secret by copying the most recently uploaded
/// version of the script.
pub async fn put_secret<C: ApiClient + ?Sized>(
    client: &C,
    account_id: &str,
    script_name: &str,
    secret: Secret,
    mut options: RotateOptions,
) -> Result<PublishedVersion> {
    let versions = api::list_versions(client, account_id, script_name).await?;
    let latest = versions.first().ok_or_else(|| {
        VersionsError::Usage(
            "There are currently no uploaded versions of this Worker. Please upload a version before uploading a secret."
                .to_string(),
        )
    })?;
    log::info!("copying version {} ({}) of {}", latest.id, latest.number, script_name);

    if options.message.is_none() {
        options.message = Some(format!("Updated secret \"{}\"", secret.name));
    }

    rotate_secrets(client, account_id, script_name, &latest.id, &[secret], &options).await
}
