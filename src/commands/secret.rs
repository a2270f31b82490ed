use std::path::Path;

use anyhow::{Context, Result};

use crate::http::{CfApiClient, Feature};
use crate::settings::global_user::GlobalUser;
use crate::terminal::{interactive, message};
use crate::versions::api::PublishedVersion;
use crate::versions::secrets::{self, RotateOptions, Secret};
use crate::versions::VersionCache;

/// The Worker a secret command acts on.
#[derive(Clone, Debug)]
pub struct Target {
    pub account_id: String,
    pub name: String,
}

fn client(user: &GlobalUser) -> Result<CfApiClient> {
    Ok(CfApiClient::new(user, Some(Feature::Versions))?)
}

fn version_id(published: &PublishedVersion) -> &str {
    published.id.as_deref().unwrap_or("(unknown)")
}

fn deploy_hint(what: &str) {
    message::info(&format!(
        "To deploy this version {} to production traffic use the command \"wrangler versions deploy\".",
        what
    ));
}

pub async fn put_secret(
    key: &str,
    user: &GlobalUser,
    target: &Target,
    options: RotateOptions,
) -> Result<()> {
    let value = interactive::get_secret_value(&format!(
        "Enter a secret value for {} on the Worker {}:",
        key, target.name
    ));
    if value.is_empty() {
        anyhow::bail!("Your secret cannot be empty.")
    }

    message::working(&format!(
        "Creating the secret for the Worker \"{}\"",
        target.name
    ));

    let client = client(user)?;
    let secret = Secret::new(key, value);
    let published =
        secrets::put_secret(&client, &target.account_id, &target.name, secret, options).await?;

    message::success(&format!(
        "Success! Created version {} with secret {}.",
        version_id(&published),
        key
    ));
    deploy_hint(&format!("with secret {}", key));
    Ok(())
}

pub async fn bulk_put_secrets(
    json_file: &Path,
    user: &GlobalUser,
    target: &Target,
    options: RotateOptions,
) -> Result<()> {
    let contents = std::fs::read_to_string(json_file)
        .with_context(|| format!("Could not read secrets from {}", json_file.display()))?;
    let secrets = secrets::parse_secrets_json(&contents)?;

    message::working(&format!(
        "Uploading {} secret(s) to the Worker \"{}\"",
        secrets.len(),
        target.name
    ));
    for secret in &secrets {
        message::secret(&format!("Will upload secret {}", secret.name));
    }

    let client = client(user)?;
    let published =
        secrets::bulk_put(&client, &target.account_id, &target.name, secrets, options).await?;

    message::success(&format!(
        "Success! Created version {} with the uploaded secrets.",
        version_id(&published)
    ));
    deploy_hint("with these secrets");
    Ok(())
}

pub async fn list_secrets(user: &GlobalUser, target: &Target) -> Result<()> {
    let client = client(user)?;
    let mut cache = VersionCache::new();
    let versions =
        secrets::list_secrets(&client, &target.account_id, &target.name, &mut cache).await?;

    if versions.is_empty() {
        message::info(&format!(
            "The Worker \"{}\" has no deployment yet.",
            target.name
        ));
        return Ok(());
    }

    for version in versions {
        println!(
            "-- Version {} ({}%) secrets --",
            version.version_id, version.percentage
        );
        if version.secret_names.is_empty() {
            println!("No secrets found for this version");
        }
        for name in version.secret_names {
            println!("Secret Name: {}", name);
        }
        println!();
    }
    Ok(())
}
