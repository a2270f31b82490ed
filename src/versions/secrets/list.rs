use crate::error::Result;
use crate::http::ApiClient;
use crate::versions::{api, VersionCache};

/// The secrets bound to one version of the latest deployment.
#[derive(Clone, Debug, PartialEq)]
pub struct VersionSecrets {
    pub version_id: String,
    pub percentage: f64,
    pub secret_names: Vec<String>,
}

pub async fn list_secrets<C: ApiClient + ?Sized>(
    client: &C,
    account_id: &str,
    script_name: &str,
    cache: &mut VersionCache,
) -> Result<Vec<VersionSecrets>> {
    let (versions, traffic) =
        api::fetch_latest_deployment_versions(client, account_id, script_name, cache).await?;

    Ok(versions
        .iter()
        .map(|version| VersionSecrets {
            version_id: version.id.clone(),
            percentage: traffic.get(&version.id).copied().unwrap_or_default(),
            secret_names: version
                .secret_names()
                .into_iter()
                .map(str::to_owned)
                .collect(),
        })
        .collect())
}
