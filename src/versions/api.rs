use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Result, VersionsError};
use crate::http::{fetch_result, ApiClient, RawResponse};
use crate::settings::metrics;
use crate::upload::UploadForm;

use super::{Deployment, ScriptSettings, VersionCache, VersionDetails, WorkerVersion};

/// The identifiers handed back after a new version is uploaded.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PublishedVersion {
    #[serde(default)]
    pub available_on_subdomain: bool,
    pub id: Option<String>,
    pub etag: Option<String>,
    pub deployment_id: Option<String>,
}

#[derive(Deserialize)]
struct VersionList {
    items: Vec<WorkerVersion>,
}

#[derive(Deserialize)]
struct DeploymentList {
    deployments: Vec<Deployment>,
}

fn script_path(account_id: &str, script_name: &str) -> String {
    format!("/accounts/{}/workers/scripts/{}", account_id, script_name)
}

pub async fn fetch_version<C: ApiClient + ?Sized>(
    client: &C,
    account_id: &str,
    script_name: &str,
    version_id: &str,
) -> Result<VersionDetails> {
    let path = format!("{}/versions/{}", script_path(account_id, script_name), version_id);
    fetch_result(client, &path, &[]).await
}

pub async fn fetch_script_settings<C: ApiClient + ?Sized>(
    client: &C,
    account_id: &str,
    script_name: &str,
) -> Result<ScriptSettings> {
    let path = format!("{}/script-settings", script_path(account_id, script_name));
    fetch_result(client, &path, &[]).await
}

/// Downloads the code of a version exactly as the API serves it.
pub async fn fetch_content<C: ApiClient + ?Sized>(
    client: &C,
    account_id: &str,
    script_name: &str,
    version_id: &str,
) -> Result<RawResponse> {
    let path = format!("{}/content/v2", script_path(account_id, script_name));
    client.fetch_raw(&path, &[("version", version_id)]).await
}

/// Versions of a script, most recently uploaded first.
pub async fn list_versions<C: ApiClient + ?Sized>(
    client: &C,
    account_id: &str,
    script_name: &str,
) -> Result<Vec<WorkerVersion>> {
    let path = format!("{}/versions", script_path(account_id, script_name));
    let list: VersionList = fetch_result(client, &path, &[]).await?;
    Ok(list.items)
}

/// Fetches every version in `version_ids`, going to the API only for the
/// ones not already in `cache`. Results keep the order of `version_ids`.
pub async fn fetch_versions<C: ApiClient + ?Sized>(
    client: &C,
    account_id: &str,
    script_name: &str,
    cache: &mut VersionCache,
    version_ids: &[String],
) -> Result<Vec<VersionDetails>> {
    let mut versions = Vec::with_capacity(version_ids.len());
    for version_id in version_ids {
        let details = match cache.get(version_id) {
            Some(details) => details.clone(),
            None => {
                let details = fetch_version(client, account_id, script_name, version_id).await?;
                cache.insert_if_absent(details).clone()
            }
        };
        versions.push(details);
    }
    Ok(versions)
}

/// The versions of the latest deployment and the share of traffic each one
/// receives. A script that was never deployed yields nothing.
pub async fn fetch_latest_deployment_versions<C: ApiClient + ?Sized>(
    client: &C,
    account_id: &str,
    script_name: &str,
    cache: &mut VersionCache,
) -> Result<(Vec<VersionDetails>, HashMap<String, f64>)> {
    let path = format!("{}/deployments", script_path(account_id, script_name));
    let list: DeploymentList = fetch_result(client, &path, &[]).await?;

    let latest = match list.deployments.into_iter().next() {
        Some(deployment) => deployment,
        None => return Ok((Vec::new(), HashMap::new())),
    };
    log::info!("latest deployment of {} is {}", script_name, latest.id);

    let version_ids: Vec<String> = latest
        .versions
        .iter()
        .map(|version| version.version_id.clone())
        .collect();
    let traffic = latest
        .versions
        .into_iter()
        .map(|version| (version.version_id, version.percentage))
        .collect();

    let versions = fetch_versions(client, account_id, script_name, cache, &version_ids).await?;
    Ok((versions, traffic))
}

/// Uploads `form` as a brand new version of the script.
///
/// The response leaves out the script body but reports whether the script
/// is reachable on its workers.dev subdomain.
pub async fn publish_version<C: ApiClient + ?Sized>(
    client: &C,
    account_id: &str,
    script_name: &str,
    form: UploadForm,
    send_metrics: Option<bool>,
) -> Result<PublishedVersion> {
    let path = format!("{}/versions", script_path(account_id, script_name));
    let query = [
        ("include_subdomain_availability", "true"),
        ("excludeScript", "true"),
    ];

    let result = client
        .post_form(&path, &query, metrics::usage_headers(send_metrics), form)
        .await?;
    serde_json::from_value(result)
        .map_err(|e| VersionsError::malformed(format!("unexpected result from {}: {}", path, e)))
}
