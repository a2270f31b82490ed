mod bulk;
mod list;
mod put;

use crate::error::Result;
use crate::http::ApiClient;
use crate::upload::form::{self, Binding};
use crate::upload::worker::{Annotations, Placement, WorkerInit};

use super::api::{self, PublishedVersion};
use super::content::{self, ModuleSet};
use super::{ScriptSettings, VersionDetails};

pub use bulk::{bulk_put, parse_secrets_json};
pub use list::{list_secrets, VersionSecrets};
pub use put::put_secret;

/// A secret to install on the new version. The value is sent as given.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    pub name: String,
    pub value: String,
}

impl Secret {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Secret {
            name: name.into(),
            value: value.into(),
        }
    }
}

// Keep secret values out of logs and panic messages.
impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RotateOptions {
    pub message: Option<String>,
    pub tag: Option<String>,
    pub send_metrics: Option<bool>,
}

/// Copies version `version_id` of a script into a new version whose secrets
/// are replaced by `secrets`, and uploads it.
///
/// Code, non-secret bindings and runtime settings carry over unchanged.
/// Secrets of the source version that are not in `secrets` are inherited by
/// the API. Nothing is written before the final upload.
pub async fn rotate_secrets<C: ApiClient + ?Sized>(
    client: &C,
    account_id: &str,
    script_name: &str,
    version_id: &str,
    secrets: &[Secret],
    options: &RotateOptions,
) -> Result<PublishedVersion> {
    let details = api::fetch_version(client, account_id, script_name, version_id).await?;
    let raw_content = api::fetch_content(client, account_id, script_name, version_id).await?;
    let modules = content::decode(raw_content).await?;
    let settings = api::fetch_script_settings(client, account_id, script_name).await?;

    let bindings = merge_bindings(&details.resources.bindings, secrets);
    let worker = assemble(script_name, &details, &settings, modules, bindings, options);
    let upload_form = form::build(&worker)?;

    log::info!(
        "uploading a copy of version {} of {} with {} secret(s)",
        version_id,
        script_name,
        secrets.len()
    );
    api::publish_version(client, account_id, script_name, upload_form, options.send_metrics).await
}

/// Drops every secret binding and appends one `secret_text` binding per
/// secret. Retained bindings keep their relative order and the secrets
/// follow in the order given.
pub fn merge_bindings(bindings: &[Binding], secrets: &[Secret]) -> Vec<Binding> {
    let mut merged: Vec<Binding> = bindings
        .iter()
        .filter(|binding| !binding.is_secret())
        .cloned()
        .collect();

    for secret in secrets {
        // TODO: reject names that collide with a retained binding once we know
        // whether the versions API rejects the collision itself
        if merged.iter().any(|binding| binding.name == secret.name) {
            log::debug!("secret {} shares its name with a non-secret binding", secret.name);
        }
        merged.push(Binding::new_secret_text(&secret.name, &secret.value));
    }

    merged
}

/// Builds the definition of the new version from the source version.
pub fn assemble(
    script_name: &str,
    details: &VersionDetails,
    settings: &ScriptSettings,
    modules: ModuleSet,
    bindings: Vec<Binding>,
    options: &RotateOptions,
) -> WorkerInit {
    let runtime = &details.resources.script_runtime;
    let placement = match details.resources.script.placement_mode.as_deref() {
        Some("smart") => Some(Placement::smart()),
        _ => None,
    };
    let tail_consumers = settings
        .tail_consumers
        .clone()
        .filter(|consumers| !consumers.is_empty());
    let annotations = Annotations {
        message: options.message.clone(),
        tag: options.tag.clone(),
    };

    WorkerInit {
        name: script_name.to_string(),
        main: modules.main,
        modules: modules.modules,
        bindings,
        compatibility_date: runtime.compatibility_date.clone(),
        compatibility_flags: runtime.compatibility_flags.clone(),
        usage_model: runtime.usage_model.clone(),
        // every variable is uploaded again, but secrets cannot be read back
        keep_vars: false,
        keep_secrets: true,
        logpush: settings.logpush,
        placement,
        tail_consumers,
        limits: runtime.limits.clone(),
        annotations: if annotations.is_empty() {
            None
        } else {
            Some(annotations)
        },
    }
}
