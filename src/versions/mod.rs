//! Worker Versions: immutable, numbered snapshots of a script's code,
//! bindings and runtime settings.

pub mod api;
mod cache;
pub mod content;
pub mod secrets;

use serde::{Deserialize, Serialize};

use crate::upload::form::{Binding, BindingKind};
use crate::upload::worker::{Annotations, Limits, TailConsumer, UsageModel};

pub use cache::VersionCache;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct WorkerVersion {
    pub id: String,
    pub number: u64,
    pub metadata: WorkerMetadata,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct WorkerMetadata {
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub created_on: String,
    #[serde(default)]
    pub modified_on: String,
    #[serde(default)]
    pub source: String,
}

/// A version together with everything needed to rebuild it.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct VersionDetails {
    pub id: String,
    pub number: u64,
    pub metadata: WorkerMetadata,
    pub annotations: Option<Annotations>,
    pub resources: Resources,
}

impl VersionDetails {
    /// Names of the `secret_text` bindings of this version, in binding order.
    pub fn secret_names(&self) -> Vec<&str> {
        self.resources
            .bindings
            .iter()
            .filter(|binding| binding.kind == BindingKind::SecretText)
            .map(|binding| binding.name.as_str())
            .collect()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Resources {
    #[serde(default)]
    pub bindings: Vec<Binding>,
    pub script: ScriptInfo,
    pub script_runtime: ScriptRuntime,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ScriptInfo {
    #[serde(default)]
    pub etag: String,
    #[serde(default)]
    pub handlers: Vec<String>,
    pub placement_mode: Option<String>,
    pub last_deployed_from: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ScriptRuntime {
    pub compatibility_date: Option<String>,
    #[serde(default)]
    pub compatibility_flags: Vec<String>,
    pub usage_model: Option<UsageModel>,
    pub limits: Option<Limits>,
}

/// Script-wide settings shared by every version of a script.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ScriptSettings {
    pub logpush: Option<bool>,
    pub tail_consumers: Option<Vec<TailConsumer>>,
}

/// A deployment splits traffic between one or more versions.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Deployment {
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub created_on: String,
    pub versions: Vec<DeploymentVersion>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DeploymentVersion {
    pub version_id: String,
    pub percentage: f64,
}
