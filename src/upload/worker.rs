use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{skip_serializing_none, DeserializeFromStr, SerializeDisplay};

use crate::upload::form::{Binding, Module};

/// The usage model of a version. Models this crate does not know about are
/// carried over as they were spelled.
#[derive(Clone, Debug, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub enum UsageModel {
    Bundled,
    Unbound,
    Standard,
    Other(String),
}

impl UsageModel {
    pub fn as_str(&self) -> &str {
        match self {
            UsageModel::Bundled => "bundled",
            UsageModel::Unbound => "unbound",
            UsageModel::Standard => "standard",
            UsageModel::Other(other) => other.as_str(),
        }
    }
}

impl FromStr for UsageModel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "bundled" => UsageModel::Bundled,
            "unbound" => UsageModel::Unbound,
            "standard" => UsageModel::Standard,
            other => UsageModel::Other(other.to_string()),
        })
    }
}

impl fmt::Display for UsageModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime limits of a version. Only `cpu_ms` is interpreted, every other
/// limit is kept as the API sent it.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Limits {
    pub cpu_ms: Option<u64>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Placement {
    pub mode: String,
}

impl Placement {
    pub fn smart() -> Self {
        Placement {
            mode: "smart".to_string(),
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TailConsumer {
    pub service: String,
    pub environment: Option<String>,
    pub namespace: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Annotations {
    #[serde(rename = "workers/message")]
    pub message: Option<String>,
    #[serde(rename = "workers/tag")]
    pub tag: Option<String>,
}

impl Annotations {
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.tag.is_none()
    }
}

/// Everything needed to upload a new version of a Worker.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkerInit {
    pub name: String,
    pub main: Module,
    pub modules: Vec<Module>,
    pub bindings: Vec<Binding>,
    pub compatibility_date: Option<String>,
    pub compatibility_flags: Vec<String>,
    pub usage_model: Option<UsageModel>,
    /// Inherit `plain_text` and `json` bindings from the previous version.
    pub keep_vars: bool,
    /// Inherit `secret_text` and `secret_key` bindings from the previous version.
    pub keep_secrets: bool,
    pub logpush: Option<bool>,
    pub placement: Option<Placement>,
    pub tail_consumers: Option<Vec<TailConsumer>>,
    pub limits: Option<Limits>,
    pub annotations: Option<Annotations>,
}
