use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::error::{Result, VersionsError};
use crate::upload::worker::{Annotations, Limits, Placement, TailConsumer, UsageModel, WorkerInit};

use super::{Binding, BindingKind, FormPart, METADATA_PART};

#[skip_serializing_none]
#[derive(Serialize, Debug)]
pub(super) struct Metadata {
    pub main_module: Option<String>,
    pub body_part: Option<String>,
    pub bindings: Vec<Binding>,
    pub compatibility_date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compatibility_flags: Vec<String>,
    pub usage_model: Option<UsageModel>,
    pub keep_bindings: Option<Vec<BindingKind>>,
    pub logpush: Option<bool>,
    pub placement: Option<Placement>,
    pub tail_consumers: Option<Vec<TailConsumer>>,
    pub limits: Option<Limits>,
    pub annotations: Option<Annotations>,
}

impl Metadata {
    pub(super) fn new(worker: &WorkerInit, bindings: Vec<Binding>) -> Self {
        Metadata {
            main_module: None,
            body_part: None,
            bindings,
            compatibility_date: worker.compatibility_date.clone(),
            compatibility_flags: worker.compatibility_flags.clone(),
            usage_model: worker.usage_model.clone(),
            keep_bindings: keep_bindings(worker),
            logpush: worker.logpush,
            placement: worker.placement.clone(),
            tail_consumers: worker.tail_consumers.clone(),
            limits: worker.limits.clone(),
            annotations: worker.annotations.clone().filter(|a| !a.is_empty()),
        }
    }

    // The upload API streams the request form and expects the "metadata"
    // part to come first.
    pub(super) fn into_part(self) -> Result<FormPart> {
        let metadata_json = serde_json::to_vec(&self)
            .map_err(|e| VersionsError::Usage(format!("could not encode metadata: {}", e)))?;

        Ok(FormPart {
            name: METADATA_PART.to_string(),
            file_name: "metadata.json".to_string(),
            content_type: "application/json".to_string(),
            data: metadata_json,
        })
    }
}

fn keep_bindings(worker: &WorkerInit) -> Option<Vec<BindingKind>> {
    let mut kinds = Vec::new();
    if worker.keep_vars {
        kinds.push(BindingKind::PlainText);
        kinds.push(BindingKind::Json);
    }
    if worker.keep_secrets {
        kinds.push(BindingKind::SecretText);
        kinds.push(BindingKind::SecretKey);
    }

    if kinds.is_empty() {
        None
    } else {
        Some(kinds)
    }
}
