use crate::error::{Result, VersionsError};
use crate::upload::worker::WorkerInit;

use super::metadata::Metadata;
use super::{Binding, FormPart, ModuleType, UploadForm};

// Service workers cannot import anything, so every extra module has to be
// exposed to the script as a binding onto its own form part.
pub(super) fn build_form(worker: &WorkerInit) -> Result<UploadForm> {
    let mut bindings = worker.bindings.clone();
    let mut parts = vec![FormPart::from_module(&worker.main)];

    for module in &worker.modules {
        let part_name = binding_identifier(&module.name);
        let binding = match module.module_type {
            ModuleType::CompiledWasm => Binding::new_wasm_module(&part_name, &part_name),
            ModuleType::Text => Binding::new_text_blob(&part_name, &part_name),
            ModuleType::Data => Binding::new_data_blob(&part_name, &part_name),
            other => {
                return Err(VersionsError::UnsupportedArtifact(format!(
                    "Module {} ({}) cannot be uploaded alongside a service-worker script; more than one JavaScript module can only be uploaded in the modules format",
                    module.name,
                    other.name()
                )))
            }
        };

        // the version being copied usually lists these bindings already
        let existing_kind = bindings
            .iter()
            .find(|existing| existing.name == binding.name)
            .map(|existing| existing.kind.clone());
        match existing_kind {
            None => bindings.push(binding),
            Some(kind) if kind == binding.kind => {}
            Some(kind) => {
                return Err(VersionsError::UnsupportedArtifact(format!(
                    "Module {} needs a {} binding named {}, but {} is already bound as {}",
                    module.name, binding.kind, binding.name, binding.name, kind
                )))
            }
        }

        let mut part = FormPart::from_module(module);
        part.name = part_name;
        parts.push(part);
    }

    let mut metadata = Metadata::new(worker, bindings);
    metadata.body_part = Some(worker.main.name.clone());

    let mut form = UploadForm::default();
    form.push(metadata.into_part()?);
    for part in parts {
        form.push(part);
    }

    Ok(form)
}

// Part names double as JS identifiers inside a service worker.
fn binding_identifier(module_name: &str) -> String {
    module_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
