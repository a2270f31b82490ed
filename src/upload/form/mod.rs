mod binding;
mod metadata;
mod module;
mod modules_worker;
mod service_worker;

use reqwest::multipart::{Form, Part};

use crate::error::{Result, VersionsError};
use crate::upload::worker::WorkerInit;

pub use binding::{Binding, BindingKind};
pub use module::{Module, ModuleType};

pub const METADATA_PART: &str = "metadata";

/// One part of a Workers upload form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl FormPart {
    fn from_module(module: &Module) -> Self {
        FormPart {
            name: module.name.clone(),
            file_name: module.name.clone(),
            content_type: module.module_type.content_type().to_string(),
            data: module.content.clone(),
        }
    }
}

/// A fully encoded upload, kept as plain data until it is sent so it can
/// be inspected before hitting the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadForm {
    parts: Vec<FormPart>,
}

impl UploadForm {
    fn push(&mut self, part: FormPart) {
        self.parts.push(part);
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn part(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// The decoded JSON of the metadata part.
    pub fn metadata(&self) -> Result<serde_json::Value> {
        let part = self
            .part(METADATA_PART)
            .ok_or_else(|| VersionsError::Usage("upload form has no metadata part".to_string()))?;
        serde_json::from_slice(&part.data)
            .map_err(|e| VersionsError::Usage(format!("upload metadata is not JSON: {}", e)))
    }

    pub fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new();
        for part in self.parts {
            let body = Part::bytes(part.data)
                .file_name(part.file_name)
                .mime_str(&part.content_type)?;
            form = form.part(part.name, body);
        }
        Ok(form)
    }
}

/// Encodes a Worker definition into the upload format of the scripts API.
///
/// A CommonJS main module is uploaded in the service-worker format, anything
/// else in the modules format.
pub fn build(worker: &WorkerInit) -> Result<UploadForm> {
    let form = match worker.main.module_type {
        ModuleType::CommonJS => {
            log::info!("Service-worker script detected, uploading {}", worker.main.name);
            service_worker::build_form(worker)?
        }
        _ => {
            log::info!("Modules script detected, main module {}", worker.main.name);
            modules_worker::build_form(worker)?
        }
    };

    log::debug!("built upload form with {} parts", form.parts().len());
    Ok(form)
}
