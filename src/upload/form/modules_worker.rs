use crate::error::Result;
use crate::upload::worker::WorkerInit;

use super::metadata::Metadata;
use super::{FormPart, UploadForm};

pub(super) fn build_form(worker: &WorkerInit) -> Result<UploadForm> {
    let mut metadata = Metadata::new(worker, worker.bindings.clone());
    metadata.main_module = Some(worker.main.name.clone());

    let mut form = UploadForm::default();
    form.push(metadata.into_part()?);

    for module in std::iter::once(&worker.main).chain(&worker.modules) {
        log::info!("Adding module {} ({})", module.name, module.module_type.name());
        form.push(FormPart::from_module(module));
    }

    Ok(form)
}
