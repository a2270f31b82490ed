pub mod form;
pub mod worker;

pub use form::UploadForm;
pub use worker::WorkerInit;
