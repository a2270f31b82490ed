#[macro_use]
extern crate text_io;

pub mod commands;
pub mod error;
pub mod http;
pub mod settings;
pub mod terminal;
pub mod upload;
pub mod versions;

pub use error::{Result, VersionsError};
