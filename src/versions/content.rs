use std::convert::Infallible;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;

use crate::error::{Result, VersionsError};
use crate::http::RawResponse;
use crate::upload::form::{Module, ModuleType};

/// Names the part of a multipart content response holding the main module.
pub const ENTRYPOINT_HEADER: &str = "cf-entrypoint";

/// Part uploaded by Workers Sites projects.
pub const STATIC_CONTENT_MANIFEST: &str = "__STATIC_CONTENT_MANIFEST";

/// Name given to the script of a service worker, which the API serves bare.
pub const DEFAULT_SCRIPT_NAME: &str = "index.js";

/// The two shapes the content endpoint answers with.
#[derive(Debug)]
pub enum WorkerContent {
    /// A modules Worker: one form part per module.
    Multipart {
        boundary: String,
        entrypoint: Option<String>,
        body: Bytes,
    },
    /// A service worker: the body is the script.
    SingleBody {
        content_type: Option<String>,
        body: Bytes,
    },
}

/// The decoded code of a version. `modules` keeps the order of the response.
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleSet {
    pub main: Module,
    pub modules: Vec<Module>,
}

impl WorkerContent {
    pub fn classify(response: RawResponse) -> Result<Self> {
        let content_type = response.header(CONTENT_TYPE.as_str()).map(str::to_owned);

        match content_type {
            Some(content_type) if is_multipart(&content_type) => {
                let boundary = multer::parse_boundary(&content_type).map_err(|e| {
                    VersionsError::malformed(format!(
                        "multipart content without a usable boundary: {}",
                        e
                    ))
                })?;
                Ok(WorkerContent::Multipart {
                    boundary,
                    entrypoint: response.header(ENTRYPOINT_HEADER).map(str::to_owned),
                    body: response.body,
                })
            }
            content_type => Ok(WorkerContent::SingleBody {
                content_type,
                body: response.body,
            }),
        }
    }

    pub async fn into_modules(self) -> Result<ModuleSet> {
        match self {
            WorkerContent::Multipart {
                boundary,
                entrypoint,
                body,
            } => {
                log::debug!("decoding multipart worker content");
                let parts = read_parts(boundary, body).await?;
                modules_from_parts(entrypoint, parts)
            }
            WorkerContent::SingleBody { content_type, body } => {
                log::debug!("decoding single body worker content");
                let content_type = content_type.ok_or_else(|| {
                    VersionsError::malformed(
                        "No content-type header was provided for non-module Worker content",
                    )
                })?;
                let main = Module::in_memory(
                    DEFAULT_SCRIPT_NAME,
                    body.to_vec(),
                    ModuleType::from_mime_type(&content_type)?,
                );
                Ok(ModuleSet {
                    main,
                    modules: Vec::new(),
                })
            }
        }
    }
}

/// Turns a content response into modules.
pub async fn decode(response: RawResponse) -> Result<ModuleSet> {
    WorkerContent::classify(response)?.into_modules().await
}

fn is_multipart(content_type: &str) -> bool {
    content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("multipart/form-data")
}

#[derive(Debug)]
struct ContentPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

impl ContentPart {
    fn into_module(self, name: String) -> Result<Module> {
        let ContentPart {
            name: part_name,
            content_type,
            data,
            ..
        } = self;
        let content_type = content_type.ok_or_else(|| {
            VersionsError::malformed(format!("part {} has no content-type", part_name))
        })?;
        Ok(Module::in_memory(
            name,
            data.to_vec(),
            ModuleType::from_mime_type(&content_type)?,
        ))
    }
}

async fn read_parts(boundary: String, body: Bytes) -> Result<Vec<ContentPart>> {
    let stream = futures::stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);
    let malformed = |e: multer::Error| VersionsError::malformed(format!("invalid form data: {}", e));

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field
            .name()
            .map(str::to_owned)
            .ok_or_else(|| VersionsError::malformed("form data part without a name"))?;
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(|mime| mime.to_string());
        let data = field.bytes().await.map_err(malformed)?;

        log::debug!("read part {} ({} bytes)", name, data.len());
        parts.push(ContentPart {
            name,
            file_name,
            content_type,
            data,
        });
    }
    Ok(parts)
}

fn modules_from_parts(entrypoint: Option<String>, parts: Vec<ContentPart>) -> Result<ModuleSet> {
    if parts.iter().any(|part| part.name == STATIC_CONTENT_MANIFEST) {
        return Err(VersionsError::UnsupportedArtifact(
            "Workers Sites is not supported for `versions secret put` today.".to_string(),
        ));
    }

    let entrypoint = entrypoint
        .ok_or_else(|| VersionsError::malformed("Got modules without cf-entrypoint header"))?;

    let mut main = None;
    let mut modules = Vec::new();
    for part in parts {
        if part.name != entrypoint {
            let name = part.name.clone();
            modules.push(part.into_module(name)?);
        } else if main.is_none() {
            let name = part.file_name.clone().unwrap_or_else(|| part.name.clone());
            main = Some(part.into_module(name)?);
        }
    }

    let main = main.ok_or_else(|| {
        VersionsError::malformed(format!(
            "Could not find entrypoint {} in form-data",
            entrypoint
        ))
    })?;
    Ok(ModuleSet { main, modules })
}
