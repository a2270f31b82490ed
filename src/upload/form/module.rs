use serde::{Deserialize, Serialize};

use crate::error::{Result, VersionsError};

// Generates the module types and the MIME types they travel under.
// The format is VariantName("canonical/mime-type", "accepted/alias", ...)
macro_rules! module_type {
    (pub enum $name:ident {
        $($variant:ident($content_type:literal $(, $alias:literal)*)),+,
    }) => {
        #[derive(Clone, Copy, Debug, Deserialize, Hash, Serialize, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            /// The MIME type used when uploading a module of this type.
            pub fn content_type(&self) -> &'static str {
                match self {
                    $($name::$variant => $content_type),+
                }
            }

            fn from_essence(essence: &str) -> Option<$name> {
                match essence {
                    $($content_type $(| $alias)* => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

module_type! {
    pub enum ModuleType {
        ESModule("application/javascript+module"),
        CommonJS("application/javascript", "text/javascript"),
        CompiledWasm("application/wasm"),
        Text("text/plain"),
        Data("application/octet-stream"),
        Python("text/x-python"),
        PythonRequirement("text/x-python-requirement"),
    }
}

impl ModuleType {
    /// Maps a MIME type, parameters and all, onto a module type.
    pub fn from_mime_type(mime_type: &str) -> Result<ModuleType> {
        let essence = mime_type
            .parse::<mime::Mime>()
            .map(|mime| mime.essence_str().to_ascii_lowercase())
            .map_err(|_| {
                VersionsError::malformed(format!("invalid MIME type `{}`", mime_type))
            })?;

        ModuleType::from_essence(&essence).ok_or_else(|| {
            VersionsError::malformed(format!("unsupported module MIME type `{}`", mime_type))
        })
    }
}

/// A named unit of Worker code, held in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub content: Vec<u8>,
    pub module_type: ModuleType,
}

impl Module {
    pub fn in_memory(name: impl Into<String>, content: Vec<u8>, module_type: ModuleType) -> Self {
        Module {
            name: name.into(),
            content,
            module_type,
        }
    }
}
