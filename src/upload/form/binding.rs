use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DeserializeFromStr, SerializeDisplay};

// Generates the known binding types along with their API spelling.
// Anything the API sends that is not listed here is kept as `Other` so it
// survives being copied into a new version untouched.
macro_rules! binding_kind {
    (pub enum $name:ident {
        $($variant:ident => $api_name:literal),+,
    }) => {
        #[derive(Clone, Debug, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
        pub enum $name {
            $($variant),+,
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $api_name),+,
                    $name::Other(other) => other.as_str(),
                }
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $($api_name => $name::$variant),+,
                    other => $name::Other(other.to_string()),
                })
            }
        }
    };
}

binding_kind! {
    pub enum BindingKind {
        PlainText => "plain_text",
        Json => "json",
        SecretText => "secret_text",
        SecretKey => "secret_key",
        WasmModule => "wasm_module",
        TextBlob => "text_blob",
        DataBlob => "data_blob",
        KvNamespace => "kv_namespace",
        DurableObjectNamespace => "durable_object_namespace",
        R2Bucket => "r2_bucket",
        D1 => "d1",
        Queue => "queue",
        Service => "service",
        AnalyticsEngine => "analytics_engine",
        DispatchNamespace => "dispatch_namespace",
        MtlsCertificate => "mtls_certificate",
        Hyperdrive => "hyperdrive",
        Vectorize => "vectorize",
        Browser => "browser",
        Ai => "ai",
        VersionMetadata => "version_metadata",
        SendEmail => "send_email",
        Logfwdr => "logfwdr",
        Assets => "assets",
    }
}

impl BindingKind {
    /// Secrets are never returned with their values, so they can only be
    /// carried into a new version through inheritance.
    pub fn is_secret(&self) -> bool {
        matches!(self, BindingKind::SecretText | BindingKind::SecretKey)
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A binding as described by the Workers script metadata API.
///
/// Only `type` and `name` are interpreted; the remaining fields are kept in
/// the order the API sent them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    #[serde(rename = "type")]
    pub kind: BindingKind,
    pub name: String,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Binding {
    fn with_property(kind: BindingKind, name: &str, key: &str, value: &str) -> Binding {
        let mut properties = Map::new();
        properties.insert(key.to_string(), Value::String(value.to_string()));
        Binding {
            kind,
            name: name.to_string(),
            properties,
        }
    }

    pub fn new_secret_text(name: &str, text: &str) -> Binding {
        Binding::with_property(BindingKind::SecretText, name, "text", text)
    }

    // `name` is the binding used in the worker js, `part` the form part it refers to
    pub fn new_wasm_module(name: &str, part: &str) -> Binding {
        Binding::with_property(BindingKind::WasmModule, name, "part", part)
    }

    pub fn new_text_blob(name: &str, part: &str) -> Binding {
        Binding::with_property(BindingKind::TextBlob, name, "part", part)
    }

    pub fn new_data_blob(name: &str, part: &str) -> Binding {
        Binding::with_property(BindingKind::DataBlob, name, "part", part)
    }

    pub fn is_secret(&self) -> bool {
        self.kind.is_secret()
    }
}
