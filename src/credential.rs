//! Credential extraction from an HTTP request (spec.md §4.1).

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;
use crate::request::HttpRequestInfo;

/// Where the credential is expected to live in the request.
///
/// Deserialization accepts any string: the four recognized locations map to
/// their named variant, anything else is kept verbatim in `Unsupported` so
/// `extract` can fail with `CredentialLocationUnsupported` (spec.md §4.1)
/// rather than rejecting the config at load time. `Serialize`/`JsonSchema`
/// are hand-written rather than derived: `Unsupported` carries data a
/// derived `Serialize` can't skip-and-round-trip, and a derived `JsonSchema`
/// would describe a closed 4-variant enum, contradicting the open string
/// this type actually accepts at `extract()` time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialLocation {
    AuthorizationHeader,
    CustomHeader,
    Cookie,
    Query,
    Unsupported(String),
}

impl CredentialLocation {
    fn as_wire_str(&self) -> &str {
        match self {
            CredentialLocation::AuthorizationHeader => "authorization_header",
            CredentialLocation::CustomHeader => "custom_header",
            CredentialLocation::Cookie => "cookie",
            CredentialLocation::Query => "query",
            CredentialLocation::Unsupported(raw) => raw.as_str(),
        }
    }
}

impl Default for CredentialLocation {
    fn default() -> Self {
        CredentialLocation::AuthorizationHeader
    }
}

impl<'de> Deserialize<'de> for CredentialLocation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "authorization_header" => CredentialLocation::AuthorizationHeader,
            "custom_header" => CredentialLocation::CustomHeader,
            "cookie" => CredentialLocation::Cookie,
            "query" => CredentialLocation::Query,
            _ => CredentialLocation::Unsupported(raw),
        })
    }
}

impl Serialize for CredentialLocation {
    /// Symmetric with `Deserialize`: every variant, including `Unsupported`,
    /// round-trips back to the wire string it was built from.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_wire_str())
    }
}

impl JsonSchema for CredentialLocation {
    fn schema_name() -> String {
        "CredentialLocation".to_string()
    }

    /// An open string schema, not a closed enum: `extract()`, not config
    /// loading, is where an unrecognized `in` is rejected (spec.md §4.1).
    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

fn default_key_selector() -> String {
    "Bearer".to_string()
}

/// Configuration for [`CredentialLocator`]; deserializable so an external
/// config layer can build one without the core dictating the file format.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CredentialLocatorConfig {
    #[serde(default = "default_key_selector", rename = "keySelector")]
    pub key_selector: String,
    #[serde(default, rename = "in")]
    pub location: CredentialLocation,
}

impl Default for CredentialLocatorConfig {
    fn default() -> Self {
        Self {
            key_selector: default_key_selector(),
            location: CredentialLocation::default(),
        }
    }
}

/// Extracts a bearer-style secret from one of four locations in an HTTP
/// request.
#[derive(Debug, Clone)]
pub struct CredentialLocator {
    config: CredentialLocatorConfig,
}

impl CredentialLocator {
    pub fn new(config: CredentialLocatorConfig) -> Self {
        Self { config }
    }

    pub fn extract(&self, request: &HttpRequestInfo) -> Result<String, CoreError> {
        match &self.config.location {
            CredentialLocation::AuthorizationHeader => self.extract_from_authorization_header(request),
            CredentialLocation::CustomHeader => self.extract_from_custom_header(request),
            CredentialLocation::Cookie => self.extract_from_cookie(request),
            CredentialLocation::Query => self.extract_from_query(request),
            CredentialLocation::Unsupported(location) => {
                Err(CoreError::CredentialLocationUnsupported(location.clone()))
            }
        }
    }

    fn extract_from_authorization_header(&self, request: &HttpRequestInfo) -> Result<String, CoreError> {
        let header = request
            .header("authorization")
            .ok_or(CoreError::CredentialNotFound)?;
        let prefix = format!("{} ", self.config.key_selector);
        header
            .strip_prefix(prefix.as_str())
            .map(str::to_string)
            .ok_or(CoreError::CredentialNotFound)
    }

    fn extract_from_custom_header(&self, request: &HttpRequestInfo) -> Result<String, CoreError> {
        let name = self.config.key_selector.to_lowercase();
        request
            .header(&name)
            .map(str::to_string)
            .ok_or(CoreError::CredentialNotFound)
    }

    fn extract_from_cookie(&self, request: &HttpRequestInfo) -> Result<String, CoreError> {
        let cookie_header = request.header("cookie").ok_or(CoreError::CredentialNotFound)?;
        cookie_header
            .split(';')
            .map(str::trim)
            .find_map(|part| {
                let (key, value) = part.split_once('=')?;
                (key == self.config.key_selector).then(|| value.to_string())
            })
            .ok_or(CoreError::CredentialNotFound)
    }

    fn extract_from_query(&self, request: &HttpRequestInfo) -> Result<String, CoreError> {
        let needle = format!("{}=", self.config.key_selector);
        let path = &request.path;
        let start_of_param = path
            .find('?')
            .map(|q| q + 1)
            .unwrap_or(path.len());

        path[start_of_param..]
            .split('&')
            .find_map(|param| param.strip_prefix(needle.as_str()))
            .map(str::to_string)
            .ok_or(CoreError::CredentialNotFound)
    }
}
