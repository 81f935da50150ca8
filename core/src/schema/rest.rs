#![deny(missing_docs)]

//! # REST Schema Envelope
//!
//! The aggregate root returned by a conversion: settings, callable operations,
//! and the object/scalar registries.

use crate::error::{ConvertError, ConvertResult};
use crate::schema::types::{ObjectType, ScalarType, TypeDescriptor, TypeEncoding};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Content type used for JSON request bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type used for form-data request bodies.
pub const CONTENT_TYPE_MULTIPART: &str = "multipart/form-data";

/// Content type used for url-encoded form bodies.
pub const CONTENT_TYPE_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// A security requirement: scheme name to required scopes.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// The converted schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestSchema {
    /// Connection settings.
    pub settings: Settings,
    /// Read-only operations (GET).
    pub functions: Vec<OperationInfo>,
    /// Mutating operations (POST, PUT, PATCH, DELETE).
    pub procedures: Vec<OperationInfo>,
    /// Object types keyed by PascalCase name.
    pub object_types: BTreeMap<String, ObjectType>,
    /// Scalar types keyed by name.
    pub scalar_types: BTreeMap<String, ScalarType>,
}

impl RestSchema {
    /// Finds a function by name.
    pub fn function(&self, name: &str) -> Option<&OperationInfo> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Finds a procedure by name.
    pub fn procedure(&self, name: &str) -> Option<&OperationInfo> {
        self.procedures.iter().find(|p| p.name == name)
    }
}

/// Connection settings of the converted API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Server base URLs, as environment templates.
    #[serde(default)]
    pub servers: Vec<ServerConfig>,
    /// API version from the document info.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Security schemes keyed by definition name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_schemes: BTreeMap<String, SecurityScheme>,
    /// Document-wide security requirements.
    #[serde(default)]
    pub security: Vec<SecurityRequirement>,
}

/// A server entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL template.
    pub url: String,
}

/// A function or procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationInfo {
    /// Operation name.
    pub name: String,
    /// Operation summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Arguments keyed by name.
    pub arguments: BTreeMap<String, ArgumentInfo>,
    /// Result type.
    pub result_type: TypeEncoding,
    /// HTTP request descriptor.
    pub request: Request,
}

/// An operation argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentInfo {
    /// Argument description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Argument type.
    #[serde(rename = "type")]
    pub argument_type: TypeEncoding,
}

/// The HTTP request an operation issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Path template.
    pub url: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Non-body parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<RequestParameter>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Operation security requirements.
    #[serde(default)]
    pub security: Vec<SecurityRequirement>,
}

/// HTTP methods mapped to operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// GET, mapped to a function.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// PATCH.
    Patch,
    /// DELETE.
    Delete,
}

impl HttpMethod {
    /// Lowercase method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestParameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Parameter shape.
    pub schema: TypeDescriptor,
}

/// Where a parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// Path segment.
    Path,
    /// Query string.
    Query,
    /// Header.
    Header,
    /// JSON body.
    Body,
    /// Form field.
    FormData,
}

impl FromStr for ParameterLocation {
    type Err = ConvertError;

    fn from_str(s: &str) -> ConvertResult<Self> {
        match s {
            "path" => Ok(Self::Path),
            "query" => Ok(Self::Query),
            "header" => Ok(Self::Header),
            "body" => Ok(Self::Body),
            "formData" => Ok(Self::FormData),
            other => Err(ConvertError::InvalidParameterLocation(other.to_string())),
        }
    }
}

/// A request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// Media type the body is encoded with.
    pub content_type: String,
    /// Body shape.
    pub schema: TypeDescriptor,
}

/// An authentication scheme.
///
/// `value` fields always hold an environment template, never a literal secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    /// API key sent in a header, query string or cookie.
    #[serde(rename = "apiKey")]
    ApiKey {
        /// Where the key is sent.
        #[serde(rename = "in")]
        location: ApiKeyLocation,
        /// Header, query or cookie name.
        name: String,
        /// Environment template holding the key.
        value: String,
    },
    /// HTTP authentication scheme.
    #[serde(rename = "http")]
    Http {
        /// Authorization scheme, e.g. `Basic`.
        scheme: String,
        /// Header carrying the credentials.
        header: String,
        /// Environment template holding the credentials.
        value: String,
    },
    /// OAuth2 flows.
    #[serde(rename = "oauth2")]
    OAuth2 {
        /// Supported flows.
        flows: BTreeMap<OAuthFlowType, OAuthFlow>,
    },
}

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    /// Request header.
    Header,
    /// Query string.
    Query,
    /// Cookie.
    Cookie,
}

impl FromStr for ApiKeyLocation {
    type Err = ConvertError;

    fn from_str(s: &str) -> ConvertResult<Self> {
        match s {
            "header" => Ok(Self::Header),
            "query" => Ok(Self::Query),
            "cookie" => Ok(Self::Cookie),
            other => Err(ConvertError::InvalidApiKeyLocation(other.to_string())),
        }
    }
}

/// OAuth2 flow kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OAuthFlowType {
    /// Authorization code flow.
    AuthorizationCode,
    /// Implicit flow.
    Implicit,
    /// Resource owner password flow.
    Password,
    /// Client credentials flow.
    ClientCredentials,
}

/// An OAuth2 flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    /// Authorization endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    /// Token endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    /// Scope name to description.
    #[serde(default)]
    pub scopes: IndexMap<String, String>,
}

/// An environment variable placeholder, rendered as `{{NAME}}` or
/// `{{NAME:-default}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvTemplate {
    /// Variable name.
    pub name: String,
    /// Value used when the variable is unset.
    pub default: Option<String>,
}

impl EnvTemplate {
    /// Creates a template without a default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// Creates a template with a default value.
    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }
}

impl fmt::Display for EnvTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{{{{{}:-{}}}}}", self.name, default),
            None => write!(f, "{{{{{}}}}}", self.name),
        }
    }
}
