//! # Error Handling
//!
//! Provides the `ConvertError` enum shared by every converter component.

use derive_more::{Display, From};

/// Errors raised while converting an OpenAPI v2 document.
///
/// Leaf variants describe what went wrong. `Field` and `Api` wrap a leaf with
/// the schema field path and the API path it was raised under.
#[derive(Debug, Display, From)]
pub enum ConvertError {
    /// A schema node was missing or carried no usable type information.
    #[display("schema is empty")]
    EmptySchema,

    /// An array schema or parameter declared no item type.
    #[display("array item is empty")]
    MissingArrayItem,

    /// The declared primitive type name is not known.
    #[display("unsupported schema type {_0}")]
    UnsupportedType(String),

    /// A parameter declared an `in` value outside the v2 locations.
    #[display("invalid parameter location {_0}")]
    InvalidParameterLocation(String),

    /// A security definition declared an unknown `type`.
    #[display("invalid security scheme: {_0}")]
    UnsupportedSecurityScheme(String),

    /// An API key security definition declared an unknown `in` value.
    #[display("invalid api key location {_0}")]
    InvalidApiKeyLocation(String),

    /// An API key security definition has no parameter name.
    #[display("api key name is empty")]
    EmptyApiKeyName,

    /// An OAuth2 security definition declared an unknown `flow`.
    #[display("unsupported oauth2 flow {_0}")]
    UnsupportedOAuthFlow(String),

    /// A parameter has no name.
    #[display("parameter name is empty")]
    EmptyParameterName,

    /// A `$ref` points outside the document or at a missing entry.
    #[display("cannot resolve reference {_0}")]
    UnresolvedReference(String),

    /// The document declares no path items.
    #[display("there is no API to be converted")]
    NoConvertibleApi,

    /// The input could not be parsed as JSON.
    #[from]
    #[display("failed to parse JSON document: {_0}")]
    Json(serde_json::Error),

    /// The input could not be parsed as YAML.
    #[from]
    #[display("failed to parse YAML document: {_0}")]
    Yaml(serde_yaml::Error),

    /// An error raised while resolving the schema at `field_path`.
    #[display("{field_path}: {source}")]
    Field {
        /// Dotted path of the schema field being resolved.
        field_path: String,
        /// The underlying error.
        source: Box<ConvertError>,
    },

    /// An error raised while converting the entry at `api_path`.
    #[display("{api_path}: {source}")]
    Api {
        /// The API path or document location being converted.
        api_path: String,
        /// The underlying error.
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    /// Attaches the field path the error was raised under.
    ///
    /// The innermost field path wins, so re-wrapping on the way up the
    /// recursion keeps the most precise location.
    pub fn at_field(self, field_path: &[String]) -> Self {
        if field_path.is_empty() || matches!(self, Self::Field { .. } | Self::Api { .. }) {
            return self;
        }
        Self::Field {
            field_path: field_path.join("."),
            source: Box::new(self),
        }
    }

    /// Attaches the API path the error was raised under.
    pub fn at_api_path(self, api_path: &str) -> Self {
        if matches!(self, Self::Api { .. }) {
            return self;
        }
        Self::Api {
            api_path: api_path.to_string(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost cause, skipping any location wrappers.
    pub fn root(&self) -> &ConvertError {
        match self {
            Self::Field { source, .. } | Self::Api { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns the API path attached to this error, if any.
    pub fn api_path(&self) -> Option<&str> {
        match self {
            Self::Api { api_path, .. } => Some(api_path),
            _ => None,
        }
    }

    /// Returns the innermost field path attached to this error, if any.
    pub fn field_path(&self) -> Option<&str> {
        match self {
            Self::Field { field_path, .. } => Some(field_path),
            Self::Api { source, .. } => source.field_path(),
            _ => None,
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Yaml(e) => Some(e),
            Self::Field { source, .. } | Self::Api { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Helper type alias for Result using ConvertError.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: ConvertError = err.into();
        assert!(matches!(converted, ConvertError::Json(_)));
    }

    #[test]
    fn test_location_wrapping() {
        let err = ConvertError::EmptySchema
            .at_field(&["Pet".to_string(), "owner".to_string()])
            .at_api_path("/pets");

        assert_eq!(err.to_string(), "/pets: Pet.owner: schema is empty");
        assert_eq!(err.api_path(), Some("/pets"));
        assert_eq!(err.field_path(), Some("Pet.owner"));
        assert!(matches!(err.root(), ConvertError::EmptySchema));
    }

    #[test]
    fn test_innermost_location_wins() {
        let err = ConvertError::MissingArrayItem
            .at_field(&["Pet".to_string(), "tags".to_string()])
            .at_field(&["Pet".to_string()])
            .at_api_path("/pets")
            .at_api_path("/ignored");

        assert_eq!(err.to_string(), "/pets: Pet.tags: array item is empty");
    }

    #[test]
    fn test_empty_field_path_is_not_wrapped() {
        let err = ConvertError::EmptyParameterName.at_field(&[]);
        assert!(matches!(err, ConvertError::EmptyParameterName));
    }
}
