#![deny(missing_docs)]

//! # OpenAPI v2 Document Model
//!
//! Serde shims mapping directly onto Swagger 2.0 JSON/YAML objects.
//! Only the parts the converter reads are modelled; unknown keys are ignored.

use crate::error::{ConvertError, ConvertResult};
use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// A security requirement: scheme name to scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Root Swagger 2.0 document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerDocument {
    /// Swagger version, e.g. `2.0`.
    pub swagger: Option<String>,
    /// Metadata about the API.
    pub info: Option<Info>,
    /// Host (and optional port) serving the API.
    pub host: Option<String>,
    /// Base path prepended to every path.
    pub base_path: Option<String>,
    /// Transfer protocols.
    #[serde(default)]
    pub schemes: Vec<String>,
    /// Default request media types.
    #[serde(default)]
    pub consumes: Vec<String>,
    /// Default response media types.
    #[serde(default)]
    pub produces: Vec<String>,
    /// Path items.
    pub paths: Option<Paths>,
    /// Reusable schema definitions.
    #[serde(default)]
    pub definitions: IndexMap<String, Schema>,
    /// Reusable parameters.
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
    /// Reusable responses.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
    /// Security scheme definitions.
    #[serde(default)]
    pub security_definitions: IndexMap<String, SecurityScheme>,
    /// Document-wide security requirements.
    pub security: Option<Vec<SecurityRequirement>>,
}

impl SwaggerDocument {
    /// Parses a document from JSON or YAML bytes.
    ///
    /// Input whose first non-whitespace byte is `{` is read as JSON first and,
    /// failing that, as YAML flow mappings. The JSON error is reported when
    /// both fail. Anything else is read as YAML.
    pub fn from_slice(input: &[u8]) -> ConvertResult<Self> {
        let is_json = input
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b'{');
        if !is_json {
            return Ok(serde_yaml::from_slice(input)?);
        }
        match serde_json::from_slice(input) {
            Ok(document) => Ok(document),
            Err(json_err) => serde_yaml::from_slice(input).map_err(|_| json_err.into()),
        }
    }

    /// Whether the document declares at least one path item.
    pub fn has_paths(&self) -> bool {
        self.paths.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Looks up a schema definition by name.
    pub fn definition(&self, name: &str) -> Option<&Schema> {
        self.definitions.get(name)
    }

    /// Resolves a parameter, following `#/parameters/...` references.
    pub fn resolve_parameter<'a>(&'a self, param: &'a RefOr<Parameter>) -> ConvertResult<&'a Parameter> {
        match param {
            RefOr::Item(p) => Ok(p),
            RefOr::Ref(r) => pointer_name(&r.reference, "parameters")
                .and_then(|name| self.parameters.get(&name))
                .ok_or_else(|| ConvertError::UnresolvedReference(r.reference.clone())),
        }
    }

    /// Resolves a response, following `#/responses/...` references.
    pub fn resolve_response<'a>(&'a self, response: &'a RefOr<Response>) -> ConvertResult<&'a Response> {
        match response {
            RefOr::Item(r) => Ok(r),
            RefOr::Ref(r) => pointer_name(&r.reference, "responses")
                .and_then(|name| self.responses.get(&name))
                .ok_or_else(|| ConvertError::UnresolvedReference(r.reference.clone())),
        }
    }
}

/// Extracts the definition name from a `#/definitions/{name}` reference.
pub fn definition_name(reference: &str) -> Option<String> {
    pointer_name(reference, "definitions")
}

/// Extracts `{name}` from a local `#/{section}/{name}` pointer.
fn pointer_name(reference: &str, section: &str) -> Option<String> {
    let pointer = reference.strip_prefix("#/")?;
    let (head, name) = pointer.split_once('/')?;
    if head != section || name.is_empty() || name.contains('/') {
        return None;
    }
    Some(decode_pointer_segment(name))
}

/// Decodes a JSON pointer segment (percent-encoding, then `~1` and `~0`).
fn decode_pointer_segment(segment: &str) -> String {
    percent_decode_str(segment)
        .decode_utf8_lossy()
        .replace("~1", "/")
        .replace("~0", "~")
}

/// API metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    /// API title.
    #[serde(default)]
    pub title: String,
    /// API version.
    pub version: Option<String>,
    /// API description.
    pub description: Option<String>,
}

/// Either a `$ref` or an inline object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A reference.
    Ref(Reference),
    /// An inline object.
    Item(T),
}

/// A `$ref` object.
#[derive(Debug, Clone, Deserialize)]
pub struct Reference {
    /// The reference pointer.
    #[serde(rename = "$ref")]
    pub reference: String,
}

/// The Paths Object. `x-` extensions are kept aside.
#[derive(Debug, Clone, Default)]
pub struct Paths {
    /// Path items keyed by path template, in declaration order.
    pub items: IndexMap<String, PathItem>,
    /// Specification extensions (x-...).
    pub extensions: IndexMap<String, JsonValue>,
}

impl Paths {
    /// Returns true when no concrete path items are present.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'de> Deserialize<'de> for Paths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, JsonValue>::deserialize(deserializer)?;
        let mut items = IndexMap::new();
        let mut extensions = IndexMap::new();

        for (key, value) in raw {
            if key.starts_with("x-") {
                extensions.insert(key, value);
                continue;
            }
            let item = serde_json::from_value::<PathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", key, e))
            })?;
            items.insert(key, item);
        }

        Ok(Self { items, extensions })
    }
}

/// Operations available on a single path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    /// GET operation.
    pub get: Option<Operation>,
    /// PUT operation.
    pub put: Option<Operation>,
    /// POST operation.
    pub post: Option<Operation>,
    /// DELETE operation.
    pub delete: Option<Operation>,
    /// PATCH operation.
    pub patch: Option<Operation>,
    /// HEAD operation. Not converted.
    pub head: Option<Operation>,
    /// OPTIONS operation. Not converted.
    pub options: Option<Operation>,
    /// Parameters shared by every operation on the path.
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
}

/// A single API operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique operation identifier.
    pub operation_id: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Verbose description.
    pub description: Option<String>,
    /// Tags for grouping.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Request media types, overriding the document default.
    pub consumes: Option<Vec<String>>,
    /// Response media types, overriding the document default.
    pub produces: Option<Vec<String>>,
    /// Operation parameters.
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Possible responses.
    pub responses: Option<Responses>,
    /// Security requirements, overriding the document default.
    pub security: Option<Vec<SecurityRequirement>>,
    /// Whether the operation is deprecated.
    #[serde(default)]
    pub deprecated: bool,
}

/// A parameter object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name.
    #[serde(default)]
    pub name: String,
    /// Location: path, query, header, body or formData.
    #[serde(rename = "in", default)]
    pub location: String,
    /// Description.
    pub description: Option<String>,
    /// Whether the parameter is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Body schema (`in: body` only).
    pub schema: Option<Schema>,
    /// Primitive type for non-body parameters.
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    /// Format modifier.
    pub format: Option<String>,
    /// Item description for array parameters.
    pub items: Option<Box<ParameterItems>>,
    /// Array serialization format.
    pub collection_format: Option<String>,
    /// Allowed values.
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<JsonValue>,
    /// Default value.
    pub default: Option<JsonValue>,
    /// Regular expression constraint.
    pub pattern: Option<String>,
    /// Inclusive upper bound.
    pub maximum: Option<f64>,
    /// Inclusive lower bound.
    pub minimum: Option<f64>,
    /// Maximum length.
    pub max_length: Option<u64>,
    /// Minimum length.
    pub min_length: Option<u64>,
}

/// Item description for array parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterItems {
    /// Item type.
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    /// Item format.
    pub format: Option<String>,
    /// Nested items for multi-dimensional arrays.
    pub items: Option<Box<ParameterItems>>,
    /// Allowed item values.
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<JsonValue>,
    /// Array serialization format.
    pub collection_format: Option<String>,
}

/// The Responses Object: status codes plus `default`.
#[derive(Debug, Clone, Default)]
pub struct Responses {
    /// The `default` response.
    pub default: Option<RefOr<Response>>,
    /// Responses keyed by status code, in declaration order.
    pub codes: IndexMap<String, RefOr<Response>>,
    /// Specification extensions (x-...).
    pub extensions: IndexMap<String, JsonValue>,
}

impl<'de> Deserialize<'de> for Responses {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // YAML reads unquoted status codes as integers
        #[derive(Deserialize, PartialEq, Eq, Hash)]
        #[serde(untagged)]
        enum StatusKey {
            Text(String),
            Code(u64),
        }

        let raw = IndexMap::<StatusKey, JsonValue>::deserialize(deserializer)?;
        let mut out = Self::default();

        for (key, value) in raw {
            let key = match key {
                StatusKey::Text(text) => text,
                StatusKey::Code(code) => code.to_string(),
            };
            if key.starts_with("x-") {
                out.extensions.insert(key, value);
                continue;
            }
            let response = serde_json::from_value::<RefOr<Response>>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse response '{}': {}", key, e))
            })?;
            if key == "default" {
                out.default = Some(response);
            } else {
                out.codes.insert(key, response);
            }
        }

        Ok(out)
    }
}

/// A single response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Payload schema.
    pub schema: Option<Schema>,
}

/// A Schema Object, or a `$ref` to one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Reference to a definition.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Declared types. A single string and a list are both accepted.
    #[serde(rename = "type", default, deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    /// Format modifier.
    pub format: Option<String>,
    /// Title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Allowed values.
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<JsonValue>,
    /// Names of mandatory properties.
    #[serde(default)]
    pub required: Vec<String>,
    /// Object properties in declaration order.
    #[serde(default)]
    pub properties: IndexMap<String, Schema>,
    /// Array item schema.
    pub items: Option<Box<Schema>>,
    /// Additional properties: a boolean or a schema.
    pub additional_properties: Option<AdditionalProperties>,
    /// Union members.
    #[serde(default)]
    pub any_of: Vec<Schema>,
    /// Exclusive union members.
    #[serde(default)]
    pub one_of: Vec<Schema>,
    /// Composition members.
    #[serde(default)]
    pub all_of: Vec<Schema>,
    /// Nullable marker.
    pub nullable: Option<bool>,
    /// Vendor nullable marker used by Swagger 2.0 tooling.
    #[serde(rename = "x-nullable")]
    pub x_nullable: Option<bool>,
    /// Regular expression constraint.
    pub pattern: Option<String>,
    /// Inclusive upper bound.
    pub maximum: Option<f64>,
    /// Inclusive lower bound.
    pub minimum: Option<f64>,
    /// Maximum length.
    pub max_length: Option<u64>,
    /// Minimum length.
    pub min_length: Option<u64>,
    /// Default value.
    pub default: Option<JsonValue>,
}

impl Schema {
    /// Whether the schema is explicitly marked nullable.
    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(false) || self.x_nullable.unwrap_or(false)
    }

    /// Whether the schema describes a registrable object: a single `object`
    /// type (or no type but declared properties), without open additional
    /// properties or union members.
    pub fn is_object_like(&self) -> bool {
        let object_typed = match self.types.as_slice() {
            [t] => t == "object",
            [] => !self.properties.is_empty(),
            _ => false,
        };
        object_typed && !self.has_open_additional_properties() && !self.is_composite()
    }

    /// Whether additional properties are open-ended (`true` or a schema).
    pub fn has_open_additional_properties(&self) -> bool {
        matches!(
            self.additional_properties,
            Some(AdditionalProperties::Bool(true)) | Some(AdditionalProperties::Schema(_))
        )
    }

    /// Whether the schema is a union or composition.
    pub fn is_composite(&self) -> bool {
        !self.any_of.is_empty() || !self.one_of.is_empty() || !self.all_of.is_empty()
    }
}

/// `additionalProperties` value.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` or `false`.
    Bool(bool),
    /// A value schema.
    Schema(Box<Schema>),
}

/// A Swagger 2.0 security definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    /// `basic`, `apiKey` or `oauth2`.
    #[serde(rename = "type", default)]
    pub scheme_type: String,
    /// Description.
    pub description: Option<String>,
    /// Header or query parameter name (`apiKey`).
    pub name: Option<String>,
    /// Key location (`apiKey`).
    #[serde(rename = "in")]
    pub location: Option<String>,
    /// OAuth2 flow name.
    pub flow: Option<String>,
    /// OAuth2 authorization endpoint.
    pub authorization_url: Option<String>,
    /// OAuth2 token endpoint.
    pub token_url: Option<String>,
    /// OAuth2 scopes.
    #[serde(default)]
    pub scopes: IndexMap<String, String>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(t)) => vec![t],
        Some(OneOrMany::Many(ts)) => ts,
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETSTORE: &str = r##"
swagger: "2.0"
info:
  title: Petstore
  version: 1.0.0
host: petstore.swagger.io
basePath: /v2
schemes: [https, http]
x-generator: hand
paths:
  x-internal: true
  /pets/{petId}:
    parameters:
      - $ref: "#/parameters/PetId"
    get:
      operationId: getPetById
      responses:
        "200":
          description: ok
          schema:
            $ref: "#/definitions/Pet"
        default:
          $ref: "#/responses/Error"
        x-cache: 60
parameters:
  PetId:
    name: petId
    in: path
    required: true
    type: integer
    format: int64
responses:
  Error:
    description: error
definitions:
  Pet:
    type: object
    required: [name]
    properties:
      name:
        type: string
      tags:
        type: [string, "null"]
      meta:
        additionalProperties: false
"##;

    #[test]
    fn test_parse_yaml_document() {
        let doc = SwaggerDocument::from_slice(PETSTORE.as_bytes()).unwrap();
        assert_eq!(doc.swagger.as_deref(), Some("2.0"));
        assert_eq!(doc.host.as_deref(), Some("petstore.swagger.io"));

        let paths = doc.paths.as_ref().unwrap();
        assert_eq!(paths.items.len(), 1);
        assert!(paths.extensions.contains_key("x-internal"));

        let item = &paths.items["/pets/{petId}"];
        let param = doc.resolve_parameter(&item.parameters[0]).unwrap();
        assert_eq!(param.name, "petId");
        assert!(param.required);

        let responses = item.get.as_ref().unwrap().responses.as_ref().unwrap();
        assert_eq!(responses.codes.len(), 1);
        assert!(responses.extensions.contains_key("x-cache"));
        let default = doc.resolve_response(responses.default.as_ref().unwrap()).unwrap();
        assert_eq!(default.description, "error");

        let pet = doc.definition("Pet").unwrap();
        assert!(pet.is_object_like());
        assert_eq!(pet.properties["tags"].types, vec!["string", "null"]);
        assert!(!pet.properties["meta"].has_open_additional_properties());
    }

    #[test]
    fn test_parse_json_document() {
        let doc = SwaggerDocument::from_slice(
            br#"  {"swagger": "2.0", "paths": {"/ping": {"get": {"responses": {}}}}}"#,
        )
        .unwrap();
        assert!(doc.has_paths());
    }

    #[test]
    fn test_parse_yaml_flow_document() {
        let doc = SwaggerDocument::from_slice(
            b"{swagger: '2.0', paths: {/ping: {get: {responses: {'204': {description: pong}}}}}}",
        )
        .unwrap();
        assert_eq!(doc.swagger.as_deref(), Some("2.0"));
        let ping = &doc.paths.as_ref().unwrap().items["/ping"];
        let responses = ping.get.as_ref().unwrap().responses.as_ref().unwrap();
        assert!(responses.codes.contains_key("204"));
    }

    #[test]
    fn test_parse_error_variants() {
        let err = SwaggerDocument::from_slice(b"{ not json").unwrap_err();
        assert!(matches!(err, ConvertError::Json(_)));

        let err = SwaggerDocument::from_slice(b"paths: [unclosed").unwrap_err();
        assert!(matches!(err, ConvertError::Yaml(_)));
    }

    #[test]
    fn test_unquoted_status_codes() {
        let responses: Responses = serde_yaml::from_str(
            r#"
200:
  description: ok
404:
  description: missing
"#,
        )
        .unwrap();
        assert_eq!(responses.codes.keys().collect::<Vec<_>>(), vec!["200", "404"]);
    }

    #[test]
    fn test_unresolved_parameter_ref() {
        let doc = SwaggerDocument::default();
        let param = RefOr::Ref(Reference {
            reference: "#/parameters/Missing".into(),
        });
        let err = doc.resolve_parameter(&param).unwrap_err();
        assert!(matches!(err, ConvertError::UnresolvedReference(r) if r == "#/parameters/Missing"));
    }

    #[test]
    fn test_definition_name_decoding() {
        assert_eq!(definition_name("#/definitions/Pet").as_deref(), Some("Pet"));
        assert_eq!(
            definition_name("#/definitions/a~1b%20c").as_deref(),
            Some("a/b c")
        );
        assert_eq!(definition_name("#/parameters/Pet"), None);
        assert_eq!(definition_name("other.yaml#/definitions/Pet"), None);
    }
}
