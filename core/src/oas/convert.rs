#![deny(missing_docs)]

//! # Document Conversion
//!
//! Walks a Swagger 2.0 document in a fixed order and assembles the
//! [`RestSchema`]:
//!
//! 1. Path items, in declaration order.
//! 2. Schema definitions, which may overwrite inline types of the same name.
//! 3. Security definitions and document-wide security requirements.
//!
//! The first error aborts the conversion; no partial schema is returned.

use crate::error::{ConvertError, ConvertResult};
use crate::oas::document::SwaggerDocument;
use crate::oas::resolver::SchemaResolver;
use crate::oas::routes::convert_paths;
use crate::oas::routes::naming::to_constant_case;
use crate::oas::security::{convert_security_requirements, convert_security_scheme};
use crate::options::ConvertOptions;
use crate::schema::{EnvTemplate, RestSchema, ServerConfig, Settings};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Converts raw Swagger 2.0 JSON or YAML bytes.
///
/// Returns the complete schema, or a non-empty list of errors.
pub fn convert_openapi_v2(
    input: &[u8],
    options: &ConvertOptions,
) -> Result<RestSchema, Vec<ConvertError>> {
    let document = SwaggerDocument::from_slice(input).map_err(|e| vec![e])?;
    convert_document(&document, options).map_err(|e| vec![e])
}

/// Converts a parsed Swagger 2.0 document.
pub fn convert_document(
    document: &SwaggerDocument,
    options: &ConvertOptions,
) -> ConvertResult<RestSchema> {
    if let Some(version) = document.swagger.as_deref() {
        if !version.starts_with("2.") {
            warn!(version, "document does not declare Swagger 2.0");
        }
    }

    let paths = document
        .paths
        .as_ref()
        .filter(|paths| !paths.is_empty())
        .ok_or(ConvertError::NoConvertibleApi)?;

    let mut resolver = SchemaResolver::new(document, options);
    let operations = convert_paths(&mut resolver, paths)?;

    for (name, schema) in &document.definitions {
        resolver
            .convert_definition(name, schema)
            .map_err(|e| e.at_api_path(&format!("definitions/{}", name)))?;
    }

    let mut security_schemes = BTreeMap::new();
    for (key, definition) in &document.security_definitions {
        let scheme = convert_security_scheme(key, definition, options)
            .map_err(|e| e.at_api_path(&format!("securityDefinitions/{}", key)))?;
        security_schemes.insert(key.clone(), scheme);
    }

    let (object_types, scalar_types) = resolver.into_registry().into_parts();
    let schema = RestSchema {
        settings: Settings {
            servers: server_configs(document, options),
            version: document.info.as_ref().and_then(|info| info.version.clone()),
            security_schemes,
            security: convert_security_requirements(document.security.as_deref()),
        },
        functions: operations.functions,
        procedures: operations.procedures,
        object_types,
        scalar_types,
    };

    info!(
        functions = schema.functions.len(),
        procedures = schema.procedures.len(),
        object_types = schema.object_types.len(),
        scalar_types = schema.scalar_types.len(),
        "converted OpenAPI v2 document"
    );
    Ok(schema)
}

/// Builds the server list from `schemes`, `host` and `basePath`.
///
/// The URL is wrapped in an environment template so it can be overridden at
/// runtime, e.g. `{{PETSTORE_SERVER_URL:-https://petstore.io/v2}}`.
fn server_configs(document: &SwaggerDocument, options: &ConvertOptions) -> Vec<ServerConfig> {
    let Some(host) = document.host.as_deref().filter(|h| !h.is_empty()) else {
        return Vec::new();
    };
    let scheme = document
        .schemes
        .iter()
        .find(|s| s.starts_with("http"))
        .map_or("https", String::as_str);
    let url = format!(
        "{}://{}{}",
        scheme,
        host,
        document.base_path.as_deref().unwrap_or_default()
    );
    let env_name = to_constant_case(&[options.env_prefix.as_str(), "SERVER_URL"]);

    vec![ServerConfig {
        url: EnvTemplate::with_default(env_name, url).to_string(),
    }]
}
