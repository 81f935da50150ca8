#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helpers deriving type, scalar, operation and environment variable names
//! from OpenAPI identifiers and paths.

use crate::options::ConvertOptions;
use crate::schema::HttpMethod;
use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// Converts an identifier to PascalCase.
pub fn to_pascal_case(s: &str) -> String {
    s.to_upper_camel_case()
}

/// Joins path segments into one PascalCase name.
///
/// e.g. `["Pet", "owner"]` -> `PetOwner`
pub fn join_pascal_case<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| to_pascal_case(s.as_ref()))
        .collect()
}

/// Joins segments into an upper snake case environment variable name.
///
/// Empty segments are skipped and characters other than ASCII letters and
/// digits become `_`. Segments are uppercased as-is, without word splitting,
/// so `["myApi", "apiKeyAuth"]` -> `MYAPI_APIKEYAUTH`.
pub fn to_constant_case<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() {
                        c.to_ascii_uppercase()
                    } else {
                        '_'
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Turns an API path into a PascalCase naming context.
///
/// e.g. `/pets/{petId}/tags` -> `PetsPetIdTags`
pub fn sanitize_api_path(api_path: &str) -> String {
    to_pascal_case(&api_path.replace(['{', '}'], ""))
}

/// Synthesizes an operation name for an operation without `operationId`.
///
/// GET operations are named after the path alone; other methods are prefixed
/// with the method (or its configured alias).
///
/// e.g. `GET /pets/{petId}` -> `petsPetId`, `POST /pets` -> `postPets`
pub fn build_operation_name(api_path: &str, method: HttpMethod, options: &ConvertOptions) -> String {
    let path = options.trim_path_prefix(api_path).replace(['{', '}'], "");
    let name = match method {
        HttpMethod::Get => path.to_lower_camel_case(),
        other => format!("{} {}", options.method_verb(other.as_str()), path).to_lower_camel_case(),
    };
    if name.is_empty() {
        method.as_str().to_string()
    } else {
        name
    }
}
