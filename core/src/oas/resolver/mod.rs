#![deny(missing_docs)]

//! # Resolver Module
//!
//! Logic for resolving OpenAPI v2 schema nodes into target types.
//!
//! Handles:
//! - Scalar classification and deduplication by derived name.
//! - Recursive type mapping with reference short-circuiting.
//! - Parameter conversion (path, query, header, body, form-data).
//! - Success response selection.
//!
//! Every component shares one [`SchemaResolver`], which owns the type
//! registry for the duration of a conversion.

pub mod params;
pub mod responses;
pub mod scalars;
pub mod types;

use crate::oas::document::SwaggerDocument;
use crate::oas::registry::TypeRegistry;
use crate::options::ConvertOptions;
use std::collections::HashSet;

pub use params::{merge_parameters, ConvertedParameters};
pub use scalars::is_primitive_scalar;

/// Conversion context threaded through every resolver call.
///
/// Holds the read-only document, the options, and the registry being
/// populated. `resolving` tracks definitions currently being expanded so that
/// cyclic references terminate.
#[derive(Debug)]
pub struct SchemaResolver<'a> {
    document: &'a SwaggerDocument,
    options: &'a ConvertOptions,
    registry: TypeRegistry,
    resolving: HashSet<String>,
}

impl<'a> SchemaResolver<'a> {
    /// Creates a resolver with an empty registry.
    pub fn new(document: &'a SwaggerDocument, options: &'a ConvertOptions) -> Self {
        Self {
            document,
            options,
            registry: TypeRegistry::new(),
            resolving: HashSet::new(),
        }
    }

    /// The document being converted.
    pub fn document(&self) -> &'a SwaggerDocument {
        self.document
    }

    /// The conversion options.
    pub fn options(&self) -> &'a ConvertOptions {
        self.options
    }

    /// The registry populated so far.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Consumes the resolver, returning the populated registry.
    pub fn into_registry(self) -> TypeRegistry {
        self.registry
    }
}

/// Returns `path` extended by `segment`.
pub(crate) fn extend_path(path: &[String], segment: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(path.len() + 1);
    out.extend_from_slice(path);
    out.push(segment.to_string());
    out
}
