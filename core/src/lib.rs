#![deny(missing_docs)]

//! # REST Schema Core
//!
//! Converts Swagger 2.0 (OpenAPI v2) documents into a REST connector schema:
//! named object and scalar types plus typed functions and procedures that
//! describe each HTTP endpoint.

/// Shared error types.
pub mod error;

/// Conversion options.
pub mod options;

/// Target schema model.
pub mod schema;

/// OpenAPI v2 parsing and conversion.
pub mod oas;

pub use error::{ConvertError, ConvertResult};
pub use oas::{convert_document, convert_openapi_v2, SwaggerDocument};
pub use options::ConvertOptions;
pub use schema::{RestSchema, TypeExpr};
