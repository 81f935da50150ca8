#![deny(missing_docs)]

//! # OpenAPI v2 Conversion Module
//!
//! - **document**: serde model of Swagger 2.0 documents.
//! - **registry**: object and scalar types collected during a conversion.
//! - **resolver**: schema, parameter and response resolution.
//! - **routes**: path items to functions and procedures.
//! - **security**: security definitions and requirements.
//! - **convert**: the document walker tying the above together.

pub mod convert;
pub mod document;
pub mod registry;
pub mod resolver;
pub mod routes;
pub mod security;

pub use convert::{convert_document, convert_openapi_v2};
pub use document::SwaggerDocument;
pub use registry::TypeRegistry;
pub use resolver::SchemaResolver;
