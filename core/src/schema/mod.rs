#![deny(missing_docs)]

//! # Target Schema Model
//!
//! - **types**: type expressions, descriptors, scalar and object definitions.
//! - **rest**: the schema envelope, operations, requests and security schemes.

pub mod rest;
pub mod types;

pub use rest::{
    ApiKeyLocation, ArgumentInfo, EnvTemplate, HttpMethod, OAuthFlow, OAuthFlowType,
    OperationInfo, ParameterLocation, Request, RequestBody, RequestParameter, RestSchema,
    SecurityRequirement, SecurityScheme, ServerConfig, Settings,
};
pub use types::{
    ObjectField, ObjectType, ScalarType, TypeDescriptor, TypeEncoding, TypeExpr,
    TypeRepresentation,
};
