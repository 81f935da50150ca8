#![deny(missing_docs)]

//! # Target Type System
//!
//! Type expressions, denormalized type descriptors, and the scalar/object
//! definitions stored in the schema registries.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

/// Scalar used for untyped and polymorphic schema nodes.
pub const JSON_SCALAR: &str = "JSON";

/// Scalar used for responses without a declared payload.
pub const BOOLEAN_SCALAR: &str = "Boolean";

/// A reference to a type in the target schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A scalar or object type, by name.
    Named(String),
    /// A type that may be null.
    Nullable(Box<TypeExpr>),
    /// A list of the element type.
    Array(Box<TypeExpr>),
}

impl TypeExpr {
    /// Creates a named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Creates an array of `element`.
    pub fn array(element: TypeExpr) -> Self {
        Self::Array(Box::new(element))
    }

    /// Wraps the expression in `Nullable`, unless it already is.
    pub fn into_nullable(self) -> Self {
        match self {
            Self::Nullable(_) => self,
            other => Self::Nullable(Box::new(other)),
        }
    }

    /// Removes an outer `Nullable` wrapper, if any.
    pub fn into_non_nullable(self) -> Self {
        match self {
            Self::Nullable(inner) => *inner,
            other => other,
        }
    }

    /// Whether the outer form is `Nullable`.
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// Encodes the expression into its serializable wire form.
    pub fn encode(&self) -> TypeEncoding {
        match self {
            Self::Named(name) => TypeEncoding::Named { name: name.clone() },
            Self::Nullable(inner) => TypeEncoding::Nullable {
                underlying_type: Box::new(inner.encode()),
            },
            Self::Array(inner) => TypeEncoding::Array {
                element_type: Box::new(inner.encode()),
            },
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{}", name),
            Self::Nullable(inner) => write!(f, "Nullable<{}>", inner),
            Self::Array(inner) => write!(f, "[{}]", inner),
        }
    }
}

/// Wire form of a [`TypeExpr`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeEncoding {
    /// A named type.
    Named {
        /// The referenced type name.
        name: String,
    },
    /// A nullable type.
    Nullable {
        /// The wrapped type.
        underlying_type: Box<TypeEncoding>,
    },
    /// An array type.
    Array {
        /// The element type.
        element_type: Box<TypeEncoding>,
    },
}

/// Denormalized shape record paired with every resolved [`TypeExpr`].
///
/// Used downstream to validate and serialize request parameters and bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// `object`, `array`, a scalar name, or a definition name for references.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Original OpenAPI format modifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Regular expression constraint for strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Whether the value may be null or omitted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    /// Inclusive numeric lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive numeric upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Minimum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Element shape for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<TypeDescriptor>>,
    /// Property shapes for objects.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, TypeDescriptor>,
}

impl TypeDescriptor {
    /// Creates a descriptor carrying only a type name.
    pub fn of_type(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }
}

/// How a scalar is represented on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeRepresentation {
    /// `true` / `false`.
    Boolean,
    /// Any string.
    String,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Single precision float.
    Float32,
    /// Double precision float.
    Float64,
    /// ISO 8601 date.
    Date,
    /// ISO 8601 timestamp with timezone.
    TimestampTZ,
    /// UUID string.
    #[serde(rename = "uuid")]
    Uuid,
    /// Base64 encoded bytes.
    Bytes,
    /// Arbitrary JSON.
    Json,
    /// One of a fixed set of strings.
    Enum {
        /// The allowed values.
        one_of: Vec<String>,
    },
}

/// A scalar type definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarType {
    /// Aggregate functions supported by the scalar. Always empty here.
    #[serde(default)]
    pub aggregate_functions: BTreeMap<String, JsonValue>,
    /// Comparison operators supported by the scalar. Always empty here.
    #[serde(default)]
    pub comparison_operators: BTreeMap<String, JsonValue>,
    /// Wire representation hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representation: Option<TypeRepresentation>,
}

impl ScalarType {
    /// Creates a scalar with the given representation.
    pub fn new(representation: TypeRepresentation) -> Self {
        Self {
            representation: Some(representation),
            ..Default::default()
        }
    }
}

/// A field of an [`ObjectType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectField {
    /// Field description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field type.
    #[serde(rename = "type")]
    pub field_type: TypeEncoding,
}

/// An object type definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Object description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in declaration order.
    pub fields: IndexMap<String, ObjectField>,
}
