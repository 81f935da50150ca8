#![deny(missing_docs)]

//! # Type Registry
//!
//! Name-keyed object and scalar definitions shared across one conversion.
//!
//! Object entries follow last-writer-wins: registering a name twice replaces
//! the earlier definition without merging. Scalar entries are insert-if-absent,
//! so two nodes that derive the same scalar name share one entry.

use crate::schema::{ObjectType, ScalarType};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Object and scalar definitions collected during a conversion.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    object_types: BTreeMap<String, ObjectType>,
    scalar_types: BTreeMap<String, ScalarType>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an object type, replacing any entry under the same name.
    ///
    /// Returns the replaced definition.
    pub fn insert_object(&mut self, name: &str, object: ObjectType) -> Option<ObjectType> {
        let previous = self.object_types.insert(name.to_string(), object);
        if let Some(prev) = &previous {
            if Some(prev) != self.object_types.get(name) {
                debug!(type_name = name, "object type overwritten by a different definition");
            }
        }
        previous
    }

    /// Registers a scalar unless one with the same name exists.
    ///
    /// Returns `true` when the scalar was inserted.
    pub fn ensure_scalar(&mut self, name: &str, scalar: impl FnOnce() -> ScalarType) -> bool {
        if self.scalar_types.contains_key(name) {
            return false;
        }
        trace!(scalar = name, "registering scalar type");
        self.scalar_types.insert(name.to_string(), scalar());
        true
    }

    /// Registers a scalar, replacing any entry under the same name.
    pub fn replace_scalar(&mut self, name: &str, scalar: ScalarType) {
        self.scalar_types.insert(name.to_string(), scalar);
    }

    /// Looks up an object type.
    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.object_types.get(name)
    }

    /// Looks up a scalar type.
    pub fn scalar_type(&self, name: &str) -> Option<&ScalarType> {
        self.scalar_types.get(name)
    }

    /// Number of registered object types.
    pub fn object_count(&self) -> usize {
        self.object_types.len()
    }

    /// Number of registered scalar types.
    pub fn scalar_count(&self) -> usize {
        self.scalar_types.len()
    }

    /// Consumes the registry, returning the object and scalar maps.
    pub fn into_parts(
        self,
    ) -> (
        BTreeMap<String, ObjectType>,
        BTreeMap<String, ScalarType>,
    ) {
        (self.object_types, self.scalar_types)
    }
}
