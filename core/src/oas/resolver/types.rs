#![deny(missing_docs)]

//! # Type Resolution
//!
//! Recursively converts OpenAPI v2 schema nodes into a [`TypeExpr`] plus a
//! [`TypeDescriptor`], registering object and scalar types as it goes.
//!
//! Resolution order:
//! 1. `$ref` to an object definition short-circuits to the PascalCase name.
//!    The definition itself is registered when the definitions are walked.
//! 2. Multiple types, unions and open `additionalProperties` become `JSON`.
//! 3. Primitives become named scalars.
//! 4. Objects are registered under the PascalCase join of the field path.
//! 5. Arrays resolve their items under the same field path.
//! 6. An explicit nullable marker wraps the result once.

use crate::error::{ConvertError, ConvertResult};
use crate::oas::document::{definition_name, Schema};
use crate::oas::resolver::{extend_path, is_primitive_scalar, SchemaResolver};
use crate::oas::routes::naming::{join_pascal_case, to_pascal_case};
use crate::schema::types::JSON_SCALAR;
use crate::schema::{
    ObjectField, ObjectType, ScalarType, TypeDescriptor, TypeExpr, TypeRepresentation,
};

impl SchemaResolver<'_> {
    /// Resolves a schema that may be a `$ref`, applying caller nullability.
    ///
    /// An inline schema with a single-word `title` is named after the title
    /// instead of the field path.
    pub fn resolve_schema_ref(
        &mut self,
        schema: &Schema,
        nullable: bool,
        api_path: &str,
        field_path: &[String],
    ) -> ConvertResult<(TypeExpr, TypeDescriptor)> {
        let (mut ty, mut desc) = match &schema.reference {
            Some(reference) => self.resolve_reference(reference, api_path, field_path)?,
            None => match schema_title(schema) {
                Some(title) => self.resolve_schema(schema, api_path, &[to_pascal_case(title)])?,
                None => self.resolve_schema(schema, api_path, field_path)?,
            },
        };

        if nullable {
            ty = ty.into_nullable();
            desc.nullable = true;
        }
        Ok((ty, desc))
    }

    /// Resolves an inline schema node.
    pub fn resolve_schema(
        &mut self,
        schema: &Schema,
        api_path: &str,
        field_path: &[String],
    ) -> ConvertResult<(TypeExpr, TypeDescriptor)> {
        if let Some(reference) = &schema.reference {
            return self.resolve_reference(reference, api_path, field_path);
        }

        let (ty, mut desc) = if schema.is_composite()
            || schema.has_open_additional_properties()
            || schema.types.len() > 1
        {
            self.registry
                .ensure_scalar(JSON_SCALAR, || ScalarType::new(TypeRepresentation::Json));
            (TypeExpr::named(JSON_SCALAR), descriptor_from_schema(schema, JSON_SCALAR))
        } else {
            let type_name = match schema.types.first() {
                Some(t) => t.as_str(),
                None if !schema.properties.is_empty() => "object",
                None => return Err(ConvertError::EmptySchema.at_field(field_path)),
            };

            if is_primitive_scalar(type_name) {
                let scalar = self.scalar_from_type(
                    type_name,
                    schema.format.as_deref(),
                    &schema.enum_values,
                    api_path,
                    field_path,
                );
                let desc = descriptor_from_schema(schema, &scalar);
                (TypeExpr::named(scalar), desc)
            } else {
                match type_name {
                    "object" => self.resolve_object(schema, api_path, field_path)?,
                    "array" => self.resolve_array(schema, api_path, field_path)?,
                    other => {
                        return Err(
                            ConvertError::UnsupportedType(other.to_string()).at_field(field_path)
                        )
                    }
                }
            }
        };

        if schema.is_nullable() {
            desc.nullable = true;
            return Ok((ty.into_nullable(), desc));
        }
        Ok((ty, desc))
    }

    /// Registers a top-level definition. Definitions that are not objects are
    /// left to be resolved at their use sites.
    pub fn convert_definition(&mut self, name: &str, schema: &Schema) -> ConvertResult<()> {
        if !schema.is_object_like() {
            return Ok(());
        }
        self.resolve_schema(schema, "", &[name.to_string()])?;
        Ok(())
    }

    fn resolve_reference(
        &mut self,
        reference: &str,
        api_path: &str,
        field_path: &[String],
    ) -> ConvertResult<(TypeExpr, TypeDescriptor)> {
        let document = self.document;
        let unresolved = || ConvertError::UnresolvedReference(reference.to_string()).at_field(field_path);
        let name = definition_name(reference).ok_or_else(unresolved)?;
        let target = document.definition(&name).ok_or_else(unresolved)?;

        if target.is_object_like() || self.resolving.contains(&name) {
            let type_name = to_pascal_case(&name);
            // a cycle through a non-object definition has no object entry to point at
            if !target.is_object_like() {
                self.registry
                    .ensure_scalar(&type_name, || ScalarType::new(TypeRepresentation::Json));
            }
            return Ok((TypeExpr::named(type_name), TypeDescriptor::of_type(name)));
        }

        self.resolving.insert(name.clone());
        let resolved = self.resolve_schema(target, api_path, &[name.clone()]);
        self.resolving.remove(&name);
        resolved
    }

    fn resolve_object(
        &mut self,
        schema: &Schema,
        api_path: &str,
        field_path: &[String],
    ) -> ConvertResult<(TypeExpr, TypeDescriptor)> {
        let type_name = join_pascal_case(field_path);
        let mut desc = descriptor_from_schema(schema, "object");

        // objects without properties are opaque JSON
        if schema.properties.is_empty() || type_name.is_empty() {
            let scalar = if type_name.is_empty() {
                JSON_SCALAR.to_string()
            } else {
                type_name
            };
            self.registry
                .replace_scalar(&scalar, ScalarType::new(TypeRepresentation::Json));
            return Ok((TypeExpr::named(scalar), desc));
        }

        let mut object = ObjectType {
            description: schema.description.clone(),
            ..Default::default()
        };
        for (prop_name, prop_schema) in &schema.properties {
            let nullable = !schema.required.contains(prop_name);
            let prop_path = extend_path(field_path, prop_name);
            let (prop_ty, mut prop_desc) =
                self.resolve_schema_ref(prop_schema, nullable, api_path, &prop_path)?;

            let description = prop_desc
                .description
                .clone()
                .or_else(|| prop_schema.description.clone());
            prop_desc.nullable = prop_ty.is_nullable();

            object.fields.insert(
                prop_name.clone(),
                ObjectField {
                    description,
                    field_type: prop_ty.encode(),
                },
            );
            desc.properties.insert(prop_name.clone(), prop_desc);
        }

        self.registry.insert_object(&type_name, object);
        Ok((TypeExpr::named(type_name), desc))
    }

    fn resolve_array(
        &mut self,
        schema: &Schema,
        api_path: &str,
        field_path: &[String],
    ) -> ConvertResult<(TypeExpr, TypeDescriptor)> {
        let items = schema
            .items
            .as_deref()
            .ok_or_else(|| ConvertError::MissingArrayItem.at_field(field_path))?;
        let (item_ty, item_desc) = self.resolve_schema_ref(items, false, api_path, field_path)?;

        let mut desc = descriptor_from_schema(schema, "array");
        desc.items = Some(Box::new(item_desc));
        Ok((TypeExpr::array(item_ty), desc))
    }
}

fn schema_title(schema: &Schema) -> Option<&str> {
    schema
        .title
        .as_deref()
        .filter(|t| !t.is_empty() && !t.contains(char::is_whitespace))
}

/// Copies the constraint facets of `schema` into a descriptor of `type_name`.
pub(crate) fn descriptor_from_schema(schema: &Schema, type_name: &str) -> TypeDescriptor {
    TypeDescriptor {
        type_name: type_name.to_string(),
        format: schema.format.clone(),
        pattern: schema.pattern.clone(),
        nullable: schema.is_nullable(),
        minimum: schema.minimum,
        maximum: schema.maximum,
        min_length: schema.min_length,
        max_length: schema.max_length,
        description: schema.description.clone(),
        items: None,
        properties: Default::default(),
    }
}
