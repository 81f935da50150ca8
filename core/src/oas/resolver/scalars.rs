#![deny(missing_docs)]

//! # Scalar Classification
//!
//! Maps primitive OpenAPI type/format pairs onto named scalars, registering
//! each scalar the first time its name is derived.

use crate::oas::resolver::SchemaResolver;
use crate::oas::routes::naming::{join_pascal_case, sanitize_api_path};
use crate::schema::types::JSON_SCALAR;
use crate::schema::{ScalarType, TypeRepresentation};
use serde_json::Value as JsonValue;

/// Whether `type_name` is a primitive that maps onto a scalar.
pub fn is_primitive_scalar(type_name: &str) -> bool {
    matches!(
        type_name,
        "boolean" | "integer" | "number" | "string" | "file"
    )
}

impl SchemaResolver<'_> {
    /// Derives the scalar name for a primitive and registers it if new.
    ///
    /// The name depends on the type, format and enum values; string enums
    /// additionally take their name from the field path, or from the API path
    /// when the field path is empty. Two nodes deriving the same name share
    /// one registry entry even if their enum values differ.
    pub fn scalar_from_type(
        &mut self,
        type_name: &str,
        format: Option<&str>,
        enum_values: &[JsonValue],
        api_path: &str,
        field_path: &[String],
    ) -> String {
        let (name, representation) = match (type_name, format.unwrap_or_default()) {
            ("boolean", _) => ("Boolean".to_string(), TypeRepresentation::Boolean),
            ("integer", "int32") => ("Int32".to_string(), TypeRepresentation::Int32),
            ("integer", _) => ("Int64".to_string(), TypeRepresentation::Int64),
            ("number", "float") => ("Float32".to_string(), TypeRepresentation::Float32),
            ("number", _) => ("Float64".to_string(), TypeRepresentation::Float64),
            ("string", _) if !enum_values.is_empty() => {
                let context = self.enum_context(api_path, field_path);
                (
                    format!("{}Enum", context),
                    TypeRepresentation::Enum {
                        one_of: enum_strings(enum_values),
                    },
                )
            }
            ("string", "date") => ("Date".to_string(), TypeRepresentation::Date),
            ("string", "date-time") => ("TimestampTZ".to_string(), TypeRepresentation::TimestampTZ),
            ("string", "uuid") => ("UUID".to_string(), TypeRepresentation::Uuid),
            ("string", "byte") => ("Bytes".to_string(), TypeRepresentation::Bytes),
            ("string", "binary") | ("file", _) => ("Binary".to_string(), TypeRepresentation::Bytes),
            ("string", _) => ("String".to_string(), TypeRepresentation::String),
            _ => (JSON_SCALAR.to_string(), TypeRepresentation::Json),
        };

        self.registry
            .ensure_scalar(&name, || ScalarType::new(representation));
        name
    }

    fn enum_context(&self, api_path: &str, field_path: &[String]) -> String {
        let from_fields = join_pascal_case(field_path);
        if !from_fields.is_empty() {
            return from_fields;
        }
        let from_path = sanitize_api_path(self.options.trim_path_prefix(api_path));
        if !from_path.is_empty() {
            return from_path;
        }
        "String".to_string()
    }
}

fn enum_strings(values: &[JsonValue]) -> Vec<String> {
    values
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| match v {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::document::SwaggerDocument;
    use crate::options::ConvertOptions;
    use serde_json::json;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_primitive_mapping() {
        let doc = SwaggerDocument::default();
        let options = ConvertOptions::default();
        let mut resolver = SchemaResolver::new(&doc, &options);

        let cases = [
            ("boolean", None, "Boolean"),
            ("integer", Some("int32"), "Int32"),
            ("integer", Some("int64"), "Int64"),
            ("integer", None, "Int64"),
            ("number", Some("float"), "Float32"),
            ("number", Some("double"), "Float64"),
            ("string", None, "String"),
            ("string", Some("date"), "Date"),
            ("string", Some("date-time"), "TimestampTZ"),
            ("string", Some("uuid"), "UUID"),
            ("string", Some("byte"), "Bytes"),
            ("string", Some("binary"), "Binary"),
            ("file", None, "Binary"),
        ];
        for (ty, format, expected) in cases {
            assert_eq!(
                resolver.scalar_from_type(ty, format, &[], "/pets", &[]),
                expected,
                "{} / {:?}",
                ty,
                format
            );
        }
        assert_eq!(resolver.registry().scalar_count(), 11);
    }

    #[test]
    fn test_same_inputs_derive_one_scalar() {
        let doc = SwaggerDocument::default();
        let options = ConvertOptions::default();
        let mut resolver = SchemaResolver::new(&doc, &options);
        let values = [json!("available"), json!("sold")];
        let field_path = path(&["findPets", "status"]);

        let first = resolver.scalar_from_type("string", None, &values, "/pets", &field_path);
        let second = resolver.scalar_from_type("string", None, &values, "/pets", &field_path);

        assert_eq!(first, "FindPetsStatusEnum");
        assert_eq!(first, second);
        assert_eq!(resolver.registry().scalar_count(), 1);
        assert_eq!(
            resolver
                .registry()
                .scalar_type(&first)
                .unwrap()
                .representation,
            Some(TypeRepresentation::Enum {
                one_of: vec!["available".into(), "sold".into()]
            })
        );
    }

    #[test]
    fn test_enum_name_collapses_by_name() {
        let doc = SwaggerDocument::default();
        let options = ConvertOptions::default();
        let mut resolver = SchemaResolver::new(&doc, &options);
        let field_path = path(&["Pet", "status"]);

        resolver.scalar_from_type("string", None, &[json!("a")], "", &field_path);
        resolver.scalar_from_type("string", None, &[json!("b"), json!(1)], "", &field_path);

        let scalar = resolver.registry().scalar_type("PetStatusEnum").unwrap();
        assert_eq!(
            scalar.representation,
            Some(TypeRepresentation::Enum {
                one_of: vec!["a".into()]
            })
        );
    }

    #[test]
    fn test_enum_falls_back_to_api_path() {
        let doc = SwaggerDocument::default();
        let options = ConvertOptions {
            trim_prefix: "/v1".into(),
            ..Default::default()
        };
        let mut resolver = SchemaResolver::new(&doc, &options);

        let name = resolver.scalar_from_type("string", None, &[json!("x")], "/v1/pets/{id}", &[]);
        assert_eq!(name, "PetsIdEnum");

        let name = resolver.scalar_from_type("string", None, &[json!("x")], "", &[]);
        assert_eq!(name, "StringEnum");
    }
}
