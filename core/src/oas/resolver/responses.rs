#![deny(missing_docs)]

//! # Response Resolution
//!
//! Picks the representative success response of an operation and resolves
//! its schema into the operation result type.

use crate::error::ConvertResult;
use crate::oas::document::{RefOr, Response, Responses};
use crate::oas::resolver::SchemaResolver;
use crate::schema::types::BOOLEAN_SCALAR;
use crate::schema::{ScalarType, TypeExpr, TypeRepresentation};

/// Success codes in order of preference.
const SUCCESS_CODES: [&str; 3] = ["200", "201", "204"];

impl SchemaResolver<'_> {
    /// Resolves the result type of an operation.
    ///
    /// Returns `None` when the operation declares no responses at all, which
    /// drops the operation. A chosen response without a schema yields a
    /// nullable `Boolean`. A resolved payload is never nullable at the top
    /// level.
    pub fn resolve_response(
        &mut self,
        responses: Option<&Responses>,
        api_path: &str,
        field_path: &[String],
    ) -> ConvertResult<Option<TypeExpr>> {
        let Some(responses) = responses else {
            return Ok(None);
        };
        if responses.codes.is_empty() && responses.default.is_none() {
            return Ok(None);
        }

        let chosen: Option<&RefOr<Response>> = SUCCESS_CODES
            .iter()
            .find_map(|code| responses.codes.get(*code))
            .or(responses.default.as_ref());

        let document = self.document;
        let schema = match chosen {
            Some(response) => document.resolve_response(response)?.schema.as_ref(),
            None => None,
        };

        let Some(schema) = schema else {
            self.registry
                .ensure_scalar(BOOLEAN_SCALAR, || ScalarType::new(TypeRepresentation::Boolean));
            return Ok(Some(TypeExpr::named(BOOLEAN_SCALAR).into_nullable()));
        };

        let (ty, _) = self.resolve_schema_ref(schema, false, api_path, field_path)?;
        Ok(Some(ty.into_non_nullable()))
    }
}
