#![deny(missing_docs)]

//! # Parameter Resolution
//!
//! Converts Swagger 2.0 operation parameters into operation arguments,
//! ordered request parameters and an optional request body.
//!
//! - `path`, `query` and `header` parameters keep their declaration order.
//! - A `body` parameter becomes the request body and the `body` argument.
//! - `formData` parameters are aggregated into one multipart object body.

use crate::error::{ConvertError, ConvertResult};
use crate::oas::document::{Parameter, ParameterItems, RefOr, SwaggerDocument};
use crate::oas::resolver::{extend_path, is_primitive_scalar, SchemaResolver};
use crate::schema::rest::{CONTENT_TYPE_JSON, CONTENT_TYPE_MULTIPART};
use crate::schema::{
    ArgumentInfo, ParameterLocation, RequestBody, RequestParameter, TypeDescriptor, TypeExpr,
};
use std::collections::BTreeMap;

/// Argument name given to a `body` parameter.
pub const BODY_ARGUMENT: &str = "body";

/// Output of converting an operation's parameter list.
#[derive(Debug, Clone, Default)]
pub struct ConvertedParameters {
    /// Operation arguments keyed by name. Later duplicates overwrite.
    pub arguments: BTreeMap<String, ArgumentInfo>,
    /// Non-body parameters in declaration order.
    pub parameters: Vec<RequestParameter>,
    /// Request body from a `body` parameter or the aggregated form fields.
    ///
    /// The content type is provisional; the operation mapper settles it
    /// against the declared `consumes` list.
    pub request_body: Option<RequestBody>,
}

/// Merges path-level parameters with an operation's own parameters.
///
/// Shared parameters come first. An operation parameter with the same name and
/// location replaces the shared one in place; new ones are appended.
pub fn merge_parameters<'a>(
    document: &'a SwaggerDocument,
    shared: &'a [RefOr<Parameter>],
    own: &'a [RefOr<Parameter>],
) -> ConvertResult<Vec<&'a Parameter>> {
    let mut merged: Vec<&Parameter> = shared
        .iter()
        .map(|p| document.resolve_parameter(p))
        .collect::<ConvertResult<_>>()?;

    for param in own {
        let param = document.resolve_parameter(param)?;
        match merged
            .iter()
            .position(|p| p.name == param.name && p.location == param.location)
        {
            Some(idx) => merged[idx] = param,
            None => merged.push(param),
        }
    }
    Ok(merged)
}

impl SchemaResolver<'_> {
    /// Converts a resolved parameter list.
    ///
    /// `field_path` is the naming prefix (usually the operation name) for
    /// types synthesized from parameter schemas.
    pub fn convert_parameters(
        &mut self,
        params: &[&Parameter],
        api_path: &str,
        field_path: &[String],
    ) -> ConvertResult<ConvertedParameters> {
        let mut out = ConvertedParameters::default();
        let mut form_data: Option<TypeDescriptor> = None;

        for param in params {
            if param.name.is_empty() {
                return Err(ConvertError::EmptyParameterName.at_field(field_path));
            }
            let location: ParameterLocation = param
                .location
                .parse()
                .map_err(|e: ConvertError| e.at_field(&extend_path(field_path, &param.name)))?;
            let param_path = match location {
                ParameterLocation::Body => field_path.to_vec(),
                _ => extend_path(field_path, &param.name),
            };
            let (ty, desc) = self.parameter_type(param, api_path, &param_path)?;

            match location {
                ParameterLocation::Body => {
                    out.arguments.insert(
                        BODY_ARGUMENT.to_string(),
                        ArgumentInfo {
                            description: param.description.clone(),
                            argument_type: ty.encode(),
                        },
                    );
                    out.request_body = Some(RequestBody {
                        content_type: CONTENT_TYPE_JSON.to_string(),
                        schema: desc,
                    });
                }
                ParameterLocation::FormData => {
                    form_data
                        .get_or_insert_with(|| TypeDescriptor::of_type("object"))
                        .properties
                        .insert(param.name.clone(), desc);
                    out.arguments.insert(
                        param.name.clone(),
                        ArgumentInfo {
                            description: param.description.clone(),
                            argument_type: ty.encode(),
                        },
                    );
                }
                _ => {
                    out.arguments.insert(
                        param.name.clone(),
                        ArgumentInfo {
                            description: param.description.clone(),
                            argument_type: ty.encode(),
                        },
                    );
                    out.parameters.push(RequestParameter {
                        name: param.name.clone(),
                        location,
                        schema: desc,
                    });
                }
            }
        }

        if let Some(schema) = form_data {
            out.request_body = Some(RequestBody {
                content_type: CONTENT_TYPE_MULTIPART.to_string(),
                schema,
            });
        }
        Ok(out)
    }

    /// Resolves one parameter's type. A parameter that is not required is
    /// nullable.
    fn parameter_type(
        &mut self,
        param: &Parameter,
        api_path: &str,
        field_path: &[String],
    ) -> ConvertResult<(TypeExpr, TypeDescriptor)> {
        let nullable = !param.required;

        if let Some(schema) = &param.schema {
            let (ty, mut desc) = self.resolve_schema_ref(schema, nullable, api_path, field_path)?;
            if desc.description.is_none() {
                desc.description = param.description.clone();
            }
            return Ok((ty, desc));
        }

        let type_name = match param.param_type.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ConvertError::EmptySchema.at_field(field_path)),
        };

        let (ty, mut desc) = match type_name {
            "array" => {
                let items = param
                    .items
                    .as_deref()
                    .ok_or_else(|| ConvertError::MissingArrayItem.at_field(field_path))?;
                let (item_ty, item_desc) = self.items_type(items, api_path, field_path)?;
                let mut desc = TypeDescriptor::of_type("array");
                desc.items = Some(Box::new(item_desc));
                (TypeExpr::array(item_ty), desc)
            }
            t if is_primitive_scalar(t) => {
                let scalar = self.scalar_from_type(
                    t,
                    param.format.as_deref(),
                    &param.enum_values,
                    api_path,
                    field_path,
                );
                let desc = TypeDescriptor::of_type(scalar.clone());
                (TypeExpr::named(scalar), desc)
            }
            other => {
                return Err(ConvertError::UnsupportedType(other.to_string()).at_field(field_path))
            }
        };

        desc.format = param.format.clone();
        desc.pattern = param.pattern.clone();
        desc.minimum = param.minimum;
        desc.maximum = param.maximum;
        desc.min_length = param.min_length;
        desc.max_length = param.max_length;
        desc.description = param.description.clone();

        if nullable {
            desc.nullable = true;
            return Ok((ty.into_nullable(), desc));
        }
        Ok((ty, desc))
    }

    /// Resolves the (possibly nested) item type of an array parameter.
    fn items_type(
        &mut self,
        items: &ParameterItems,
        api_path: &str,
        field_path: &[String],
    ) -> ConvertResult<(TypeExpr, TypeDescriptor)> {
        match items.item_type.as_deref() {
            None | Some("") => Err(ConvertError::MissingArrayItem.at_field(field_path)),
            Some("array") => {
                let nested = items
                    .items
                    .as_deref()
                    .ok_or_else(|| ConvertError::MissingArrayItem.at_field(field_path))?;
                let (item_ty, item_desc) = self.items_type(nested, api_path, field_path)?;
                let mut desc = TypeDescriptor::of_type("array");
                desc.items = Some(Box::new(item_desc));
                Ok((TypeExpr::array(item_ty), desc))
            }
            Some(t) if is_primitive_scalar(t) => {
                let scalar = self.scalar_from_type(
                    t,
                    items.format.as_deref(),
                    &items.enum_values,
                    api_path,
                    field_path,
                );
                let mut desc = TypeDescriptor::of_type(scalar.clone());
                desc.format = items.format.clone();
                Ok((TypeExpr::named(scalar), desc))
            }
            Some(other) => {
                Err(ConvertError::UnsupportedType(other.to_string()).at_field(field_path))
            }
        }
    }
}
