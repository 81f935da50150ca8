#![deny(missing_docs)]

//! # Operation Builder
//!
//! Turns the operations of a path item into functions (GET) and procedures
//! (POST, PUT, PATCH, DELETE).

use crate::error::ConvertResult;
use crate::oas::document::{Operation, Parameter, PathItem, RefOr};
use crate::oas::resolver::{merge_parameters, SchemaResolver};
use crate::oas::routes::naming::build_operation_name;
use crate::oas::security::convert_security_requirements;
use crate::schema::rest::{CONTENT_TYPE_FORM_URLENCODED, CONTENT_TYPE_JSON, CONTENT_TYPE_MULTIPART};
use crate::schema::{HttpMethod, OperationInfo, Request};
use tracing::debug;

/// Field path segment naming synthesized result types.
const RESULT_SEGMENT: &str = "Result";

/// Operations converted from one path item.
#[derive(Debug, Clone, Default)]
pub struct PathOperations {
    /// Converted GET operations.
    pub functions: Vec<OperationInfo>,
    /// Converted mutating operations, in POST, PUT, PATCH, DELETE order.
    pub procedures: Vec<OperationInfo>,
}

impl SchemaResolver<'_> {
    /// Converts every supported operation of a path item.
    ///
    /// Operations without any declared response are skipped. Errors carry the
    /// API path.
    pub fn convert_path_item(
        &mut self,
        api_path: &str,
        item: &PathItem,
    ) -> ConvertResult<PathOperations> {
        let mut out = PathOperations::default();

        if let Some(op) = &item.get {
            let function = self
                .convert_operation(api_path, HttpMethod::Get, op, &item.parameters)
                .map_err(|e| e.at_api_path(api_path))?;
            out.functions.extend(function);
        }

        let procedures = [
            (HttpMethod::Post, &item.post),
            (HttpMethod::Put, &item.put),
            (HttpMethod::Patch, &item.patch),
            (HttpMethod::Delete, &item.delete),
        ];
        for (method, op) in procedures {
            let Some(op) = op else { continue };
            let procedure = self
                .convert_operation(api_path, method, op, &item.parameters)
                .map_err(|e| e.at_api_path(api_path))?;
            out.procedures.extend(procedure);
        }

        Ok(out)
    }

    /// Converts a single operation, or returns `None` when it has no
    /// response to map.
    pub fn convert_operation(
        &mut self,
        api_path: &str,
        method: HttpMethod,
        op: &Operation,
        shared_params: &[RefOr<Parameter>],
    ) -> ConvertResult<Option<OperationInfo>> {
        let name = match op.operation_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => build_operation_name(api_path, method, self.options()),
        };

        let result_path = vec![name.clone(), RESULT_SEGMENT.to_string()];
        let Some(result_type) = self.resolve_response(op.responses.as_ref(), api_path, &result_path)?
        else {
            debug!(operation = %name, %method, path = api_path, "skipping operation without responses");
            return Ok(None);
        };

        let document = self.document();
        let params = merge_parameters(document, shared_params, &op.parameters)?;
        let mut converted = self.convert_parameters(&params, api_path, &[name.clone()])?;

        if method != HttpMethod::Get {
            if let Some(body) = converted.request_body.as_mut() {
                let consumes = op.consumes.as_deref().unwrap_or(document.consumes.as_slice());
                body.content_type = select_content_type(consumes, &body.content_type);
            }
        }

        let description = [&op.summary, &op.description]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .cloned();

        debug!(
            operation = %name,
            %method,
            path = api_path,
            arguments = converted.arguments.len(),
            "converted operation"
        );

        Ok(Some(OperationInfo {
            name,
            description,
            arguments: converted.arguments,
            result_type: result_type.encode(),
            request: Request {
                url: api_path.to_string(),
                method,
                parameters: converted.parameters,
                request_body: converted.request_body,
                security: convert_security_requirements(op.security.as_deref()),
            },
        }))
    }
}

/// Settles a request body content type against the declared `consumes` list.
///
/// JSON bodies keep `application/json` when it is listed and otherwise take
/// the first listed type. Form bodies take the first listed form type,
/// defaulting to multipart. An empty list keeps `current`.
pub fn select_content_type(consumes: &[String], current: &str) -> String {
    if consumes.is_empty() {
        return current.to_string();
    }
    if current == CONTENT_TYPE_MULTIPART {
        return consumes
            .iter()
            .find(|c| *c == CONTENT_TYPE_MULTIPART || *c == CONTENT_TYPE_FORM_URLENCODED)
            .map_or_else(|| CONTENT_TYPE_MULTIPART.to_string(), Clone::clone);
    }
    if consumes.iter().any(|c| c == CONTENT_TYPE_JSON) {
        return CONTENT_TYPE_JSON.to_string();
    }
    consumes[0].clone()
}
