#![deny(missing_docs)]

//! # Routes Module
//!
//! Entry point for converting the `paths` section into operations.
//! Path items are visited in declaration order.

pub mod builder;
pub mod naming;

use crate::error::ConvertResult;
use crate::oas::document::Paths;
use crate::oas::resolver::SchemaResolver;

pub use builder::{select_content_type, PathOperations};

/// Converts every path item, collecting functions and procedures in
/// document order. The first failing operation aborts the walk.
pub fn convert_paths(resolver: &mut SchemaResolver<'_>, paths: &Paths) -> ConvertResult<PathOperations> {
    let mut out = PathOperations::default();
    for (api_path, item) in &paths.items {
        let converted = resolver.convert_path_item(api_path, item)?;
        out.functions.extend(converted.functions);
        out.procedures.extend(converted.procedures);
    }
    Ok(out)
}
