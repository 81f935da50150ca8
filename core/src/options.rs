//! # Conversion Options
//!
//! Settings recognised by the converter. All fields default to empty, so an
//! options file only needs to name what it changes.

use crate::error::ConvertResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options consumed by [`crate::convert_openapi_v2`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Prefix for every synthesized environment variable name.
    pub env_prefix: String,
    /// Prefix stripped from API paths before they feed naming.
    pub trim_prefix: String,
    /// HTTP method (lowercase) to verb used in synthesized procedure names,
    /// e.g. `post` -> `create`.
    pub method_alias: BTreeMap<String, String>,
}

impl ConvertOptions {
    /// Loads options from a YAML or JSON string.
    pub fn from_yaml(content: &str) -> ConvertResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Strips the configured prefix from an API path.
    pub fn trim_path_prefix<'a>(&self, api_path: &'a str) -> &'a str {
        if self.trim_prefix.is_empty() {
            return api_path;
        }
        api_path
            .strip_prefix(self.trim_prefix.as_str())
            .unwrap_or(api_path)
    }

    /// Returns the verb used for `method` in synthesized operation names.
    pub fn method_verb<'a>(&'a self, method: &'a str) -> &'a str {
        self.method_alias
            .get(method)
            .map(String::as_str)
            .filter(|alias| !alias.is_empty())
            .unwrap_or(method)
    }
}
