#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use rest_schema_core::ConvertError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Options file or document could not be loaded.
    #[display("{}", _0)]
    Core(ConvertError),

    /// The document conversion failed. One error per line.
    #[from(ignore)]
    #[display("{}", join_lines(_0))]
    Convert(Vec<ConvertError>),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

fn join_lines(errors: &[ConvertError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Core(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
