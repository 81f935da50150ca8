#![deny(missing_docs)]

//! # Convert Command
//!
//! Reads a Swagger 2.0 document, converts it and writes the REST schema as
//! JSON or YAML.

use crate::error::{CliError, CliResult};
use rest_schema_core::{convert_openapi_v2, ConvertOptions, RestSchema};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Serialization format of the generated schema.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the convert command.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the OpenAPI v2 document (JSON or YAML).
    #[clap(long, short)]
    pub file: PathBuf,

    /// Output path for the schema file.
    /// If not provided, prints JSON to stdout.
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Output format. Inferred from the output extension when omitted.
    #[clap(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// YAML or JSON file holding conversion options.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Prefix for synthesized environment variable names.
    #[clap(long, env = "REST_SCHEMA_ENV_PREFIX")]
    pub env_prefix: Option<String>,

    /// Prefix stripped from API paths before naming.
    #[clap(long, env = "REST_SCHEMA_TRIM_PREFIX")]
    pub trim_prefix: Option<String>,

    /// Verb used for a method in synthesized procedure names, e.g. `post=create`.
    #[clap(long, value_parser = parse_method_alias)]
    pub method_alias: Vec<(String, String)>,
}

fn parse_method_alias(s: &str) -> Result<(String, String), String> {
    let (method, verb) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid method alias '{}', expected method=verb", s))?;
    if method.is_empty() || verb.is_empty() {
        return Err(format!("invalid method alias '{}', expected method=verb", s));
    }
    Ok((method.to_lowercase(), verb.to_string()))
}

/// Executes the conversion.
pub fn execute(args: &ConvertArgs) -> CliResult<()> {
    let options = load_options(args)?;
    debug!(?options, "conversion options");

    let input = fs::read(&args.file)?;
    let schema = convert_openapi_v2(&input, &options).map_err(CliError::Convert)?;

    let format = output_format(args);
    let rendered = render(&schema, format)?;

    if let Some(out_path) = &args.output {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(out_path, rendered)?;
        info!(path = %out_path.display(), "schema written");
    } else {
        println!("{}", rendered);
    }
    Ok(())
}

/// Loads the options file, then applies command line overrides.
fn load_options(args: &ConvertArgs) -> CliResult<ConvertOptions> {
    let mut options = match &args.config {
        Some(path) => ConvertOptions::from_yaml(&fs::read_to_string(path)?)?,
        None => ConvertOptions::default(),
    };
    if let Some(prefix) = &args.env_prefix {
        options.env_prefix = prefix.clone();
    }
    if let Some(prefix) = &args.trim_prefix {
        options.trim_prefix = prefix.clone();
    }
    for (method, verb) in &args.method_alias {
        options.method_alias.insert(method.clone(), verb.clone());
    }
    Ok(options)
}

fn output_format(args: &ConvertArgs) -> OutputFormat {
    if let Some(format) = args.format {
        return format;
    }
    match args
        .output
        .as_deref()
        .and_then(Path::extension)
        .and_then(|e| e.to_str())
    {
        Some("yaml" | "yml") => OutputFormat::Yaml,
        _ => OutputFormat::Json,
    }
}

fn render(schema: &RestSchema, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(schema)
            .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e))),
        OutputFormat::Yaml => serde_yaml::to_string(schema)
            .map_err(|e| CliError::General(format!("YAML serialization failed: {}", e))),
    }
}
