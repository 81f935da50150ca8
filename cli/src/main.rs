#![deny(missing_docs)]

//! # REST Schema CLI
//!
//! Command Line Interface converting OpenAPI v2 documents into REST
//! connector schemas.
//!
//! Supported Commands:
//! - `convert`: Swagger 2.0 JSON/YAML -> REST schema JSON/YAML.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

mod convert;
mod error;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "rest_schema=info";

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI v2 to REST schema converter")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an OpenAPI v2 document into a REST schema.
    Convert(convert::ConvertArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Convert(args) => convert::execute(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
