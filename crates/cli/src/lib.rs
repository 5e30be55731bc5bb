mod formats;
mod negotiate;
mod resolve;

use clap::{Parser, Subcommand};
use geoformat_core::ServiceConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "geoformat",
    version,
    about = "Output format negotiation and layer reference resolution for feature services",
    long_about = "geoformat assembles the registry of feature output formats, derives the identifiers \
                  they are published under in capabilities documents, picks the encoder for a \
                  GetFeature request, and resolves layer references (names or legacy integer ids) \
                  within a workspace."
)]
pub struct Cli {
    /// Configuration file (defaults to ~/.geoformat/config.json when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also log to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered output formats
    Formats,
    /// Print every publishable output format identifier
    Identifiers,
    /// Print the ResultFormat fragment of a WFS 1.0 capabilities document
    Capabilities,
    /// Build the registry and report configuration diagnostics
    Check,
    /// Pick the encoder for an operation
    Negotiate {
        /// Operation kind
        #[arg(long, default_value = "GetFeature")]
        operation: String,
        /// results, hits or validate
        #[arg(long, default_value = "results")]
        result_type: geoformat_api::ResultType,
        /// Requested output format
        #[arg(long)]
        format: Option<String>,
        /// Extra parameters as KEY=VALUE (VALUE is parsed as JSON when possible)
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
    /// Resolve a layer reference to a qualified name
    Resolve {
        /// Catalog JSON file
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,
        #[arg(value_name = "WORKSPACE")]
        workspace: String,
        /// Layer name or legacy integer id
        #[arg(value_name = "REFERENCE")]
        reference: String,
    },
    /// List the layers and tables of a workspace with their current ids
    Layers {
        /// Catalog JSON file
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,
        #[arg(value_name = "WORKSPACE")]
        workspace: String,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _guard = geoformat_runtime::init_logging("cli", cli.verbose);

    let config = ServiceConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Formats => formats::list(&config),
        Commands::Identifiers => formats::identifiers(&config),
        Commands::Capabilities => formats::capabilities(&config),
        Commands::Check => formats::check(&config),
        Commands::Negotiate {
            operation,
            result_type,
            format,
            params,
        } => negotiate::run(&config, operation, result_type, format, params),
        Commands::Resolve {
            catalog,
            workspace,
            reference,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(resolve::run(&config, catalog, workspace, reference))
        }
        Commands::Layers { catalog, workspace } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(resolve::layers(&config, catalog, workspace))
        }
    }
}
