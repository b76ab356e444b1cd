//! evtjson CLI: drive the JSON field extractor from the command line.
//!
//! Commands:
//! - `fields`  : Print the field descriptors advertised to the host
//! - `info`    : Show plugin metadata and the effective configuration
//! - `extract` : Extract one field from newline-delimited payloads

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "evtjson",
    about = "evtjson: JSON field extraction for event payloads",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Plugin config file (TOML)
    #[arg(short, long, global = true, env = "EVTJSON_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the supported fields as JSON
    Fields,

    /// Show plugin metadata and configuration
    Info,

    /// Extract a field from each payload line
    Extract {
        /// Field name, e.g. json.value or json.obj
        #[arg(short, long)]
        field: String,

        /// Field argument, e.g. a path like /proc/name
        #[arg(short, long)]
        arg: Option<String>,

        /// Read payloads from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the last parse error after each absent result
        #[arg(long)]
        explain: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Fields => commands::fields::run()?,
        Commands::Info => commands::info::run(&config)?,
        Commands::Extract {
            field,
            arg,
            input,
            explain,
        } => commands::extract::run(&config, &field, arg.as_deref(), input.as_deref(), explain)?,
    }

    Ok(())
}
