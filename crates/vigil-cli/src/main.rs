mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vigil",
    version,
    about = "Change-detection sensors for external data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sensor scheduler
    Run {
        /// Path to sensor definitions YAML file
        definitions: PathBuf,
        /// Evaluate every sensor once and exit
        #[arg(long)]
        once: bool,
    },
    /// Validate sensor definitions and the asset catalog
    Check {
        /// Path to sensor definitions YAML file
        definitions: PathBuf,
    },
    /// Print the asset graph built from the manifest
    Graph {
        /// Path to sensor definitions YAML file
        definitions: PathBuf,
        /// Emit the graph as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    match cli.command {
        Commands::Run { definitions, once } => commands::run::execute(&definitions, once).await,
        Commands::Check { definitions } => commands::check::execute(&definitions),
        Commands::Graph { definitions, json } => commands::graph::execute(&definitions, json),
    }
}
