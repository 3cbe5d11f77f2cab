//! folio CLI: run the relay, or talk to the persona from a terminal.
//!
//! Logging: set `RUST_LOG=folio=debug` (or `warn`, `info`) for logs on stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_core::Category;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - portfolio chat relay and fallback responder", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the profile JSON document
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP relay (POST /api/chat)
    Serve {
        /// Address to bind, e.g. 0.0.0.0:8080
        #[arg(long)]
        bind: Option<String>,
    },
    /// Answer one chat message
    Ask {
        message: String,
        /// Skip the remote provider and answer from the profile
        #[arg(long)]
        offline: bool,
        #[arg(long)]
        max_tokens: Option<u32>,
        #[arg(long)]
        temperature: Option<f32>,
    },
    /// Run one quick navigation action (me, projects, skills, fun, contact)
    Category {
        #[arg(value_parser = parse_category)]
        category: Category,
        /// Skip the remote provider and answer from the profile
        #[arg(long)]
        offline: bool,
        /// Seed for the randomized highlights
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the fallback topic for a message
    Classify { message: String },
}

fn parse_category(value: &str) -> Result<Category, String> {
    value
        .parse()
        .map_err(|_| format!("unknown category '{value}' (expected me, projects, skills, fun or contact)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let options = commands::GlobalOptions {
        config: cli.config,
        profile: cli.profile,
    };

    match cli.command {
        Commands::Serve { bind } => commands::serve::run(&options, bind).await?,
        Commands::Ask {
            message,
            offline,
            max_tokens,
            temperature,
        } => commands::ask::run(&options, &message, offline, max_tokens, temperature).await?,
        Commands::Category {
            category,
            offline,
            seed,
        } => commands::category::run(&options, category, offline, seed).await?,
        Commands::Classify { message } => commands::classify::run(&message),
    }

    Ok(())
}
