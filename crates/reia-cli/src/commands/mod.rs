//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use reia_client::{AnalysisClient, DEFAULT_BASE_URL};

pub mod analyze;
pub mod health;
pub mod serve;

/// Real-Estate Investment Analyzer
#[derive(Parser)]
#[command(name = "reia")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the analysis service
    #[arg(long, global = true, env = "REIA_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web UI
    Serve(serve::ServeArgs),

    /// Analyze a listing from the terminal
    Analyze(analyze::AnalyzeArgs),

    /// Check that the analysis service is reachable
    Health,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let client = AnalysisClient::new(&self.api_url);

        match self.command {
            Commands::Serve(args) => serve::execute(args, client).await,
            Commands::Analyze(args) => analyze::execute(args, client).await,
            Commands::Health => health::execute(client).await,
        }
    }
}
