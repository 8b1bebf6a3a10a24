//! One-shot analysis command.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use reia_client::AnalysisClient;
use reia_core::error::validate_link;
use reia_core::Analysis;

use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Listing URL to analyze
    pub link: String,

    /// Print the raw JSON response instead of the formatted report
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: AnalyzeArgs, client: AnalysisClient) -> Result<()> {
    validate_link(&args.link)?;

    println!("{} Analyzing {}", "ℹ".blue().bold(), args.link.cyan());
    println!("{}", "This can take a few minutes.".dimmed());
    println!();

    let body = client.analyze(&args.link).await?;

    if args.json {
        println!("{}", body);
        return Ok(());
    }

    match Analysis::from_json(&body)? {
        Analysis::Failed { error } => {
            bail!(
                "analysis failed: {}",
                error.unwrap_or_else(|| "no detail provided".to_string())
            );
        }
        Analysis::Complete(report) => {
            output::print_report(&report);
            Ok(())
        }
    }
}
