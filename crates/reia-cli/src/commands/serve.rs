//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reia_client::AnalysisClient;
use std::path::PathBuf;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to .reia/serve.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, client: AnalysisClient) -> Result<()> {
    println!();
    println!("  {} {}", "REIA".cyan().bold(), "Web UI".bold());
    println!();
    println!(
        "  {}   http://{}:{}",
        "Landing".green(),
        args.host,
        args.port
    );
    println!(
        "  {}    http://{}:{}/report",
        "Report".green(),
        args.host,
        args.port
    );
    println!("  {}  {}", "Analysis".green(), client.base_url());
    println!();

    if !client.health_check().await {
        println!(
            "  {} analysis service not reachable at {}",
            "⚠".yellow(),
            client.base_url()
        );
        println!();
    }

    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    reia_web::run_server(client, &args.host, args.port).await?;

    Ok(())
}
