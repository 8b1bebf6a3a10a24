//! Service health command.

use anyhow::Result;
use colored::Colorize;
use reia_client::AnalysisClient;

pub async fn execute(client: AnalysisClient) -> Result<()> {
    if client.health_check().await {
        println!(
            "{} analysis service reachable at {}",
            "✓".green(),
            client.base_url()
        );
    } else {
        println!(
            "{} analysis service not reachable at {}",
            "✗".red(),
            client.base_url()
        );
    }
    Ok(())
}
