use anyhow::{Context, Result};
use log::info;

use corpuscrawl::HarvestConfig;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "harvest.json".to_string());
    let config = HarvestConfig::from_file(&config_path)
        .with_context(|| format!("could not load harvest configuration from {config_path}"))?;

    info!(
        "harvesting {} site(s) into {}",
        config.sites().len(),
        config.storage_dir().display()
    );

    let summary = corpuscrawl::harvest(config).await?;

    info!(
        "corpus ready: kept {} of {} pages ({} bytes)",
        summary.pages_kept, summary.pages_seen, summary.bytes_written
    );
    Ok(())
}
