use anyhow::Context;
use botlists_engine::{export_profiles, Aggregator, EngineConfig, ExportOptions};
use botlists_logging::{bot_error, bot_info};
use chrono::Utc;

use super::logging::{self, LogDestination};

/// Runs one aggregation batch and exports the profiles to the output directory.
pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::Both, botlists_logging::level_from_env());

    let config = EngineConfig::from_env().context("loading configuration")?;
    bot_info!(
        "Aggregating {} lists, cache at {:?}",
        config.lists.len(),
        config.cache_dir
    );

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let aggregator = Aggregator::from_config(&config).context("setting up aggregator")?;

    let profiles = match runtime.block_on(aggregator.aggregate()) {
        Ok(profiles) => profiles,
        Err(err) => {
            bot_error!("Aggregation failed: {}", err);
            return Err(err).context("aggregating bot lists");
        }
    };

    let summary = export_profiles(
        &config.output_dir,
        &profiles,
        aggregator.lists().len(),
        &Utc::now().to_rfc3339(),
        ExportOptions::default(),
    )
    .context("exporting profiles")?;

    bot_info!(
        "Wrote {} profiles to {:?}",
        summary.profile_count,
        summary.output_path
    );
    println!("{}", summary.output_path.display());
    Ok(())
}
