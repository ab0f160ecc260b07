use dotenvy::dotenv;
use std::env;
use stock_buddy::{
    bot,
    config::{database, stock},
    core::{location, scenario},
    errors::{Error, Result},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load locations and the scenario table
    let config = stock::load_default_config()
        .inspect_err(|e| error!("Failed to load stock configuration: {}", e))?;
    info!(
        "Loaded {} locations and {} scenarios from configuration",
        config.locations.len(),
        config.scenarios.len()
    );

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Seed reference data (idempotent)
    location::seed_locations(&db, &config.locations).await?;
    scenario::seed_scenarios(&db, &config.scenarios).await?;

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, db).await
}
