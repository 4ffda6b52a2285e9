use dotenvy::dotenv;
use log::{error, info, warn};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::path::PathBuf;
use tokio::time::{self, MissedTickBehavior};

use coinatmradar::config::RadarConfig;
use coinatmradar::radar::RadarClient;
use coinatmradar::report::ReportInput;
use coinatmradar::settings::ScopedConfig;
use coinatmradar::snapshot::Snapshot;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();
    // Set logging levels if not already set
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "coinatmradar=debug");
    }

    // Initialize tracing with previously set logging levels
    tracing_subscriber::fmt::init();

    let config = RadarConfig::from_env()?;
    let snapshot_path = PathBuf::from(env::var("RADAR_SNAPSHOT_PATH")?);

    // Connect to Postgres
    let pg_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&env::var("DATABASE_URL")?)
        .await?;
    info!("Postgres pool initialized");

    let interval_period = config.interval;
    let client = RadarClient::new(config);
    info!(
        "Reporting to {} every {}s",
        client.config().url,
        interval_period.as_secs()
    );

    // Runs never overlap, a slow run delays the next tick
    let mut interval = time::interval(interval_period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;

        let input: ReportInput<ScopedConfig> = match Snapshot::load(&snapshot_path).await {
            Ok(snapshot) => snapshot.into(),
            Err(e) => {
                warn!("Skipping CoinATMRadar update: {}", e);
                continue;
            }
        };

        if let Err(e) = coinatmradar::update(&pg_pool, &client, &input).await {
            error!("CoinATMRadar update failed: {}", e);
        }
    }
}
