//! Dryer Simulator - simulated solar dryer controller
//!
//! Generates randomized sensor readings and posts them to the dryer
//! platform's sensor data endpoint on a fixed interval.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `DRYER_SIM_API_ENDPOINT`: Sensor data URL (default: http://localhost:3000/api/sensor-data)
//! - `DRYER_SIM_DRYER_ID`: Dryer identifier (default: DRY-001)
//! - `DRYER_SIM_INTERVAL_SECS`: Seconds between transmissions (default: 300)
//! - `DRYER_SIM_REQUEST_TIMEOUT_SECS`: HTTP request timeout (default: 10)
//! - `DRYER_SIM_RECOVERY_DELAY_SECS`: Pause after an unexpected error (default: 60)
//! - `DRYER_SIM_ACTIVE_PRESET_ID`: Optional active drying preset
//! - `RUST_LOG`: Logging level filter (default: info)

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dryer_simulator::client::ReadingClient;
use dryer_simulator::config::Config;
use dryer_simulator::driver;
use dryer_simulator::reading::ReadingGenerator;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let client = match ReadingClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to create HTTP client");
            std::process::exit(1);
        }
    };

    let generator = ReadingGenerator::new(&config.dryer_id)
        .with_active_preset(config.active_preset_id.clone());

    info!(
        dryer_id = %generator.dryer_id(),
        endpoint = %client.endpoint(),
        interval_secs = config.interval.as_secs(),
        "IoT sensor data transmission started"
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            // Without a signal handler the loop can only end with the process
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    };

    let summary = driver::run(&generator, &client, &config, shutdown).await;

    info!(
        cycles = summary.cycles,
        sent = summary.sent,
        transmission_failures = summary.transmission_failures,
        unexpected_errors = summary.unexpected_errors,
        "Dryer simulator stopped"
    );
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}
