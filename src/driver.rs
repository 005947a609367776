//! Transmission loop for the simulated dryer.
//!
//! One cycle generates a reading, posts it, and logs the outcome. Cycles
//! repeat until the shutdown future resolves. Shutdown is only observed
//! before the first cycle and while waiting between cycles, so a started
//! POST always runs to completion.

use std::future::Future;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::client::{ClientError, IngestResponse, ReadingClient};
use crate::config::Config;
use crate::reading::ReadingGenerator;

/// Result of a single transmission cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Server accepted the reading
    Sent(IngestResponse),

    /// Non-201 response or network failure
    TransmissionFailed(ClientError),

    /// Anything else that went wrong during the cycle
    Unexpected(ClientError),
}

impl CycleOutcome {
    /// Delay before the next cycle for this outcome.
    pub fn next_delay(&self, config: &Config) -> Duration {
        match self {
            CycleOutcome::Sent(_) | CycleOutcome::TransmissionFailed(_) => config.interval,
            CycleOutcome::Unexpected(_) => config.recovery_delay,
        }
    }
}

/// Counters for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles started (and completed)
    pub cycles: u64,

    /// Readings accepted by the server
    pub sent: u64,

    /// Cycles that ended in a transmission failure
    pub transmission_failures: u64,

    /// Cycles that ended in an unexpected error
    pub unexpected_errors: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::Sent(_) => self.sent += 1,
            CycleOutcome::TransmissionFailed(_) => self.transmission_failures += 1,
            CycleOutcome::Unexpected(_) => self.unexpected_errors += 1,
        }
    }
}

/// Generate one reading, post it, and log what happened.
pub async fn run_cycle(generator: &ReadingGenerator, client: &ReadingClient) -> CycleOutcome {
    let reading = generator.generate();

    match client.send_reading(&reading).await {
        Ok(response) => {
            info!(
                timestamp = %response.timestamp,
                reading_id = %response.reading_id,
                "Data sent successfully"
            );
            info!(
                chamber_temp = reading.chamber_temp,
                battery_level = reading.battery_level,
                fan = reading.fan_state_label(),
                charging_status = %reading.charging_status,
                "Reading summary"
            );
            CycleOutcome::Sent(response)
        }
        Err(e) if e.is_transmission_failure() => {
            warn!(error = %e, "Transmission failed");
            CycleOutcome::TransmissionFailed(e)
        }
        Err(e) => {
            error!(error = %e, "Unexpected error");
            CycleOutcome::Unexpected(e)
        }
    }
}

/// Run transmission cycles until `shutdown` resolves.
///
/// Failures never stop the loop: a transmission failure waits the normal
/// interval, an unexpected error waits `config.recovery_delay`.
///
/// `shutdown` is polled once before the first cycle, so lazily registered
/// listeners such as `tokio::signal::ctrl_c()` are armed before any POST
/// starts. A shutdown that is already complete at that point ends the run
/// without sending anything.
pub async fn run<F>(
    generator: &ReadingGenerator,
    client: &ReadingClient,
    config: &Config,
    shutdown: F,
) -> RunSummary
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut summary = RunSummary::default();

    let stopped_before_start = tokio::select! {
        biased;
        _ = &mut shutdown => true,
        _ = std::future::ready(()) => false,
    };
    if stopped_before_start {
        info!("Transmission stopped by user");
        return summary;
    }

    loop {
        let outcome = run_cycle(generator, client).await;
        summary.record(&outcome);

        let delay = outcome.next_delay(config);
        info!(delay_secs = delay.as_secs_f64(), "Next transmission scheduled");

        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Transmission stopped by user");
                break;
            }
            _ = tokio::time::sleep(delay) => {}
        }
    }

    summary
}
