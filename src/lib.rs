//! Dryer Simulator Library
//!
//! This library simulates a solar dryer controller that reports sensor
//! readings to the dryer platform over HTTP:
//!
//! - **config**: Environment-based configuration for the simulated device
//! - **reading**: Randomized sensor reading generation
//! - **client**: HTTP client posting one reading per call
//! - **driver**: The generate, send, sleep loop
//!
//! # Example
//!
//! ```no_run
//! use dryer_simulator::client::ReadingClient;
//! use dryer_simulator::config::Config;
//! use dryer_simulator::driver;
//! use dryer_simulator::reading::ReadingGenerator;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = Config::from_env().expect("Failed to load config");
//!     let generator = ReadingGenerator::new(&config.dryer_id);
//!     let client = ReadingClient::new(&config).expect("Failed to create client");
//!
//!     let shutdown = async {
//!         tokio::signal::ctrl_c().await.ok();
//!     };
//!     let summary = driver::run(&generator, &client, &config, shutdown).await;
//!     println!("Sent {} readings", summary.sent);
//! }
//! ```

pub mod client;
pub mod config;
pub mod driver;
pub mod reading;

pub use client::{ClientError, IngestResponse, ReadingClient};
pub use config::{Config, ConfigError};
pub use driver::{CycleOutcome, RunSummary};
pub use reading::{ChargingStatus, ReadingGenerator, SensorReading};
