//! HTTP client module for sending sensor readings to the dryer platform.
//!
//! Each call performs exactly one POST. Retrying is left to the caller.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::reading::SensorReading;

/// Response from the sensor data endpoint on a successful insert.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestResponse {
    /// Whether the server stored the reading
    #[serde(default = "default_success")]
    pub success: bool,

    /// Server-assigned reading identifier
    pub reading_id: String,

    /// Timestamp the server stored for the reading
    pub timestamp: String,
}

fn default_success() -> bool {
    true
}

/// Errors that can occur while transmitting a reading.
#[derive(Debug)]
pub enum ClientError {
    /// HTTP request failed at the network level, or a 201 body was not JSON
    Request(reqwest::Error),

    /// Server answered with anything other than 201 Created
    Status {
        code: StatusCode,
        message: String,
    },

    /// A 201 response body was JSON but not a valid `IngestResponse`
    Parse(String),

    /// Request timeout
    Timeout,

    /// Client configuration error
    Config(String),
}

impl ClientError {
    /// Whether this is an expected transmission failure (non-201 status or
    /// network problem) rather than an unexpected error.
    pub fn is_transmission_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Request(_) | ClientError::Status { .. } | ClientError::Timeout
        )
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Request(e) => write!(f, "Connection error: {}", e),
            ClientError::Status { code, message } => {
                write!(f, "Server error ({}): {}", code.as_u16(), message)
            }
            ClientError::Parse(e) => write!(f, "Failed to parse response: {}", e),
            ClientError::Timeout => write!(f, "Request timed out"),
            ClientError::Config(e) => write!(f, "Client configuration error: {}", e),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Request(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Request(err)
        }
    }
}

/// HTTP client for posting sensor readings.
///
/// # Example
///
/// ```no_run
/// use dryer_simulator::client::ReadingClient;
/// use dryer_simulator::config::Config;
/// use dryer_simulator::reading::ReadingGenerator;
///
/// #[tokio::main]
/// async fn main() {
///     let config = Config::default();
///     let client = ReadingClient::new(&config).expect("Failed to create client");
///     let reading = ReadingGenerator::new(&config.dryer_id).generate();
///
///     match client.send_reading(&reading).await {
///         Ok(response) => println!("Reading ID: {}", response.reading_id),
///         Err(e) => eprintln!("Failed to send: {}", e),
///     }
/// }
/// ```
pub struct ReadingClient {
    /// The underlying HTTP client
    client: Client,

    /// URL of the sensor data endpoint
    endpoint: String,

    /// Request timeout duration
    timeout: Duration,
}

impl ReadingClient {
    /// Create a new client from the simulator configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Self::with_settings(config.api_endpoint.clone(), config.request_timeout)
    }

    /// Create a new client for an explicit endpoint and timeout.
    pub fn with_settings(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Post one reading to the endpoint.
    ///
    /// Succeeds only on `201 Created`; every other status is returned as
    /// `ClientError::Status` with the response body as message. A 201 body
    /// that is not JSON at all is a `ClientError::Request` (decode error),
    /// while JSON missing `reading_id` or `timestamp` is `ClientError::Parse`.
    pub async fn send_reading(&self, reading: &SensorReading) -> Result<IngestResponse, ClientError> {
        debug!(
            dryer_id = %reading.dryer_id,
            url = %self.endpoint,
            "Sending sensor reading"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(reading)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::CREATED {
            let body: serde_json::Value = response.json().await?;
            serde_json::from_value(body).map_err(|e| ClientError::Parse(e.to_string()))
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            Err(ClientError::Status {
                code: status,
                message,
            })
        }
    }

    /// Get the configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the request timeout duration.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
