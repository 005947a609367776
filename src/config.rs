//! Configuration module for the dryer simulator.
//!
//! This module provides environment-based configuration for the simulated
//! device, including the ingestion endpoint, the dryer ID, and the
//! transmission interval.

use std::env;
use std::time::Duration;

/// Default sensor data ingestion endpoint of the dryer platform
const DEFAULT_API_ENDPOINT: &str = "http://localhost:3000/api/sensor-data";

/// Default dryer identifier reported in every reading
const DEFAULT_DRYER_ID: &str = "DRY-001";

/// Default transmission interval in seconds (5 minutes)
const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Default HTTP request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default delay after an unexpected error, in seconds
const DEFAULT_RECOVERY_DELAY_SECS: u64 = 60;

const MIN_INTERVAL_SECS: u64 = 1;
const MAX_INTERVAL_SECS: u64 = 86_400;

const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

const MIN_RECOVERY_DELAY_SECS: u64 = 1;
const MAX_RECOVERY_DELAY_SECS: u64 = 3_600;

/// Configuration for the dryer simulator.
///
/// All settings can be configured via environment variables:
/// - `DRYER_SIM_API_ENDPOINT`: ingestion URL (default: http://localhost:3000/api/sensor-data)
/// - `DRYER_SIM_DRYER_ID`: dryer identifier (default: DRY-001)
/// - `DRYER_SIM_INTERVAL_SECS`: seconds between transmissions (default: 300)
/// - `DRYER_SIM_REQUEST_TIMEOUT_SECS`: HTTP request timeout (default: 10)
/// - `DRYER_SIM_RECOVERY_DELAY_SECS`: pause after an unexpected error (default: 60)
/// - `DRYER_SIM_ACTIVE_PRESET_ID`: optional drying preset attached to readings
#[derive(Debug, Clone)]
pub struct Config {
    /// Full URL of the sensor data endpoint
    pub api_endpoint: String,

    /// Identifier of the simulated dryer
    pub dryer_id: String,

    /// Time to wait between transmission cycles
    pub interval: Duration,

    /// HTTP request timeout duration
    pub request_timeout: Duration,

    /// Time to wait after an unexpected error before the next cycle
    pub recovery_delay: Duration,

    /// Drying preset reported as active, if any
    pub active_preset_id: Option<String>,
}

/// Error type for configuration loading failures
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
    pub env_var: Option<String>,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.env_var {
            Some(var) => write!(f, "Configuration error for {}: {}", var, self.message),
            None => write!(f, "Configuration error: {}", self.message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to the defaults of the field device script.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `DRYER_SIM_API_ENDPOINT` is not an http(s) URL
    /// - `DRYER_SIM_DRYER_ID` is blank
    /// - any of the `*_SECS` variables is not a number or is out of range
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dryer_simulator::config::Config;
    ///
    /// let config = Config::from_env().expect("Failed to load config");
    /// println!("Endpoint: {}", config.api_endpoint);
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_endpoint = Self::parse_endpoint()?;
        let dryer_id = Self::parse_dryer_id()?;

        let interval = Duration::from_secs(Self::parse_secs(
            "DRYER_SIM_INTERVAL_SECS",
            DEFAULT_INTERVAL_SECS,
            MIN_INTERVAL_SECS,
            MAX_INTERVAL_SECS,
        )?);

        let request_timeout = Duration::from_secs(Self::parse_secs(
            "DRYER_SIM_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
            MIN_REQUEST_TIMEOUT_SECS,
            MAX_REQUEST_TIMEOUT_SECS,
        )?);

        let recovery_delay = Duration::from_secs(Self::parse_secs(
            "DRYER_SIM_RECOVERY_DELAY_SECS",
            DEFAULT_RECOVERY_DELAY_SECS,
            MIN_RECOVERY_DELAY_SECS,
            MAX_RECOVERY_DELAY_SECS,
        )?);

        // Blank preset means "no preset"
        let active_preset_id = env::var("DRYER_SIM_ACTIVE_PRESET_ID")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            api_endpoint,
            dryer_id,
            interval,
            request_timeout,
            recovery_delay,
            active_preset_id,
        })
    }

    fn parse_endpoint() -> Result<String, ConfigError> {
        let env_var = "DRYER_SIM_API_ENDPOINT";

        let endpoint = match env::var(env_var) {
            Ok(value) => value.trim().to_string(),
            Err(_) => return Ok(DEFAULT_API_ENDPOINT.to_string()),
        };

        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError {
                message: format!("'{}' is not an http(s) URL", endpoint),
                env_var: Some(env_var.to_string()),
            });
        }

        Ok(endpoint)
    }

    fn parse_dryer_id() -> Result<String, ConfigError> {
        let env_var = "DRYER_SIM_DRYER_ID";

        match env::var(env_var) {
            Ok(value) => {
                let dryer_id = value.trim();
                if dryer_id.is_empty() {
                    return Err(ConfigError {
                        message: "dryer ID must not be empty".to_string(),
                        env_var: Some(env_var.to_string()),
                    });
                }
                Ok(dryer_id.to_string())
            }
            Err(_) => Ok(DEFAULT_DRYER_ID.to_string()),
        }
    }

    /// Parse a whole number of seconds from `env_var`, bounded by `min..=max`.
    fn parse_secs(env_var: &str, default: u64, min: u64, max: u64) -> Result<u64, ConfigError> {
        match env::var(env_var) {
            Ok(value) => {
                let secs: u64 = value.trim().parse().map_err(|_| ConfigError {
                    message: format!("'{}' is not a valid number", value),
                    env_var: Some(env_var.to_string()),
                })?;

                if secs < min {
                    return Err(ConfigError {
                        message: format!("{}s is below minimum ({}s)", secs, min),
                        env_var: Some(env_var.to_string()),
                    });
                }

                if secs > max {
                    return Err(ConfigError {
                        message: format!("{}s exceeds maximum ({}s)", secs, max),
                        env_var: Some(env_var.to_string()),
                    });
                }

                Ok(secs)
            }
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    /// Create a configuration from the built-in defaults.
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            dryer_id: DEFAULT_DRYER_ID.to_string(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            recovery_delay: Duration::from_secs(DEFAULT_RECOVERY_DELAY_SECS),
            active_preset_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, MutexGuard};

    // Environment variables are process-global; config tests take this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn lock_env() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    // Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        original: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                original,
            }
        }

        fn remove(key: &str) -> Self {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                original,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.original {
                Some(val) => env::set_var(&self.key, val),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn clear_all() -> Vec<EnvGuard> {
        [
            "DRYER_SIM_API_ENDPOINT",
            "DRYER_SIM_DRYER_ID",
            "DRYER_SIM_INTERVAL_SECS",
            "DRYER_SIM_REQUEST_TIMEOUT_SECS",
            "DRYER_SIM_RECOVERY_DELAY_SECS",
            "DRYER_SIM_ACTIVE_PRESET_ID",
        ]
        .iter()
        .map(|key| EnvGuard::remove(key))
        .collect()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_endpoint, "http://localhost:3000/api/sensor-data");
        assert_eq!(config.dryer_id, "DRY-001");
        assert_eq!(config.interval, Duration::from_secs(300));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.recovery_delay, Duration::from_secs(60));
        assert!(config.active_preset_id.is_none());
    }

    #[test]
    fn test_config_from_env_with_defaults() {
        let _lock = lock_env();
        let _guards = clear_all();

        let config = Config::from_env().expect("Should load with defaults");
        assert_eq!(config.api_endpoint, "http://localhost:3000/api/sensor-data");
        assert_eq!(config.dryer_id, "DRY-001");
        assert_eq!(config.interval, Duration::from_secs(300));
        assert!(config.active_preset_id.is_none());
    }

    #[test]
    fn test_config_from_env_custom_values() {
        let _lock = lock_env();
        let _guards = clear_all();
        let _g1 = EnvGuard::set("DRYER_SIM_API_ENDPOINT", "https://dryers.example.org/api/sensor-data");
        let _g2 = EnvGuard::set("DRYER_SIM_DRYER_ID", " DRY-2026-014 ");
        let _g3 = EnvGuard::set("DRYER_SIM_INTERVAL_SECS", "30");
        let _g4 = EnvGuard::set("DRYER_SIM_REQUEST_TIMEOUT_SECS", "5");
        let _g5 = EnvGuard::set("DRYER_SIM_RECOVERY_DELAY_SECS", "15");
        let _g6 = EnvGuard::set("DRYER_SIM_ACTIVE_PRESET_ID", "preset-maize");

        let config = Config::from_env().expect("Should load custom values");
        assert_eq!(config.api_endpoint, "https://dryers.example.org/api/sensor-data");
        assert_eq!(config.dryer_id, "DRY-2026-014");
        assert_eq!(config.interval, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.recovery_delay, Duration::from_secs(15));
        assert_eq!(config.active_preset_id.as_deref(), Some("preset-maize"));
    }

    #[test]
    fn test_blank_preset_is_ignored() {
        let _lock = lock_env();
        let _guards = clear_all();
        let _g = EnvGuard::set("DRYER_SIM_ACTIVE_PRESET_ID", "   ");

        let config = Config::from_env().expect("Should load");
        assert!(config.active_preset_id.is_none());
    }

    #[test]
    fn test_invalid_endpoint() {
        let _lock = lock_env();
        let _guards = clear_all();
        let _g = EnvGuard::set("DRYER_SIM_API_ENDPOINT", "localhost:3000/api/sensor-data");

        let err = Config::from_env().unwrap_err();
        assert!(err.message.contains("not an http(s) URL"));
        assert_eq!(err.env_var.as_deref(), Some("DRYER_SIM_API_ENDPOINT"));
    }

    #[test]
    fn test_empty_dryer_id() {
        let _lock = lock_env();
        let _guards = clear_all();
        let _g = EnvGuard::set("DRYER_SIM_DRYER_ID", "  ");

        let err = Config::from_env().unwrap_err();
        assert!(err.message.contains("must not be empty"));
    }

    #[test]
    fn test_invalid_interval() {
        let _lock = lock_env();
        let _guards = clear_all();
        let _g = EnvGuard::set("DRYER_SIM_INTERVAL_SECS", "five minutes");

        let err = Config::from_env().unwrap_err();
        assert!(err.message.contains("not a valid number"));
    }

    #[test]
    fn test_interval_below_min() {
        let _lock = lock_env();
        let _guards = clear_all();
        let _g = EnvGuard::set("DRYER_SIM_INTERVAL_SECS", "0");

        let err = Config::from_env().unwrap_err();
        assert!(err.message.contains("below minimum"));
    }

    #[test]
    fn test_request_timeout_exceeds_max() {
        let _lock = lock_env();
        let _guards = clear_all();
        let _g = EnvGuard::set("DRYER_SIM_REQUEST_TIMEOUT_SECS", "999");

        let err = Config::from_env().unwrap_err();
        assert!(err.message.contains("exceeds maximum"));
        assert_eq!(err.env_var.as_deref(), Some("DRYER_SIM_REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError {
            message: "test error".to_string(),
            env_var: Some("TEST_VAR".to_string()),
        };
        assert_eq!(
            format!("{}", error),
            "Configuration error for TEST_VAR: test error"
        );

        let error_no_var = ConfigError {
            message: "general error".to_string(),
            env_var: None,
        };
        assert_eq!(
            format!("{}", error_no_var),
            "Configuration error: general error"
        );
    }
}
