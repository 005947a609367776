//! Reading generator module for simulating solar dryer sensors.
//!
//! This module produces randomized sensor readings in the shape accepted by
//! the dryer platform's sensor data endpoint. Every field is sampled
//! independently from a fixed closed range.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Chamber temperature range (°C)
pub const CHAMBER_TEMP_RANGE: RangeInclusive<f64> = 35.0..=65.0;

/// Ambient temperature range (°C)
pub const AMBIENT_TEMP_RANGE: RangeInclusive<f64> = 20.0..=35.0;

/// Heater element temperature range (°C)
pub const HEATER_TEMP_RANGE: RangeInclusive<f64> = 50.0..=80.0;

/// Internal chamber humidity range (%)
pub const INTERNAL_HUMIDITY_RANGE: RangeInclusive<f64> = 20.0..=60.0;

/// External humidity range (%)
pub const EXTERNAL_HUMIDITY_RANGE: RangeInclusive<f64> = 40.0..=80.0;

/// Fan speed range (RPM)
pub const FAN_SPEED_RPM_RANGE: RangeInclusive<u32> = 800..=1500;

/// Fan duty range (%)
pub const FAN_SPEED_PERCENTAGE_RANGE: RangeInclusive<f64> = 60.0..=100.0;

/// Solar panel voltage range (V)
pub const SOLAR_VOLTAGE_RANGE: RangeInclusive<f64> = 16.0..=20.0;

/// Battery charge range (%)
pub const BATTERY_LEVEL_RANGE: RangeInclusive<u8> = 60..=100;

/// Battery voltage range (V)
pub const BATTERY_VOLTAGE_RANGE: RangeInclusive<f64> = 11.5..=13.2;

/// Power draw range (W)
pub const POWER_CONSUMPTION_RANGE: RangeInclusive<f64> = 100.0..=250.0;

/// Data quality score range
pub const DATA_QUALITY_RANGE: RangeInclusive<f64> = 0.85..=1.0;

/// Battery charging state reported by the charge controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargingStatus {
    Charging,
    Discharging,
    Full,
}

impl ChargingStatus {
    /// Get all charging states.
    pub fn all() -> &'static [ChargingStatus] {
        &[
            ChargingStatus::Charging,
            ChargingStatus::Discharging,
            ChargingStatus::Full,
        ]
    }
}

impl std::fmt::Display for ChargingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChargingStatus::Charging => write!(f, "charging"),
            ChargingStatus::Discharging => write!(f, "discharging"),
            ChargingStatus::Full => write!(f, "full"),
        }
    }
}

/// One snapshot of dryer sensor values.
///
/// Field names match the JSON payload accepted by `POST /api/sensor-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Identifier of the dryer sending the reading
    pub dryer_id: String,

    /// Time the reading was taken (serialized as RFC 3339 with a `Z` suffix)
    pub timestamp: DateTime<Utc>,

    // Temperature sensors (°C)
    pub chamber_temp: f64,
    pub ambient_temp: f64,
    pub heater_temp: f64,

    // Humidity sensors (%)
    pub internal_humidity: f64,
    pub external_humidity: f64,

    // Fan
    pub fan_speed_rpm: u32,
    pub fan_speed_percentage: f64,
    pub fan_status: bool,

    // Operational status
    pub heater_status: bool,
    pub door_status: bool,

    // Power metrics
    pub solar_voltage: f64,
    pub battery_level: u8,
    pub battery_voltage: f64,
    pub power_consumption_w: f64,
    pub charging_status: ChargingStatus,

    /// Drying preset currently running on the dryer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_preset_id: Option<String>,

    /// Confidence in the reading, 0.0 - 1.0
    pub data_quality_score: f64,
}

impl SensorReading {
    /// Fan status the way the device console shows it.
    pub fn fan_state_label(&self) -> &'static str {
        if self.fan_status {
            "ON"
        } else {
            "OFF"
        }
    }
}

/// Generator for simulated dryer readings.
#[derive(Debug, Clone)]
pub struct ReadingGenerator {
    dryer_id: String,
    active_preset_id: Option<String>,
}

impl ReadingGenerator {
    /// Create a generator for the given dryer.
    pub fn new(dryer_id: impl Into<String>) -> Self {
        Self {
            dryer_id: dryer_id.into(),
            active_preset_id: None,
        }
    }

    /// Attach an active preset ID to every generated reading.
    pub fn with_active_preset(mut self, preset_id: Option<String>) -> Self {
        self.active_preset_id = preset_id;
        self
    }

    /// Identifier of the simulated dryer.
    pub fn dryer_id(&self) -> &str {
        &self.dryer_id
    }

    /// Generate a reading using the thread-local RNG.
    pub fn generate(&self) -> SensorReading {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generate a reading from the supplied RNG, timestamped now.
    pub fn generate_with(&self, rng: &mut impl Rng) -> SensorReading {
        let statuses = ChargingStatus::all();

        SensorReading {
            dryer_id: self.dryer_id.clone(),
            timestamp: Utc::now(),

            chamber_temp: sample(rng, CHAMBER_TEMP_RANGE),
            ambient_temp: sample(rng, AMBIENT_TEMP_RANGE),
            heater_temp: sample(rng, HEATER_TEMP_RANGE),

            internal_humidity: sample(rng, INTERNAL_HUMIDITY_RANGE),
            external_humidity: sample(rng, EXTERNAL_HUMIDITY_RANGE),

            fan_speed_rpm: rng.gen_range(FAN_SPEED_RPM_RANGE),
            fan_speed_percentage: sample(rng, FAN_SPEED_PERCENTAGE_RANGE),
            fan_status: rng.gen_bool(0.5),

            heater_status: rng.gen_bool(0.5),
            door_status: rng.gen_bool(0.5),

            solar_voltage: sample(rng, SOLAR_VOLTAGE_RANGE),
            battery_level: rng.gen_range(BATTERY_LEVEL_RANGE),
            battery_voltage: sample(rng, BATTERY_VOLTAGE_RANGE),
            power_consumption_w: sample(rng, POWER_CONSUMPTION_RANGE),
            charging_status: statuses[rng.gen_range(0..statuses.len())],

            active_preset_id: self.active_preset_id.clone(),
            data_quality_score: sample(rng, DATA_QUALITY_RANGE),
        }
    }
}

/// Uniform sample from `range`, rounded to two decimals.
///
/// Range bounds are themselves two-decimal values, so rounding never leaves
/// the range.
fn sample(rng: &mut impl Rng, range: RangeInclusive<f64>) -> f64 {
    round2(rng.gen_range(range))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
