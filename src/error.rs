//! Error taxonomy for the lighting controller.

use thiserror::Error;

/// Top-level controller errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The temperature sensor is missing or failed to read.
    ///
    /// A reading must exist before any color math runs; this is fatal to the
    /// sampling loop.
    #[error("temperature sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// A configuration constant is out of bounds or contradictory.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// An external zone command ran but exited non-zero.
    #[error("zone '{zone}' command exited with status {code:?}")]
    DeviceCommand { zone: String, code: Option<i32> },

    /// An external zone command could not be launched at all.
    #[error("zone '{zone}' command failed to launch: {source}")]
    DeviceSpawn {
        zone: String,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration validation failures.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("temperature range is empty (min {min} >= max {max})")]
    EmptyTemperatureRange { min: f32, max: f32 },

    #[error("sunrise hour {sunrise} must precede sunset hour {sunset}")]
    InvertedDayWindow { sunrise: f32, sunset: f32 },

    #[error("hour {hour} is outside [0, 24)")]
    HourOutOfRange { hour: f32 },

    #[error("brightness range is inverted (min {min} > max {max})")]
    InvertedBrightnessRange { min: f32, max: f32 },

    #[error("exactly one of the cooler/motherboard selectors must be set")]
    AmbiguousDeviceSelection,
}
