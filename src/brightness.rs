//! Time-of-day brightness scheduling.
//!
//! Brightness follows a symmetric day curve: pinned to the device's configured
//! floor outside the sunrise/sunset window, rising linearly to its maximum at
//! midday and descending linearly back to the floor by sunset. Midday is the
//! midpoint of the sunrise/sunset window, which does not have to be noon.

use chrono::{DateTime, Local, Timelike};

use crate::{config::Config, error::ConfigError};

/// Fractional hours since local midnight, in [0, 24).
pub fn fractional_hour(now: DateTime<Local>) -> f32 {
    now.hour() as f32 + now.minute() as f32 / 60.0
}

/// Piecewise-linear day curve anchored at sunrise, midday and sunset.
#[derive(Debug, Clone, Copy)]
pub struct DayCurve {
    sunrise: f32,
    sunset: f32,
}

impl DayCurve {
    pub fn new(sunrise: f32, sunset: f32) -> Result<Self, ConfigError> {
        for hour in [sunrise, sunset] {
            if !(0.0..24.0).contains(&hour) {
                return Err(ConfigError::HourOutOfRange { hour });
            }
        }
        if sunrise >= sunset {
            return Err(ConfigError::InvertedDayWindow { sunrise, sunset });
        }
        Ok(Self { sunrise, sunset })
    }

    /// Day ratio in [0, 1]: 0 at or outside sunrise/sunset, 1 at midday.
    pub fn ratio_at(&self, hour: f32) -> f32 {
        if hour <= self.sunrise || hour >= self.sunset {
            return 0.0;
        }
        let midday = (self.sunrise + self.sunset) / 2.0;
        if hour < midday {
            (hour - self.sunrise) / (midday - self.sunrise)
        } else {
            1.0 - (hour - midday) / (self.sunset - midday)
        }
    }
}

/// Per-device brightness bounds.
///
/// At night the level rests at `min`, the device's floor, rather than going
/// fully dark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessRange {
    pub min: f32,
    pub max: f32,
}

impl BrightnessRange {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedBrightnessRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Maps a day ratio onto this range.
    pub fn level_at(&self, ratio: f32) -> f32 {
        self.min + ratio.clamp(0.0, 1.0) * (self.max - self.min)
    }
}

/// Selects the brightness range for exactly one device.
///
/// Setting both or neither selector is rejected as an invalid configuration.
pub fn device_range(config: &Config, cooler: bool, aura: bool) -> Result<BrightnessRange, ConfigError> {
    match (cooler, aura) {
        (true, false) => Ok(config.cooler_brightness),
        (false, true) => Ok(config.aura_brightness),
        _ => Err(ConfigError::AmbiguousDeviceSelection),
    }
}
