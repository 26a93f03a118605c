//! Immutable runtime configuration.
//!
//! All tunables are fixed at process start; there is no config file and no
//! reload path. The defaults carry the reference deployment's constants and
//! everything is passed explicitly into the mappers so the color and
//! brightness math stays pure and independently testable.

use crate::{
    brightness::{BrightnessRange, DayCurve},
    color::{ColorRamp, Rgb},
    error::ConfigError,
};

/// Command template for one LED zone.
#[derive(Debug, Clone)]
pub struct ZoneCommandCfg {
    /// Zone name used in logs and errors.
    pub name: String,

    /// External control utility to invoke.
    pub program: String,

    /// Argv template; `{color}` is replaced with the 6-hex-digit color.
    pub args: Vec<String>,
}

/// Controller configuration, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    /// Temperature mapped to the cold endpoint color, in °C.
    pub temp_min: f32,

    /// Temperature mapped to the hot endpoint color, in °C.
    pub temp_max: f32,

    /// Ring color at and below `temp_min`.
    pub color_cold: Rgb,

    /// Ring color at and above `temp_max`.
    pub color_hot: Rgb,

    /// Fixed color for the cooler's logo zone.
    pub logo_color: Rgb,

    /// Fixed color for the motherboard zone.
    pub aura_color: Rgb,

    /// Sunrise anchor in fractional hours.
    pub sunrise: f32,

    /// Sunset anchor in fractional hours.
    pub sunset: f32,

    /// Brightness bounds for the cooler zones.
    pub cooler_brightness: BrightnessRange,

    /// Brightness bounds for the motherboard zone.
    pub aura_brightness: BrightnessRange,

    /// lm-sensors chip name prefix (e.g. "k10temp").
    pub sensor_chip: String,

    /// lm-sensors feature label (e.g. "Tdie").
    pub sensor_feature: String,

    /// Dispatch command for the cooler ring zone.
    pub ring_zone: ZoneCommandCfg,

    /// Dispatch command for the cooler logo zone.
    pub logo_zone: ZoneCommandCfg,

    /// Dispatch command for the motherboard zone.
    pub aura_zone: ZoneCommandCfg,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temp_min: 38.0,
            temp_max: 53.0,
            color_cold: Rgb::from_hex(0x9575CD),
            color_hot: Rgb::from_hex(0xFF0000),
            logo_color: Rgb::from_hex(0x9575CD),
            aura_color: Rgb::from_hex(0x651FFF),
            sunrise: 7.5,
            sunset: 19.5,
            cooler_brightness: BrightnessRange { min: 0.4, max: 1.0 },
            aura_brightness: BrightnessRange { min: 0.1, max: 0.7 },
            sensor_chip: "k10temp".to_string(),
            sensor_feature: "Tdie".to_string(),
            ring_zone: ZoneCommandCfg {
                name: "ring".to_string(),
                program: "liquidctl".to_string(),
                args: ["--match", "kraken", "set", "ring", "color", "fixed", "{color}"]
                    .map(String::from)
                    .to_vec(),
            },
            logo_zone: ZoneCommandCfg {
                name: "logo".to_string(),
                program: "liquidctl".to_string(),
                args: ["--match", "kraken", "set", "logo", "color", "fixed", "{color}"]
                    .map(String::from)
                    .to_vec(),
            },
            aura_zone: ZoneCommandCfg {
                name: "aura".to_string(),
                program: "openrgb".to_string(),
                args: ["--device", "0", "--color", "{color}"].map(String::from).to_vec(),
            },
        }
    }
}

impl Config {
    /// Validates all configured ranges up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.color_ramp()?;
        self.day_curve()?;
        self.cooler_brightness.validate()?;
        self.aura_brightness.validate()?;
        Ok(())
    }

    /// Builds the temperature-to-color ramp from the configured bounds.
    pub fn color_ramp(&self) -> Result<ColorRamp, ConfigError> {
        ColorRamp::new(self.temp_min, self.temp_max, self.color_cold, self.color_hot)
    }

    /// Builds the day curve from the configured sunrise/sunset anchors.
    pub fn day_curve(&self) -> Result<DayCurve, ConfigError> {
        DayCurve::new(self.sunrise, self.sunset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn empty_temperature_range_fails_validation() {
        let config = Config {
            temp_min: 53.0,
            temp_max: 53.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::EmptyTemperatureRange {
                min: 53.0,
                max: 53.0
            }
        );
    }

    #[test]
    fn inverted_day_window_fails_validation() {
        let config = Config {
            sunrise: 21.0,
            sunset: 6.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::InvertedDayWindow {
                sunrise: 21.0,
                sunset: 6.0
            }
        );
    }

    #[test]
    fn inverted_brightness_range_fails_validation() {
        let config = Config {
            aura_brightness: BrightnessRange { min: 0.7, max: 0.1 },
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::InvertedBrightnessRange { min: 0.7, max: 0.1 }
        );
    }

    #[test]
    fn default_zone_templates_carry_color_placeholder() {
        let config = Config::default();
        for zone in [&config.ring_zone, &config.logo_zone, &config.aura_zone] {
            assert!(zone.args.iter().any(|a| a.contains("{color}")));
        }
    }
}
