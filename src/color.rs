//! RGB color math for temperature-driven lighting.
//!
//! Implements per-channel linear interpolation between two endpoint colors to
//! map a temperature reading onto a color ramp.

use crate::error::ConfigError;

/// 24-bit RGB color.
///
/// Each channel is clamped to [0, 255] after any arithmetic.
///
/// # Example
///
/// ```
/// use thermoglowd::color::Rgb;
///
/// let violet = Rgb::from_hex(0x9575CD);
/// assert_eq!((violet.r, violet.g, violet.b), (149, 117, 205));
/// assert_eq!(violet.to_hex(), 0x9575CD);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpacks a `0xRRGGBB` value into its channels.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Packs the channels into a `0xRRGGBB` value.
    pub const fn to_hex(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Builds a color from floating-point channels, rounding ties-to-even and
    /// clamping each channel to [0, 255].
    pub fn from_channels(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: quantize(r),
            g: quantize(g),
            b: quantize(b),
        }
    }

    /// Applies a brightness scalar to every channel.
    pub fn scaled(self, brightness: f32) -> Self {
        Self::from_channels(
            f32::from(self.r) * brightness,
            f32::from(self.g) * brightness,
            f32::from(self.b) * brightness,
        )
    }
}

fn quantize(channel: f32) -> u8 {
    channel.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Linear color ramp over a temperature range.
///
/// Temperatures at or below the range minimum map to the cold endpoint,
/// temperatures at or above the maximum map to the hot endpoint, and
/// everything in between interpolates channel-wise.
#[derive(Debug, Clone, Copy)]
pub struct ColorRamp {
    t_min: f32,
    t_max: f32,
    cold: Rgb,
    hot: Rgb,
}

impl ColorRamp {
    /// Creates a ramp; an empty temperature range is rejected up front so the
    /// interpolation never divides by zero.
    pub fn new(t_min: f32, t_max: f32, cold: Rgb, hot: Rgb) -> Result<Self, ConfigError> {
        if t_max <= t_min {
            return Err(ConfigError::EmptyTemperatureRange {
                min: t_min,
                max: t_max,
            });
        }
        Ok(Self {
            t_min,
            t_max,
            cold,
            hot,
        })
    }

    /// Maps a temperature to its color on the ramp.
    pub fn color_at(&self, temperature: f32) -> Rgb {
        let ratio = ((temperature - self.t_min) / (self.t_max - self.t_min)).clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| ratio * (f32::from(b) - f32::from(a)) + f32::from(a);
        Rgb::from_channels(
            lerp(self.cold.r, self.hot.r),
            lerp(self.cold.g, self.hot.g),
            lerp(self.cold.b, self.hot.b),
        )
    }
}
