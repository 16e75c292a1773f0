//! Color definitions and utilities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{StyleError, StyleResult};

/// An RGB(A) color with channels in `[0, 1]`.
///
/// `a` is `None` for opaque colors that never had a transparency channel, so a
/// color round-trips as a 3-tuple until an alpha is explicitly set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Color {
    /// Create a new RGB color. Channels are clamped to `[0, 1]`.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: None,
        }
    }

    /// Create a new RGBA color.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color {
            a: Some(a.clamp(0.0, 1.0)),
            ..Color::rgb(r, g, b)
        }
    }

    /// Create a color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Color::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// A gray level, 0.0 is black and 1.0 is white.
    pub fn gray(level: f64) -> Self {
        Color::rgb(level, level, level)
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "FF0000").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        if hex.len() == 6 {
            Some(Color::from_u8(channel(0)?, channel(2)?, channel(4)?))
        } else if hex.len() == 8 {
            let a = channel(6)?;
            Some(Color::from_u8(channel(0)?, channel(2)?, channel(4)?).with_alpha_clamped(a as f64 / 255.0))
        } else {
            None
        }
    }

    /// Parse a color specification: hex, a named color, a matplotlib cycle
    /// name (`C0`..`C9`) or a grayscale level such as `"0.85"`.
    pub fn parse(spec: &str) -> StyleResult<Self> {
        let spec = spec.trim();
        if spec.starts_with('#') {
            return Color::from_hex(spec)
                .ok_or_else(|| StyleError::config(format!("Invalid hex color '{}'", spec)));
        }
        if let Some(hex) = resolve_named_color(spec) {
            return Color::from_hex(hex)
                .ok_or_else(|| StyleError::config(format!("Invalid hex color '{}'", hex)));
        }
        if spec.len() == 6 || spec.len() == 8 {
            if let Some(color) = Color::from_hex(spec) {
                return Ok(color);
            }
        }
        if let Ok(level) = spec.parse::<f64>() {
            if (0.0..=1.0).contains(&level) {
                return Ok(Color::gray(level));
            }
            return Err(StyleError::invalid(format!(
                "Grayscale level {} must be within [0, 1]",
                level
            )));
        }
        Err(StyleError::config(format!("Unknown color '{}'", spec)))
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when an alpha channel is set.
    pub fn to_hex(&self) -> String {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        match self.a {
            Some(a) => format!("#{:02x}{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b), c(a)),
            None => format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b)),
        }
    }

    /// Get the alpha value (opacity) of the color.
    pub fn alpha(&self) -> f64 {
        self.a.unwrap_or(1.0)
    }

    /// The channels as a 3- or 4-element vector.
    pub fn channels(&self) -> Vec<f64> {
        match self.a {
            Some(a) => vec![self.r, self.g, self.b, a],
            None => vec![self.r, self.g, self.b],
        }
    }

    /// Blend toward white. `intensity` 1.0 keeps the color; smaller values
    /// make it lighter.
    pub fn with_intensity(&self, intensity: f64) -> StyleResult<Self> {
        if !intensity.is_finite() || intensity <= 0.0 || intensity > 1.0 {
            return Err(StyleError::invalid(format!(
                "Intensity {} must be within (0, 1]",
                intensity
            )));
        }
        let blend = |c: f64| c * intensity + (1.0 - intensity);
        Ok(Color {
            r: blend(self.r),
            g: blend(self.g),
            b: blend(self.b),
            a: self.a,
        })
    }

    /// Set (or overwrite) the transparency channel.
    pub fn with_alpha(&self, alpha: f64) -> StyleResult<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(StyleError::invalid(format!(
                "Alpha {} must be within [0, 1]",
                alpha
            )));
        }
        Ok(self.with_alpha_clamped(alpha))
    }

    fn with_alpha_clamped(mut self, alpha: f64) -> Self {
        self.a = Some(alpha.clamp(0.0, 1.0));
        self
    }

    /// Linear interpolation toward `other`; `t` = 0 gives `self`, 1 gives `other`.
    pub fn lerp(&self, other: &Color, t: f64) -> Self {
        let mix = |a: f64, b: f64| a * (1.0 - t) + b * t;
        let a = match (self.a, other.a) {
            (None, None) => None,
            (a1, a2) => Some(mix(a1.unwrap_or(1.0), a2.unwrap_or(1.0))),
        };
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a,
        }
    }

    // Predefined colors
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: None };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: None };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: None };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0, a: None };
    pub const GRAY: Color = Color { r: 0.5, g: 0.5, b: 0.5, a: None };
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl From<(f64, f64, f64)> for Color {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        Color::rgb(r, g, b)
    }
}

impl From<(f64, f64, f64, f64)> for Color {
    fn from((r, g, b, a): (f64, f64, f64, f64)) -> Self {
        Color::rgba(r, g, b, a)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::from_u8(r, g, b)
    }
}

/// Resolve a named color to its hex value.
fn resolve_named_color(name: &str) -> Option<&'static str> {
    let hex = match name.to_lowercase().as_str() {
        // Basic colors
        "black" => "#000000",
        "white" => "#FFFFFF",
        "red" => "#FF0000",
        "green" => "#008000",
        "blue" => "#0000FF",
        "yellow" => "#FFFF00",
        "cyan" | "aqua" => "#00FFFF",
        "magenta" | "fuchsia" => "#FF00FF",
        "orange" => "#FFA500",
        "purple" => "#800080",
        "gray" | "grey" => "#808080",
        "lightgray" | "lightgrey" => "#D3D3D3",
        "darkgray" | "darkgrey" => "#A9A9A9",
        "pink" => "#FFC0CB",
        "brown" => "#A52A2A",
        "navy" => "#000080",
        "teal" => "#008080",
        "olive" => "#808000",
        "maroon" => "#800000",
        "lime" => "#00FF00",
        "silver" => "#C0C0C0",
        "lightblue" => "#ADD8E6",
        "lightgreen" => "#90EE90",

        // Matplotlib-style cycle colors (C0-C9)
        "c0" => "#1f77b4",
        "c1" => "#ff7f0e",
        "c2" => "#2ca02c",
        "c3" => "#d62728",
        "c4" => "#9467bd",
        "c5" => "#8c564b",
        "c6" => "#e377c2",
        "c7" => "#7f7f7f",
        "c8" => "#bcbd22",
        "c9" => "#17becf",

        // Single-letter shortcuts (matplotlib style)
        "b" => "#0000FF",
        "g" => "#008000",
        "r" => "#FF0000",
        "c" => "#00BFBF",
        "m" => "#BF00BF",
        "y" => "#BFBF00",
        "k" => "#000000",
        "w" => "#FFFFFF",

        _ => return None,
    };
    Some(hex)
}

/// Build a gradient of `n` colors from `start` to `end`, both endpoints
/// included.
pub fn interpolate(start: &Color, end: &Color, n: usize) -> StyleResult<Vec<Color>> {
    if n < 2 {
        return Err(StyleError::invalid(format!(
            "Gradient needs at least 2 steps, got {}",
            n
        )));
    }
    let last = (n - 1) as f64;
    Ok((0..n).map(|i| start.lerp(end, i as f64 / last)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        let c = Color::from_hex("#ff8000").unwrap();
        assert_eq!(c.to_hex(), "#ff8000");
        assert_eq!(c.a, None);

        let c = Color::from_hex("00000080").unwrap();
        assert!((c.alpha() - 128.0 / 255.0).abs() < 1e-12);
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#zzzzzz").is_none());
    }

    #[test]
    fn test_parse_named_and_gray() {
        assert_eq!(Color::parse("k").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("C0").unwrap().to_hex(), "#1f77b4");
        assert_eq!(Color::parse("0.85").unwrap(), Color::gray(0.85));
        assert!(Color::parse("1.5").unwrap_err().is_invalid_argument());
        assert!(Color::parse("not-a-color").unwrap_err().is_configuration());
    }

    #[test]
    fn test_interpolate_endpoints() {
        let grad = interpolate(&Color::BLACK, &Color::WHITE, 3).unwrap();
        assert_eq!(grad.len(), 3);
        assert_eq!(grad[0], Color::BLACK);
        assert_eq!(grad[1], Color::rgb(0.5, 0.5, 0.5));
        assert_eq!(grad[2], Color::WHITE);
    }

    #[test]
    fn test_interpolate_too_few_steps() {
        let err = interpolate(&Color::BLACK, &Color::WHITE, 1).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_intensity_blends_toward_white() {
        let c = Color::rgb(0.2, 0.4, 1.0).with_intensity(0.5).unwrap();
        assert!((c.r - 0.6).abs() < 1e-12);
        assert!((c.g - 0.7).abs() < 1e-12);
        assert!((c.b - 1.0).abs() < 1e-12);

        assert_eq!(Color::RED.with_intensity(1.0).unwrap(), Color::RED);
        assert!(Color::RED.with_intensity(0.0).is_err());
        assert!(Color::RED.with_intensity(1.2).is_err());
    }

    #[test]
    fn test_alpha_channel() {
        let c = Color::BLUE.with_alpha(0.3).unwrap();
        assert_eq!(c.channels(), vec![0.0, 0.0, 1.0, 0.3]);
        let c = c.with_alpha(0.7).unwrap();
        assert_eq!(c.a, Some(0.7));
        assert!(Color::BLUE.with_alpha(-0.1).is_err());
    }
}
