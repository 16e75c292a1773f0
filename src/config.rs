//! Style options accepted by [`StyleContext::initialize`](crate::StyleContext::initialize).
//!
//! Options can be built in code, deserialized from JSON, or loaded from a
//! JSON file. Unknown keys are rejected.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StyleError, StyleResult};
use crate::style::palette::{DEFAULT_PALETTE_NAME, DEFAULT_PALETTE_SIZE};
use crate::style::width::validate_progression;

/// Recognized style options.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StyleOptions {
    /// Name of the color palette
    #[serde(default = "default_palette_name")]
    pub palette_name: String,
    /// Number of colors sampled from the palette
    #[serde(default = "default_palette_size")]
    pub palette_size: usize,
    /// Line width of the first series
    #[serde(default = "default_base_linewidth")]
    pub base_linewidth: f64,
    /// Multiplier applied per series when `vary_linewidth` is set
    #[serde(default = "default_progression_factor")]
    pub linewidth_progression_factor: f64,
    /// Give each successive series a thicker line
    #[serde(default)]
    pub vary_linewidth: bool,
    /// Tick labels and legends
    #[serde(default = "default_font_size_small")]
    pub font_size_small: f64,
    /// Labels and body text
    #[serde(default = "default_font_size_medium")]
    pub font_size_medium: f64,
    /// Titles
    #[serde(default = "default_font_size_large")]
    pub font_size_large: f64,
    /// Render text with LaTeX
    #[serde(default)]
    pub use_tex: bool,
}

fn default_palette_name() -> String { DEFAULT_PALETTE_NAME.to_string() }
fn default_palette_size() -> usize { DEFAULT_PALETTE_SIZE }
fn default_base_linewidth() -> f64 { 2.0 }
fn default_progression_factor() -> f64 { 1.3 }
fn default_font_size_small() -> f64 { 10.0 }
fn default_font_size_medium() -> f64 { 12.0 }
fn default_font_size_large() -> f64 { 13.0 }

impl Default for StyleOptions {
    fn default() -> Self {
        StyleOptions {
            palette_name: default_palette_name(),
            palette_size: default_palette_size(),
            base_linewidth: default_base_linewidth(),
            linewidth_progression_factor: default_progression_factor(),
            vary_linewidth: false,
            font_size_small: default_font_size_small(),
            font_size_medium: default_font_size_medium(),
            font_size_large: default_font_size_large(),
            use_tex: false,
        }
    }
}

impl StyleOptions {
    /// Load options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> StyleResult<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let options: StyleOptions = serde_json::from_reader(reader)?;
        Ok(options)
    }

    /// Build options from a JSON object; missing keys take their defaults.
    pub fn from_value(value: Value) -> StyleResult<Self> {
        if !value.is_object() {
            return Err(StyleError::config("Style options must be a JSON object"));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn palette(mut self, name: impl Into<String>, size: usize) -> Self {
        self.palette_name = name.into();
        self.palette_size = size;
        self
    }

    /// Enable progressive line widths.
    pub fn vary_linewidth(mut self, base: f64, factor: f64) -> Self {
        self.vary_linewidth = true;
        self.base_linewidth = base;
        self.linewidth_progression_factor = factor;
        self
    }

    pub fn font_sizes(mut self, small: f64, medium: f64, large: f64) -> Self {
        self.font_size_small = small;
        self.font_size_medium = medium;
        self.font_size_large = large;
        self
    }

    /// Check numeric ranges. Palette names are checked when the palette is built.
    pub fn validate(&self) -> StyleResult<()> {
        if self.palette_size == 0 {
            return Err(StyleError::invalid("palette_size must be at least 1"));
        }
        validate_progression(self.base_linewidth, self.linewidth_progression_factor)?;
        for (key, size) in [
            ("font_size_small", self.font_size_small),
            ("font_size_medium", self.font_size_medium),
            ("font_size_large", self.font_size_large),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(StyleError::invalid(format!(
                    "{} must be positive, got {}",
                    key, size
                )));
            }
        }
        Ok(())
    }
}

/// JSON Schema of the style options file, pretty-printed.
pub fn schema_json_pretty() -> StyleResult<String> {
    let schema = schema_for!(StyleOptions);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = StyleOptions::from_value(json!({})).unwrap();
        assert_eq!(options, StyleOptions::default());
        assert_eq!(options.palette_name, "viridis");
        assert_eq!(options.palette_size, 10);
        assert_eq!(options.base_linewidth, 2.0);
        assert_eq!(options.linewidth_progression_factor, 1.3);
        assert!(!options.vary_linewidth);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = StyleOptions::from_value(json!({"palete_name": "viridis"})).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("palete_name"));
    }

    #[test]
    fn test_not_an_object() {
        assert!(StyleOptions::from_value(json!([1, 2])).unwrap_err().is_configuration());
    }

    #[test]
    fn test_validate_ranges() {
        assert!(StyleOptions::default().validate().is_ok());
        let bad = StyleOptions::default().palette("viridis", 0);
        assert!(bad.validate().unwrap_err().is_invalid_argument());
        let bad = StyleOptions::default().vary_linewidth(-1.0, 1.3);
        assert!(bad.validate().unwrap_err().is_invalid_argument());
        let bad = StyleOptions::default().font_sizes(10.0, 0.0, 13.0);
        assert!(bad.validate().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"palette_name": "tab10", "vary_linewidth": true, "base_linewidth": 1.5}}"#
        )
        .unwrap();
        let options = StyleOptions::load(file.path()).unwrap();
        assert_eq!(options.palette_name, "tab10");
        assert!(options.vary_linewidth);
        assert_eq!(options.base_linewidth, 1.5);
        assert_eq!(options.palette_size, 10);
    }

    #[test]
    fn test_load_missing_file() {
        let err = StyleOptions::load("/nonexistent/pltx-style.json").unwrap_err();
        assert!(matches!(err, StyleError::Io(_)));
    }

    #[test]
    fn test_schema_lists_options() {
        let schema: Value = serde_json::from_str(&schema_json_pretty().unwrap()).unwrap();
        let props = schema.get("properties").and_then(|p| p.as_object()).unwrap();
        assert!(props.contains_key("palette_name"));
        assert!(props.contains_key("linewidth_progression_factor"));
        assert_eq!(schema.get("additionalProperties"), Some(&json!(false)));
    }
}
