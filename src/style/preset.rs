//! Predefined style presets for journals, slides and posters.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{StyleError, StyleResult};

/// Ordered table of plotting-library parameters (`font.size`, `lines.linewidth`, ...).
pub type RcParams = IndexMap<String, Value>;

/// Nature single-column figure width in inches.
pub const NATURE_FIGURE_WIDTH: f64 = 3.5;
/// Nature double-column figure width in inches.
pub const NATURE_FIGURE_WIDTH_DOUBLE: f64 = 7.0;

/// Predefined style presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// General-purpose defaults
    #[default]
    Default,
    /// Nature journal: 7-9 pt type, single-column width
    Nature,
    /// Slides: large type, thick lines
    Presentation,
    /// Posters: very large type and lines
    Poster,
}

/// Small/medium/large font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSizes {
    /// Tick labels and legends
    pub small: f64,
    /// Body text and axis labels
    pub medium: f64,
    /// Titles
    pub large: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        FontSizes {
            small: 10.0,
            medium: 12.0,
            large: 13.0,
        }
    }
}

/// Figure dimensions and resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FigureGeometry {
    /// Width in inches
    pub width: f64,
    /// Height in inches
    pub height: f64,
    /// On-screen resolution
    pub dpi: f64,
    /// Resolution used when saving
    pub savefig_dpi: f64,
}

impl Default for FigureGeometry {
    fn default() -> Self {
        FigureGeometry {
            width: 6.0,
            height: 4.0,
            dpi: 100.0,
            savefig_dpi: 300.0,
        }
    }
}

/// Everything a preset sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetConfig {
    pub preset: Preset,
    pub fonts: FontSizes,
    pub figure: FigureGeometry,
    /// Default line width
    pub line_width: f64,
    /// Default marker size
    pub marker_size: f64,
    /// Full parameter table for the plotting library
    pub rc_params: RcParams,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Default,
        Preset::Nature,
        Preset::Presentation,
        Preset::Poster,
    ];

    /// Look up a preset by name.
    pub fn from_name(name: &str) -> StyleResult<Self> {
        match name {
            "default" => Ok(Preset::Default),
            "nature" => Ok(Preset::Nature),
            "presentation" => Ok(Preset::Presentation),
            "poster" => Ok(Preset::Poster),
            _ => Err(StyleError::config(format!(
                "Unknown preset '{}'. Choose from: 'default', 'nature', 'presentation', 'poster'",
                name
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Nature => "nature",
            Preset::Presentation => "presentation",
            Preset::Poster => "poster",
        }
    }

    /// Get the configuration for this preset.
    pub fn config(&self) -> PresetConfig {
        match self {
            Preset::Default => PresetConfig::default_preset(),
            Preset::Nature => PresetConfig::nature_preset(),
            Preset::Presentation => PresetConfig::presentation_preset(),
            Preset::Poster => PresetConfig::poster_preset(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::from_name(s)
    }
}

impl PresetConfig {
    fn default_preset() -> Self {
        let fonts = FontSizes::default();
        PresetConfig {
            preset: Preset::Default,
            fonts,
            figure: FigureGeometry::default(),
            line_width: 2.0,
            marker_size: 6.0,
            rc_params: default_rc_params(fonts.medium, fonts.large, false),
        }
    }

    fn nature_preset() -> Self {
        PresetConfig {
            preset: Preset::Nature,
            fonts: FontSizes {
                small: 7.0,
                medium: 8.0,
                large: 9.0,
            },
            figure: FigureGeometry {
                width: NATURE_FIGURE_WIDTH,
                height: NATURE_FIGURE_WIDTH * 0.75,
                dpi: 150.0,
                savefig_dpi: 300.0,
            },
            line_width: 1.0,
            marker_size: 4.0,
            rc_params: nature_rc_params(),
        }
    }

    fn presentation_preset() -> Self {
        scaled_preset(
            Preset::Presentation,
            FontSizes {
                small: 14.0,
                medium: 16.0,
                large: 18.0,
            },
            (10.0, 6.0),
            3.0,
            8.0,
            &[
                ("axes.linewidth", json!(1.5)),
                ("xtick.major.size", json!(8)),
                ("ytick.major.size", json!(8)),
                ("xtick.minor.size", json!(4)),
                ("ytick.minor.size", json!(4)),
            ],
        )
    }

    fn poster_preset() -> Self {
        scaled_preset(
            Preset::Poster,
            FontSizes {
                small: 20.0,
                medium: 24.0,
                large: 28.0,
            },
            (12.0, 8.0),
            4.0,
            12.0,
            &[
                ("axes.linewidth", json!(2.0)),
                ("xtick.major.size", json!(10)),
                ("ytick.major.size", json!(10)),
                ("xtick.minor.size", json!(6)),
                ("ytick.minor.size", json!(6)),
            ],
        )
    }

    /// Merge parameter overrides. Every key must already be part of the table.
    pub fn with_overrides(mut self, overrides: &RcParams) -> StyleResult<Self> {
        for (key, value) in overrides {
            match self.rc_params.get_mut(key) {
                Some(slot) => *slot = value.clone(),
                None => {
                    return Err(StyleError::config(format!(
                        "Unknown parameter '{}' for preset '{}'",
                        key, self.preset
                    )))
                }
            }
        }
        Ok(self)
    }
}

/// Presentation and poster presets: the default table scaled up.
fn scaled_preset(
    preset: Preset,
    fonts: FontSizes,
    figsize: (f64, f64),
    line_width: f64,
    marker_size: f64,
    extra: &[(&str, Value)],
) -> PresetConfig {
    let mut rc = default_rc_params(fonts.medium, fonts.large, false);
    rc.insert("figure.figsize".into(), json!([figsize.0, figsize.1]));
    rc.insert("lines.linewidth".into(), json!(line_width));
    rc.insert("lines.markersize".into(), json!(marker_size));
    rc.insert("legend.fontsize".into(), json!(fonts.small));
    for (key, value) in extra {
        rc.insert((*key).to_string(), value.clone());
    }

    let defaults = FigureGeometry::default();
    PresetConfig {
        preset,
        fonts,
        figure: FigureGeometry {
            width: figsize.0,
            height: figsize.1,
            ..defaults
        },
        line_width,
        marker_size,
        rc_params: rc,
    }
}

fn table(entries: Vec<(&str, Value)>) -> RcParams {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// The general-purpose parameter table.
pub fn default_rc_params(font_size_medium: f64, font_size_large: f64, use_tex: bool) -> RcParams {
    let fig = FigureGeometry::default();
    table(vec![
        // Fonts
        ("font.size", json!(font_size_medium)),
        ("font.family", json!("sans-serif")),
        ("font.sans-serif", json!(["Arial", "Helvetica", "DejaVu Sans"])),
        ("axes.titlesize", json!(font_size_large)),
        ("axes.labelsize", json!(font_size_medium)),
        ("xtick.labelsize", json!(font_size_medium)),
        ("ytick.labelsize", json!(font_size_medium)),
        ("legend.fontsize", json!(font_size_medium)),
        ("figure.titlesize", json!(font_size_medium)),
        ("text.usetex", json!(use_tex)),
        // Figure
        ("figure.dpi", json!(fig.dpi)),
        ("figure.figsize", json!([fig.width, fig.height])),
        ("savefig.dpi", json!(fig.savefig_dpi)),
        ("savefig.bbox", json!("tight")),
        ("savefig.format", json!("pdf")),
        // Lines
        ("lines.linewidth", json!(2.0)),
        ("lines.markersize", json!(6.0)),
        // Ticks
        ("xtick.direction", json!("in")),
        ("ytick.direction", json!("in")),
        ("xtick.major.size", json!(5)),
        ("ytick.major.size", json!(5)),
        ("xtick.minor.size", json!(3)),
        ("ytick.minor.size", json!(3)),
        ("xtick.top", json!(true)),
        ("ytick.right", json!(true)),
        // Grid
        ("grid.alpha", json!(0.3)),
        ("grid.linestyle", json!("--")),
        // Legend
        ("legend.framealpha", json!(0.8)),
        ("legend.frameon", json!(true)),
        ("legend.fancybox", json!(false)),
        ("legend.edgecolor", json!("0.8")),
        // Axes
        ("axes.grid", json!(false)),
        ("axes.axisbelow", json!(true)),
        ("axes.linewidth", json!(1.0)),
        ("axes.edgecolor", json!("black")),
        ("axes.labelcolor", json!("black")),
        // Images
        ("image.cmap", json!("viridis")),
        ("image.interpolation", json!("nearest")),
    ])
}

fn nature_rc_params() -> RcParams {
    table(vec![
        ("font.size", json!(8.0)),
        ("font.family", json!("sans-serif")),
        ("font.sans-serif", json!(["Arial", "Helvetica", "DejaVu Sans"])),
        ("axes.titlesize", json!(9.0)),
        ("axes.labelsize", json!(8.0)),
        ("xtick.labelsize", json!(7.0)),
        ("ytick.labelsize", json!(7.0)),
        ("legend.fontsize", json!(7.0)),
        ("figure.titlesize", json!(9.0)),
        ("text.usetex", json!(false)),
        ("figure.dpi", json!(150.0)),
        ("figure.figsize", json!([NATURE_FIGURE_WIDTH, NATURE_FIGURE_WIDTH * 0.75])),
        ("savefig.dpi", json!(300.0)),
        ("savefig.bbox", json!("tight")),
        ("savefig.format", json!("pdf")),
        ("savefig.transparent", json!(false)),
        ("lines.linewidth", json!(1.0)),
        ("lines.markersize", json!(4.0)),
        ("xtick.direction", json!("in")),
        ("ytick.direction", json!("in")),
        ("xtick.major.size", json!(3)),
        ("ytick.major.size", json!(3)),
        ("xtick.minor.size", json!(2)),
        ("ytick.minor.size", json!(2)),
        ("xtick.major.width", json!(0.5)),
        ("ytick.major.width", json!(0.5)),
        ("xtick.top", json!(true)),
        ("ytick.right", json!(true)),
        ("grid.alpha", json!(0.3)),
        ("grid.linestyle", json!("--")),
        ("grid.linewidth", json!(0.5)),
        ("legend.framealpha", json!(1.0)),
        ("legend.frameon", json!(true)),
        ("legend.fancybox", json!(false)),
        ("legend.edgecolor", json!("black")),
        ("legend.borderpad", json!(0.4)),
        ("legend.labelspacing", json!(0.3)),
        ("axes.grid", json!(false)),
        ("axes.axisbelow", json!(true)),
        ("axes.linewidth", json!(0.5)),
        ("axes.edgecolor", json!("black")),
        ("axes.labelcolor", json!("black")),
        ("axes.labelpad", json!(2.0)),
        ("image.cmap", json!("viridis")),
        ("image.interpolation", json!("nearest")),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nature_preset() {
        let config = Preset::Nature.config();
        assert!((7.0..=9.0).contains(&config.fonts.medium));
        assert!((7.0..=9.0).contains(&config.fonts.small));
        assert!((7.0..=9.0).contains(&config.fonts.large));
        assert_eq!(config.figure.width, 3.5);
        assert_eq!(config.rc_params["figure.figsize"], json!([3.5, 2.625]));
        assert_eq!(config.line_width, 1.0);
    }

    #[test]
    fn test_unknown_preset() {
        let err = Preset::from_name("xyz").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
    }

    #[test]
    fn test_presentation_scales_default_table() {
        let config = Preset::Presentation.config();
        assert_eq!(config.rc_params["font.size"], json!(16.0));
        assert_eq!(config.rc_params["legend.fontsize"], json!(14.0));
        assert_eq!(config.rc_params["lines.linewidth"], json!(3.0));
        assert_eq!(config.figure.width, 10.0);
        // Keys shared with the default table keep its ordering
        let default_keys: Vec<_> = default_rc_params(12.0, 13.0, false).into_keys().collect();
        let keys: Vec<_> = config.rc_params.keys().cloned().collect();
        assert_eq!(keys, default_keys);
    }

    #[test]
    fn test_poster_is_largest() {
        let poster = Preset::Poster.config();
        for other in [Preset::Default, Preset::Nature, Preset::Presentation] {
            let config = other.config();
            assert!(poster.fonts.medium > config.fonts.medium);
            assert!(poster.line_width > config.line_width);
        }
    }

    #[test]
    fn test_overrides() {
        let mut overrides = RcParams::new();
        overrides.insert("font.size".into(), json!(18.0));
        let config = Preset::Presentation.config().with_overrides(&overrides).unwrap();
        assert_eq!(config.rc_params["font.size"], json!(18.0));

        overrides.insert("no.such.key".into(), json!(1));
        let err = Preset::Default.config().with_overrides(&overrides).unwrap_err();
        assert!(err.is_configuration());
    }
}
