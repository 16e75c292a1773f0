//! Styling module for pltx.
//!
//! This module contains colors, colormap tables, palettes, line width
//! progression, dash/marker types and the preset tables.

pub mod color;
pub mod colormap;
pub mod line_style;
pub mod palette;
pub mod preset;
pub mod width;

pub use color::{interpolate, Color};
pub use colormap::{Category, Provider};
pub use line_style::{parse_format, DashPattern, Marker};
pub use palette::{
    available_palettes, cycle_color, get_color, get_default_palette, resolve_color,
    resolve_color_with, set_default_palette, Palette, PaletteInfo, PaletteStrategy,
    DEFAULT_PALETTE_NAME, DEFAULT_PALETTE_SIZE,
};
pub use preset::{default_rc_params, FigureGeometry, FontSizes, Preset, PresetConfig, RcParams};
pub use width::{progression, validate_progression, width_for};
