//! Publication-style plot styling.
//!
//! `pltx` picks colors from named palettes, grows line widths along a
//! geometric progression so overlapping series stay distinguishable,
//! applies typography/figure presets (`default`, `nature`, `presentation`,
//! `poster`) and forwards styled drawing calls to any [`PlotTarget`].
//!
//! ```no_run
//! use pltx::prelude::*;
//!
//! # fn main() -> pltx::StyleResult<()> {
//! let mut ctx = StyleContext::new()?;
//! ctx.apply_preset("nature")?;
//! let mut rec = Recorder::new();
//! ctx.plot_styled(&mut rec, [0.0, 1.0, 2.0], [1.0, 4.0, 9.0])
//!     .label("quadratic")
//!     .build()?;
//! ctx.setup_axis(&mut rec, &AxisSetup::new().xlabel("x").ylabel("y"))?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod global;
pub mod plotting;
pub mod style;

pub use config::StyleOptions;
pub use context::{ScopedStyle, StyleChoice, StyleContext};
pub use error::{StyleError, StyleResult};
pub use plotting::{PlotCommand, PlotTarget, Recorder};
pub use style::{
    available_palettes, interpolate, progression, resolve_color, resolve_color_with, width_for,
    Color, Palette, PaletteStrategy, Preset,
};

pub mod prelude {
    pub use crate::plotting::prelude::*;
    pub use crate::style::Palette;
    pub use crate::{StyleError, StyleResult};
}
