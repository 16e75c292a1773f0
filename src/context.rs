//! The style context: active palette, line width progression, typography and
//! figure geometry, plus the running color counter.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

use crate::config::StyleOptions;
use crate::error::{StyleError, StyleResult};
use crate::style::preset::{default_rc_params, FigureGeometry, FontSizes, Preset, PresetConfig, RcParams};
use crate::style::width::width_for;
use crate::style::{Color, Palette};

/// Color and width chosen for one plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyleChoice {
    pub color: Color,
    pub width: f64,
    /// Palette index the choice was made for
    pub index: usize,
    /// Counter value after this choice
    pub next_index: usize,
}

/// Style settings consulted by every styled plotting call.
///
/// A context is an ordinary value: hold one per figure, clone it, or use
/// [`StyleContext::scoped`] for temporary overrides.
#[derive(Debug, Clone)]
pub struct StyleContext {
    palette_name: String,
    palette: Arc<Palette>,
    base_linewidth: f64,
    linewidth_progression_factor: f64,
    vary_linewidth: bool,
    fonts: FontSizes,
    figure: FigureGeometry,
    marker_size: f64,
    use_tex: bool,
    preset: Preset,
    rc_params: RcParams,
    color_index: usize,
}

impl StyleContext {
    /// A context with the default options.
    pub fn new() -> StyleResult<Self> {
        StyleContext::from_options(&StyleOptions::default())
    }

    /// A context built from `options`.
    pub fn from_options(options: &StyleOptions) -> StyleResult<Self> {
        options.validate()?;
        let palette = Palette::cached(&options.palette_name, options.palette_size)?;
        let defaults = Preset::Default.config();
        let mut ctx = StyleContext {
            palette_name: options.palette_name.clone(),
            palette,
            base_linewidth: options.base_linewidth,
            linewidth_progression_factor: options.linewidth_progression_factor,
            vary_linewidth: options.vary_linewidth,
            fonts: defaults.fonts,
            figure: defaults.figure,
            marker_size: defaults.marker_size,
            use_tex: options.use_tex,
            preset: Preset::Default,
            rc_params: defaults.rc_params,
            color_index: 0,
        };
        ctx.set_fonts(options);
        Ok(ctx)
    }

    /// Replace the settings from `options` and reset the color counter.
    ///
    /// The options are validated and the palette built before anything is
    /// changed, so a failed call leaves the context untouched.
    pub fn initialize(&mut self, options: &StyleOptions) -> StyleResult<()> {
        let ctx = StyleContext::from_options(options)?;
        debug!(
            "Initialized style: palette '{}' ({} colors), vary_linewidth={}",
            ctx.palette_name,
            ctx.palette.len(),
            ctx.vary_linewidth
        );
        *self = ctx;
        Ok(())
    }

    /// [`initialize`](Self::initialize) from a JSON object of options.
    pub fn initialize_from_value(&mut self, options: Value) -> StyleResult<()> {
        self.initialize(&StyleOptions::from_value(options)?)
    }

    fn set_fonts(&mut self, options: &StyleOptions) {
        self.fonts = FontSizes {
            small: options.font_size_small,
            medium: options.font_size_medium,
            large: options.font_size_large,
        };
        self.rc_params = default_rc_params(self.fonts.medium, self.fonts.large, self.use_tex);
    }

    /// Apply a named preset (`default`, `nature`, `presentation`, `poster`).
    pub fn apply_preset(&mut self, name: &str) -> StyleResult<()> {
        let config = Preset::from_name(name)?.config();
        self.apply_preset_config(config);
        Ok(())
    }

    /// Apply a preset with parameter overrides merged into its table.
    pub fn apply_preset_with(&mut self, name: &str, overrides: &RcParams) -> StyleResult<()> {
        let config = Preset::from_name(name)?.config().with_overrides(overrides)?;
        self.apply_preset_config(config);
        Ok(())
    }

    /// Copy a preset's values into the context.
    pub fn apply_preset_config(&mut self, config: PresetConfig) {
        info!("Applying '{}' style preset", config.preset);
        self.preset = config.preset;
        self.fonts = config.fonts;
        self.figure = config.figure;
        self.base_linewidth = config.line_width;
        self.marker_size = config.marker_size;
        self.use_tex = config
            .rc_params
            .get("text.usetex")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        self.rc_params = config.rc_params;
    }

    /// Color and width for the next series.
    ///
    /// Without an index the running counter is used and advanced by one;
    /// with an index the counter is left alone.
    pub fn next_style(&mut self, color_idx: Option<usize>) -> StyleResult<StyleChoice> {
        let index = match color_idx {
            Some(idx) => idx,
            None => self.color_index,
        };
        let width = self.linewidth_for(index, None)?;
        let color = self.palette.cycle(index);
        if color_idx.is_none() {
            self.color_index += 1;
        }
        Ok(StyleChoice {
            color,
            width,
            index,
            next_index: self.color_index,
        })
    }

    /// Line width for palette index `idx`.
    ///
    /// `base` overrides the context's base width. Without progressive widths
    /// the base is returned unchanged.
    pub fn linewidth_for(&self, idx: usize, base: Option<f64>) -> StyleResult<f64> {
        let base = base.unwrap_or(self.base_linewidth);
        if !self.vary_linewidth {
            return Ok(base);
        }
        let n = i64::try_from(idx)
            .map_err(|_| StyleError::invalid(format!("Line index {} is too large", idx)))?;
        width_for(n, base, self.linewidth_progression_factor)
    }

    /// Strict palette lookup.
    pub fn color(&self, idx: usize) -> StyleResult<Color> {
        self.palette.get(idx)
    }

    /// Palette lookup with wraparound.
    pub fn cycle_color(&self, idx: usize) -> Color {
        self.palette.cycle(idx)
    }

    /// Current value of the running color counter.
    pub fn color_cycle_index(&self) -> usize {
        self.color_index
    }

    /// Restore a previously saved counter value.
    pub fn set_color_cycle_index(&mut self, idx: usize) {
        self.color_index = idx;
    }

    /// Reset the running color counter to zero.
    pub fn reset_color_cycle(&mut self) {
        self.color_index = 0;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_name(&self) -> &str {
        &self.palette_name
    }

    pub fn base_linewidth(&self) -> f64 {
        self.base_linewidth
    }

    pub fn linewidth_progression_factor(&self) -> f64 {
        self.linewidth_progression_factor
    }

    pub fn vary_linewidth(&self) -> bool {
        self.vary_linewidth
    }

    pub fn fonts(&self) -> FontSizes {
        self.fonts
    }

    pub fn figure(&self) -> FigureGeometry {
        self.figure
    }

    pub fn marker_size(&self) -> f64 {
        self.marker_size
    }

    pub fn use_tex(&self) -> bool {
        self.use_tex
    }

    /// The most recently applied preset.
    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Parameter table to forward to the plotting library.
    pub fn rc_params(&self) -> &RcParams {
        &self.rc_params
    }

    /// Temporarily modify the context; every change is undone when the
    /// returned guard is dropped.
    pub fn scoped(&mut self) -> ScopedStyle<'_> {
        let saved = self.clone();
        ScopedStyle {
            ctx: self,
            saved: Some(saved),
        }
    }

    /// Run `f` with a preset applied, then restore the previous settings.
    pub fn with_preset<T>(&mut self, name: &str, f: impl FnOnce(&mut StyleContext) -> T) -> StyleResult<T> {
        let mut scope = self.scoped();
        scope.apply_preset(name)?;
        Ok(f(&mut scope))
    }
}

/// Guard returned by [`StyleContext::scoped`].
pub struct ScopedStyle<'a> {
    ctx: &'a mut StyleContext,
    saved: Option<StyleContext>,
}

impl Deref for ScopedStyle<'_> {
    type Target = StyleContext;

    fn deref(&self) -> &StyleContext {
        self.ctx
    }
}

impl DerefMut for ScopedStyle<'_> {
    fn deref_mut(&mut self) -> &mut StyleContext {
        self.ctx
    }
}

impl Drop for ScopedStyle<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            *self.ctx = saved;
        }
    }
}
