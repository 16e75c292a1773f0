//! Axis and legend formatting.

use std::str::FromStr;

use crate::error::{StyleError, StyleResult};
use crate::plotting::command::{
    check_kwargs, AxisCall, AxisScale, GridCall, Kwargs, LegendCall, Locator, PlotCommand,
    TickParams, LEGEND_FIELDS,
};
use crate::plotting::target::PlotTarget;
use crate::style::DashPattern;

const LOG_MAJOR_TICKS: usize = 5;
const LOG_MINOR_TICKS: usize = 15;
const GRID_LINEWIDTH: f64 = 0.5;

impl FromStr for AxisScale {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(AxisScale::Linear),
            "log" => Ok(AxisScale::Log),
            "symlog" => Ok(AxisScale::Symlog),
            "logit" => Ok(AxisScale::Logit),
            _ => Err(StyleError::config(format!("Unknown axis scale '{}'", s))),
        }
    }
}

/// Axis settings applied by [`setup_axis`].
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSetup {
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    title: Option<String>,
    xscale: AxisScale,
    yscale: AxisScale,
    xtick_spacing: Option<f64>,
    ytick_spacing: Option<f64>,
    grid: bool,
    grid_alpha: f64,
}

impl Default for AxisSetup {
    fn default() -> Self {
        AxisSetup {
            xlim: None,
            ylim: None,
            xlabel: None,
            ylabel: None,
            title: None,
            xscale: AxisScale::Linear,
            yscale: AxisScale::Linear,
            xtick_spacing: None,
            ytick_spacing: None,
            grid: false,
            grid_alpha: 0.3,
        }
    }
}

impl AxisSetup {
    pub fn new() -> Self {
        AxisSetup::default()
    }

    pub fn xlim(mut self, min: f64, max: f64) -> Self {
        self.xlim = Some((min, max));
        self
    }

    pub fn ylim(mut self, min: f64, max: f64) -> Self {
        self.ylim = Some((min, max));
        self
    }

    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = Some(label.into());
        self
    }

    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn xscale(mut self, scale: AxisScale) -> Self {
        self.xscale = scale;
        self
    }

    pub fn yscale(mut self, scale: AxisScale) -> Self {
        self.yscale = scale;
        self
    }

    /// Major tick spacing on the x axis.
    pub fn xtick_spacing(mut self, spacing: f64) -> Self {
        self.xtick_spacing = Some(spacing);
        self
    }

    /// Major tick spacing on the y axis.
    pub fn ytick_spacing(mut self, spacing: f64) -> Self {
        self.ytick_spacing = Some(spacing);
        self
    }

    /// Show a dashed grid with the given transparency.
    pub fn grid(mut self, alpha: f64) -> Self {
        self.grid = true;
        self.grid_alpha = alpha;
        self
    }

    /// Build the axis call. Log axes get log locators, which take the place
    /// of any multiple-locator spacing on that axis.
    pub fn to_call(&self) -> StyleResult<AxisCall> {
        for (what, lim) in [("xlim", self.xlim), ("ylim", self.ylim)] {
            if let Some((lo, hi)) = lim {
                if !lo.is_finite() || !hi.is_finite() {
                    return Err(StyleError::invalid(format!(
                        "{} must be finite, got ({}, {})",
                        what, lo, hi
                    )));
                }
            }
        }
        let (x_major, x_minor) = locators("xtick_spacing", self.xscale, self.xtick_spacing)?;
        let (y_major, y_minor) = locators("ytick_spacing", self.yscale, self.ytick_spacing)?;

        let grid = if self.grid {
            if !(0.0..=1.0).contains(&self.grid_alpha) {
                return Err(StyleError::invalid(format!(
                    "Grid alpha must be in [0, 1], got {}",
                    self.grid_alpha
                )));
            }
            Some(GridCall {
                alpha: self.grid_alpha,
                linestyle: DashPattern::Dashed,
                linewidth: GRID_LINEWIDTH,
            })
        } else {
            None
        };

        Ok(AxisCall {
            xscale: self.xscale,
            yscale: self.yscale,
            xlim: self.xlim,
            ylim: self.ylim,
            xlabel: self.xlabel.clone(),
            ylabel: self.ylabel.clone(),
            title: self.title.clone(),
            ticks: TickParams {
                direction: "in",
                top: true,
                bottom: true,
                left: true,
                right: true,
                minor_x: self.xscale == AxisScale::Log,
                minor_y: self.yscale == AxisScale::Log,
            },
            x_major,
            x_minor,
            y_major,
            y_minor,
            grid,
        })
    }
}

fn locators(
    what: &str,
    scale: AxisScale,
    spacing: Option<f64>,
) -> StyleResult<(Option<Locator>, Option<Locator>)> {
    if let Some(base) = spacing {
        if !base.is_finite() || base <= 0.0 {
            return Err(StyleError::invalid(format!(
                "{} must be positive, got {}",
                what, base
            )));
        }
    }
    if scale == AxisScale::Log {
        return Ok((
            Some(Locator::Log {
                numticks: LOG_MAJOR_TICKS,
                auto_subs: false,
            }),
            Some(Locator::Log {
                numticks: LOG_MINOR_TICKS,
                auto_subs: true,
            }),
        ));
    }
    Ok((spacing.map(|base| Locator::Multiple { base }), None))
}

/// Apply scales, limits, labels, inward ticks, tick spacing and grid.
pub fn setup_axis<T: PlotTarget + ?Sized>(target: &mut T, setup: &AxisSetup) -> StyleResult<()> {
    target.draw(PlotCommand::Axis(setup.to_call()?))
}

/// Legend settings applied by [`format_legend`].
#[derive(Debug, Clone, PartialEq)]
pub struct LegendFormat {
    loc: String,
    frameon: bool,
    framealpha: f64,
    ncol: usize,
    extra: Kwargs,
}

impl Default for LegendFormat {
    fn default() -> Self {
        LegendFormat {
            loc: "best".to_string(),
            frameon: true,
            framealpha: 0.8,
            ncol: 1,
            extra: Kwargs::new(),
        }
    }
}

impl LegendFormat {
    pub fn new() -> Self {
        LegendFormat::default()
    }

    pub fn loc(mut self, loc: impl Into<String>) -> Self {
        self.loc = loc.into();
        self
    }

    pub fn frameon(mut self, frameon: bool) -> Self {
        self.frameon = frameon;
        self
    }

    pub fn framealpha(mut self, alpha: f64) -> Self {
        self.framealpha = alpha;
        self
    }

    pub fn ncol(mut self, ncol: usize) -> Self {
        self.ncol = ncol;
        self
    }

    /// Pass an extra keyword argument through unchanged.
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Draw the legend with the given formatting.
pub fn format_legend<T: PlotTarget + ?Sized>(target: &mut T, format: &LegendFormat) -> StyleResult<()> {
    check_kwargs(&format.extra, LEGEND_FIELDS)?;
    if format.ncol == 0 {
        return Err(StyleError::invalid("Legend needs at least one column"));
    }
    if !(0.0..=1.0).contains(&format.framealpha) {
        return Err(StyleError::invalid(format!(
            "Legend frame alpha must be in [0, 1], got {}",
            format.framealpha
        )));
    }
    target.draw(PlotCommand::Legend(LegendCall {
        loc: format.loc.clone(),
        frameon: format.frameon,
        framealpha: format.framealpha,
        ncol: format.ncol,
        extra: format.extra.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::target::Recorder;

    fn axis_call(rec: &Recorder) -> &AxisCall {
        match &rec.commands()[0] {
            PlotCommand::Axis(call) => call,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let mut rec = Recorder::new();
        setup_axis(&mut rec, &AxisSetup::new()).unwrap();
        let call = axis_call(&rec);
        assert_eq!(call.xscale, AxisScale::Linear);
        assert_eq!(call.ticks.direction, "in");
        assert!(call.ticks.top && call.ticks.right && call.ticks.bottom && call.ticks.left);
        assert!(call.grid.is_none());
        assert!(call.x_major.is_none());
    }

    #[test]
    fn test_tick_spacing_and_grid() {
        let mut rec = Recorder::new();
        let setup = AxisSetup::new()
            .xlim(0.0, 10.0)
            .xlabel("time")
            .title("Signal")
            .xtick_spacing(2.0)
            .grid(0.3);
        setup_axis(&mut rec, &setup).unwrap();
        let call = axis_call(&rec);
        assert_eq!(call.x_major, Some(Locator::Multiple { base: 2.0 }));
        assert_eq!(call.xlim, Some((0.0, 10.0)));
        let grid = call.grid.as_ref().unwrap();
        assert_eq!(grid.linestyle, DashPattern::Dashed);
        assert_eq!(grid.linewidth, 0.5);
        assert_eq!(grid.alpha, 0.3);
    }

    #[test]
    fn test_log_axis_locators() {
        let mut rec = Recorder::new();
        let setup = AxisSetup::new().yscale(AxisScale::Log).ytick_spacing(10.0);
        setup_axis(&mut rec, &setup).unwrap();
        let call = axis_call(&rec);
        assert!(call.ticks.minor_y);
        assert!(!call.ticks.minor_x);
        assert_eq!(call.y_major, Some(Locator::Log { numticks: 5, auto_subs: false }));
        assert_eq!(call.y_minor, Some(Locator::Log { numticks: 15, auto_subs: true }));
    }

    #[test]
    fn test_invalid_setup() {
        let mut rec = Recorder::new();
        let err = setup_axis(&mut rec, &AxisSetup::new().xtick_spacing(0.0)).unwrap_err();
        assert!(err.is_invalid_argument());
        let err = setup_axis(&mut rec, &AxisSetup::new().ylim(0.0, f64::NAN)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(rec.is_empty());
        assert!("cubic".parse::<AxisScale>().unwrap_err().is_configuration());
        assert_eq!("log".parse::<AxisScale>().unwrap(), AxisScale::Log);
    }

    #[test]
    fn test_format_legend() {
        let mut rec = Recorder::new();
        format_legend(&mut rec, &LegendFormat::new().kwarg("fontsize", 8)).unwrap();
        match &rec.commands()[0] {
            PlotCommand::Legend(call) => {
                assert_eq!(call.loc, "best");
                assert!(call.frameon);
                assert_eq!(call.framealpha, 0.8);
                assert_eq!(call.ncol, 1);
                assert_eq!(call.extra["fontsize"], serde_json::json!(8));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(format_legend(&mut rec, &LegendFormat::new().ncol(0)).is_err());
    }

    #[test]
    fn test_format_legend_rejects_shadowing_kwarg() {
        let mut rec = Recorder::new();
        let err = format_legend(&mut rec, &LegendFormat::new().kwarg("ncol", 3)).unwrap_err();
        assert!(err.is_configuration());
        assert!(rec.is_empty());
    }
}
