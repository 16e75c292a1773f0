//! Styled plotting wrappers.
//!
//! Every data wrapper picks its color the same way: an explicit color wins,
//! otherwise an explicit palette index, otherwise the context's running
//! counter. The counter advances by one only once the call has passed
//! validation. Line widths follow the context's progression when a palette
//! index is known.

use serde_json::Value;

use crate::context::StyleContext;
use crate::error::{StyleError, StyleResult};
use crate::plotting::axis::{self, AxisSetup, LegendFormat};
use crate::plotting::command::{
    check_kwargs, BarCall, Bins, ErrorbarCall, HistCall, Kwargs, LineCall, Orientation,
    PlotCommand, RefLineCall, ScatterCall, SpanCall, BAR_FIELDS, ERRORBAR_FIELDS, HIST_FIELDS,
    LINE_FIELDS, SCATTER_FIELDS,
};
use crate::plotting::data::{check_len, IntoPlotData};
use crate::plotting::target::PlotTarget;
use crate::style::{Color, DashPattern, Marker};

const OUTLINE_EXTRA_WIDTH: f64 = 2.0;
const CENTERLINE_MIN_WIDTH: f64 = 0.5;
const ERRORBAR_LINEWIDTH: f64 = 2.0;

fn check_alpha(alpha: Option<f64>) -> StyleResult<()> {
    match alpha {
        Some(a) if !(0.0..=1.0).contains(&a) => Err(StyleError::invalid(format!(
            "Alpha must be in [0, 1], got {}",
            a
        ))),
        _ => Ok(()),
    }
}

fn check_positive(what: &str, value: f64) -> StyleResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(StyleError::invalid(format!(
            "{} must be positive, got {}",
            what, value
        )));
    }
    Ok(())
}

/// Resolved color for one wrapper call.
struct Pick {
    color: Color,
    index: Option<usize>,
    from_palette: bool,
    /// Taken from the running counter, which still has to advance.
    from_counter: bool,
}

impl StyleContext {
    fn pick_color(&self, color: Option<Color>, color_idx: Option<usize>) -> Pick {
        match (color, color_idx) {
            (Some(color), index) => Pick {
                color,
                index,
                from_palette: false,
                from_counter: false,
            },
            (None, Some(idx)) => Pick {
                color: self.cycle_color(idx),
                index: Some(idx),
                from_palette: true,
                from_counter: false,
            },
            (None, None) => {
                let idx = self.color_cycle_index();
                Pick {
                    color: self.cycle_color(idx),
                    index: Some(idx),
                    from_palette: true,
                    from_counter: true,
                }
            }
        }
    }

    fn commit_pick(&mut self, pick: &Pick) {
        if let (true, Some(idx)) = (pick.from_counter, pick.index) {
            self.set_color_cycle_index(idx + 1);
        }
    }

    fn width_for_pick(&self, pick: &Pick, base: f64) -> StyleResult<f64> {
        match pick.index {
            Some(idx) => self.linewidth_for(idx, Some(base)),
            None => Ok(base),
        }
    }

    /// Line plot with palette color, progressive width and optional
    /// outline and centerline layers.
    pub fn plot_styled<'a, T: PlotTarget + ?Sized>(
        &'a mut self,
        target: &'a mut T,
        x: impl IntoPlotData,
        y: impl IntoPlotData,
    ) -> CurveBuilder<'a, T> {
        CurveBuilder {
            ctx: self,
            target,
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            label: None,
            color: None,
            color_idx: None,
            color_intensity: None,
            linestyle: DashPattern::Solid,
            linewidth: None,
            marker: None,
            markersize: None,
            alpha: None,
            outline: None,
            centerline: None,
            extra: Kwargs::new(),
        }
    }

    /// Scatter plot with palette color.
    pub fn scatter_styled<'a, T: PlotTarget + ?Sized>(
        &'a mut self,
        target: &'a mut T,
        x: impl IntoPlotData,
        y: impl IntoPlotData,
    ) -> ScatterBuilder<'a, T> {
        ScatterBuilder {
            ctx: self,
            target,
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            label: None,
            color: None,
            color_idx: None,
            size: 20.0,
            marker: Marker::Circle,
            alpha: None,
            extra: Kwargs::new(),
        }
    }

    /// Error bar plot with palette color and progressive width.
    pub fn errorbar_styled<'a, T: PlotTarget + ?Sized>(
        &'a mut self,
        target: &'a mut T,
        x: impl IntoPlotData,
        y: impl IntoPlotData,
    ) -> ErrorbarBuilder<'a, T> {
        ErrorbarBuilder {
            ctx: self,
            target,
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            yerr: None,
            xerr: None,
            label: None,
            color: None,
            color_idx: None,
            linewidth: None,
            capsize: 3.0,
            fmt: "o".to_string(),
            extra: Kwargs::new(),
        }
    }

    /// Bar chart with palette fill and black edges.
    pub fn bar_styled<'a, T: PlotTarget + ?Sized>(
        &'a mut self,
        target: &'a mut T,
        x: impl IntoPlotData,
        height: impl IntoPlotData,
    ) -> BarBuilder<'a, T> {
        BarBuilder {
            ctx: self,
            target,
            x: x.into_plot_data(),
            height: height.into_plot_data(),
            label: None,
            color: None,
            color_idx: None,
            edgecolor: Color::BLACK,
            linewidth: 1.0,
            extra: Kwargs::new(),
        }
    }

    /// Histogram with palette fill and white edges.
    pub fn hist_styled<'a, T: PlotTarget + ?Sized>(
        &'a mut self,
        target: &'a mut T,
        x: impl IntoPlotData,
    ) -> HistBuilder<'a, T> {
        HistBuilder {
            ctx: self,
            target,
            x: x.into_plot_data(),
            bins: None,
            label: None,
            color: None,
            color_idx: None,
            edgecolor: Color::WHITE,
            alpha: 0.8,
            extra: Kwargs::new(),
        }
    }

    pub fn add_reference_line<T: PlotTarget + ?Sized>(
        &self,
        target: &mut T,
        lines: &ReferenceLines,
    ) -> StyleResult<()> {
        add_reference_line(target, lines)
    }

    pub fn add_highlight_region<T: PlotTarget + ?Sized>(
        &self,
        target: &mut T,
        region: &HighlightRegion,
    ) -> StyleResult<()> {
        add_highlight_region(target, region)
    }

    pub fn setup_axis<T: PlotTarget + ?Sized>(&self, target: &mut T, setup: &AxisSetup) -> StyleResult<()> {
        axis::setup_axis(target, setup)
    }

    pub fn format_legend<T: PlotTarget + ?Sized>(
        &self,
        target: &mut T,
        format: &LegendFormat,
    ) -> StyleResult<()> {
        axis::format_legend(target, format)
    }
}

/// Extra line drawn behind or on top of a styled curve.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layer {
    color: Color,
    width: Option<f64>,
}

pub struct CurveBuilder<'a, T: PlotTarget + ?Sized> {
    ctx: &'a mut StyleContext,
    target: &'a mut T,
    x: Vec<f64>,
    y: Vec<f64>,
    label: Option<String>,
    color: Option<Color>,
    color_idx: Option<usize>,
    color_intensity: Option<f64>,
    linestyle: DashPattern,
    linewidth: Option<f64>,
    marker: Option<Marker>,
    markersize: Option<f64>,
    alpha: Option<f64>,
    outline: Option<Layer>,
    centerline: Option<Layer>,
    extra: Kwargs,
}

impl<'a, T: PlotTarget + ?Sized> CurveBuilder<'a, T> {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn color_idx(mut self, idx: usize) -> Self {
        self.color_idx = Some(idx);
        self
    }

    /// Lighten a palette color; 1.0 leaves it unchanged.
    pub fn color_intensity(mut self, intensity: f64) -> Self {
        self.color_intensity = Some(intensity);
        self
    }

    pub fn linestyle(mut self, style: DashPattern) -> Self {
        self.linestyle = style;
        self
    }

    /// Base width before progression; defaults to the context's base width.
    pub fn linewidth(mut self, width: f64) -> Self {
        self.linewidth = Some(width);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn markersize(mut self, size: f64) -> Self {
        self.markersize = Some(size);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Black outline behind the line, two points wider than it.
    pub fn outline(self) -> Self {
        self.outline_with(Color::BLACK, None)
    }

    pub fn outline_with(mut self, color: Color, width: Option<f64>) -> Self {
        self.outline = Some(Layer { color, width });
        self
    }

    /// Thin black line on top of the colored line.
    pub fn centerline(self) -> Self {
        self.centerline_with(Color::BLACK, None)
    }

    pub fn centerline_with(mut self, color: Color, width: Option<f64>) -> Self {
        self.centerline = Some(Layer { color, width });
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Draw the curve. Returns the main line's call.
    pub fn build(self) -> StyleResult<LineCall> {
        check_len("y", &self.y, self.x.len())?;
        check_alpha(self.alpha)?;
        check_kwargs(&self.extra, LINE_FIELDS)?;
        let base = self.linewidth.unwrap_or(self.ctx.base_linewidth());
        check_positive("Line width", base)?;
        if let Some(intensity) = self.color_intensity {
            if !(intensity > 0.0 && intensity <= 1.0) {
                return Err(StyleError::invalid(format!(
                    "Color intensity must be in (0, 1], got {}",
                    intensity
                )));
            }
        }

        let pick = self.ctx.pick_color(self.color, self.color_idx);
        let linewidth = self.ctx.width_for_pick(&pick, base)?;
        let color = match self.color_intensity {
            Some(intensity) if pick.from_palette => pick.color.with_intensity(intensity)?,
            _ => pick.color,
        };
        self.ctx.commit_pick(&pick);

        let layer = |color: Color, linewidth: f64, markersize: Option<f64>, zorder: u32| LineCall {
            x: self.x.clone(),
            y: self.y.clone(),
            color,
            linestyle: self.linestyle.clone(),
            linewidth,
            marker: self.marker,
            markersize,
            alpha: self.alpha,
            zorder: Some(zorder),
            label: None,
            extra: self.extra.clone(),
        };

        if let Some(outline) = self.outline {
            let width = outline.width.unwrap_or(linewidth + OUTLINE_EXTRA_WIDTH);
            let call = layer(outline.color, width, self.markersize.map(|m| m + 1.0), 1);
            self.target.draw(PlotCommand::Line(call))?;
        }

        let main = LineCall {
            x: self.x.clone(),
            y: self.y.clone(),
            color,
            linestyle: self.linestyle.clone(),
            linewidth,
            marker: self.marker,
            markersize: self.markersize,
            alpha: self.alpha,
            zorder: self.outline.map(|_| 2),
            label: self.label.clone(),
            extra: self.extra.clone(),
        };
        self.target.draw(PlotCommand::Line(main.clone()))?;

        if let Some(centerline) = self.centerline {
            let width = centerline
                .width
                .unwrap_or_else(|| (linewidth / 3.0).max(CENTERLINE_MIN_WIDTH));
            let call = layer(centerline.color, width, self.markersize.map(|m| m - 1.0), 3);
            self.target.draw(PlotCommand::Line(call))?;
        }
        Ok(main)
    }
}

pub struct ScatterBuilder<'a, T: PlotTarget + ?Sized> {
    ctx: &'a mut StyleContext,
    target: &'a mut T,
    x: Vec<f64>,
    y: Vec<f64>,
    label: Option<String>,
    color: Option<Color>,
    color_idx: Option<usize>,
    size: f64,
    marker: Marker,
    alpha: Option<f64>,
    extra: Kwargs,
}

impl<'a, T: PlotTarget + ?Sized> ScatterBuilder<'a, T> {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn color_idx(mut self, idx: usize) -> Self {
        self.color_idx = Some(idx);
        self
    }

    /// Marker area in points squared.
    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> StyleResult<ScatterCall> {
        check_len("y", &self.y, self.x.len())?;
        check_alpha(self.alpha)?;
        check_positive("Marker size", self.size)?;
        check_kwargs(&self.extra, SCATTER_FIELDS)?;
        let pick = self.ctx.pick_color(self.color, self.color_idx);
        self.ctx.commit_pick(&pick);
        let call = ScatterCall {
            x: self.x,
            y: self.y,
            color: pick.color,
            s: self.size,
            marker: self.marker,
            alpha: self.alpha,
            label: self.label,
            extra: self.extra,
        };
        self.target.draw(PlotCommand::Scatter(call.clone()))?;
        Ok(call)
    }
}

pub struct ErrorbarBuilder<'a, T: PlotTarget + ?Sized> {
    ctx: &'a mut StyleContext,
    target: &'a mut T,
    x: Vec<f64>,
    y: Vec<f64>,
    yerr: Option<Vec<f64>>,
    xerr: Option<Vec<f64>>,
    label: Option<String>,
    color: Option<Color>,
    color_idx: Option<usize>,
    linewidth: Option<f64>,
    capsize: f64,
    fmt: String,
    extra: Kwargs,
}

impl<'a, T: PlotTarget + ?Sized> ErrorbarBuilder<'a, T> {
    pub fn yerr(mut self, err: impl IntoPlotData) -> Self {
        self.yerr = Some(err.into_plot_data());
        self
    }

    pub fn xerr(mut self, err: impl IntoPlotData) -> Self {
        self.xerr = Some(err.into_plot_data());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn color_idx(mut self, idx: usize) -> Self {
        self.color_idx = Some(idx);
        self
    }

    /// Base width before progression; defaults to 2.
    pub fn linewidth(mut self, width: f64) -> Self {
        self.linewidth = Some(width);
        self
    }

    pub fn capsize(mut self, capsize: f64) -> Self {
        self.capsize = capsize;
        self
    }

    /// Format string such as `"o"`, `"s--"`, `"ro"` or `"none"`.
    pub fn fmt(mut self, fmt: impl Into<String>) -> Self {
        self.fmt = fmt.into();
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> StyleResult<ErrorbarCall> {
        let n = self.x.len();
        check_len("y", &self.y, n)?;
        if let Some(err) = &self.yerr {
            check_len("yerr", err, n)?;
        }
        if let Some(err) = &self.xerr {
            check_len("xerr", err, n)?;
        }
        crate::style::parse_format(&self.fmt)?;
        check_kwargs(&self.extra, ERRORBAR_FIELDS)?;
        let base = self.linewidth.unwrap_or(ERRORBAR_LINEWIDTH);
        check_positive("Line width", base)?;

        let pick = self.ctx.pick_color(self.color, self.color_idx);
        let linewidth = self.ctx.width_for_pick(&pick, base)?;
        self.ctx.commit_pick(&pick);
        let call = ErrorbarCall {
            x: self.x,
            y: self.y,
            yerr: self.yerr,
            xerr: self.xerr,
            color: pick.color,
            linewidth,
            capsize: self.capsize,
            fmt: self.fmt,
            label: self.label,
            extra: self.extra,
        };
        self.target.draw(PlotCommand::Errorbar(call.clone()))?;
        Ok(call)
    }
}

pub struct BarBuilder<'a, T: PlotTarget + ?Sized> {
    ctx: &'a mut StyleContext,
    target: &'a mut T,
    x: Vec<f64>,
    height: Vec<f64>,
    label: Option<String>,
    color: Option<Color>,
    color_idx: Option<usize>,
    edgecolor: Color,
    linewidth: f64,
    extra: Kwargs,
}

impl<'a, T: PlotTarget + ?Sized> BarBuilder<'a, T> {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn color_idx(mut self, idx: usize) -> Self {
        self.color_idx = Some(idx);
        self
    }

    pub fn edgecolor(mut self, color: impl Into<Color>) -> Self {
        self.edgecolor = color.into();
        self
    }

    /// Edge line width.
    pub fn linewidth(mut self, width: f64) -> Self {
        self.linewidth = width;
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> StyleResult<BarCall> {
        check_len("height", &self.height, self.x.len())?;
        if !self.linewidth.is_finite() || self.linewidth < 0.0 {
            return Err(StyleError::invalid(format!(
                "Edge width must be non-negative, got {}",
                self.linewidth
            )));
        }
        check_kwargs(&self.extra, BAR_FIELDS)?;
        let pick = self.ctx.pick_color(self.color, self.color_idx);
        self.ctx.commit_pick(&pick);
        let call = BarCall {
            x: self.x,
            height: self.height,
            color: pick.color,
            edgecolor: self.edgecolor,
            linewidth: self.linewidth,
            label: self.label,
            extra: self.extra,
        };
        self.target.draw(PlotCommand::Bar(call.clone()))?;
        Ok(call)
    }
}

pub struct HistBuilder<'a, T: PlotTarget + ?Sized> {
    ctx: &'a mut StyleContext,
    target: &'a mut T,
    x: Vec<f64>,
    bins: Option<Bins>,
    label: Option<String>,
    color: Option<Color>,
    color_idx: Option<usize>,
    edgecolor: Color,
    alpha: f64,
    extra: Kwargs,
}

impl<'a, T: PlotTarget + ?Sized> HistBuilder<'a, T> {
    pub fn bins(mut self, count: usize) -> Self {
        self.bins = Some(Bins::Count(count));
        self
    }

    pub fn bin_edges(mut self, edges: impl IntoPlotData) -> Self {
        self.bins = Some(Bins::Edges(edges.into_plot_data()));
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn color_idx(mut self, idx: usize) -> Self {
        self.color_idx = Some(idx);
        self
    }

    pub fn edgecolor(mut self, color: impl Into<Color>) -> Self {
        self.edgecolor = color.into();
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> StyleResult<HistCall> {
        check_alpha(Some(self.alpha))?;
        match &self.bins {
            Some(Bins::Count(0)) => return Err(StyleError::invalid("Bin count must be at least 1")),
            Some(Bins::Edges(edges)) => {
                if edges.len() < 2 || edges.windows(2).any(|w| !(w[0] < w[1])) {
                    return Err(StyleError::invalid(
                        "Bin edges must hold at least two increasing values",
                    ));
                }
            }
            _ => {}
        }
        check_kwargs(&self.extra, HIST_FIELDS)?;
        let pick = self.ctx.pick_color(self.color, self.color_idx);
        self.ctx.commit_pick(&pick);
        let call = HistCall {
            x: self.x,
            bins: self.bins,
            color: pick.color,
            edgecolor: self.edgecolor,
            alpha: self.alpha,
            label: self.label,
            extra: self.extra,
        };
        self.target.draw(PlotCommand::Hist(call.clone()))?;
        Ok(call)
    }
}

/// Horizontal and vertical reference lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLines {
    horizontal: Vec<f64>,
    vertical: Vec<f64>,
    color: Color,
    linestyle: DashPattern,
    linewidth: f64,
    alpha: f64,
    label: Option<String>,
}

impl Default for ReferenceLines {
    fn default() -> Self {
        ReferenceLines {
            horizontal: Vec::new(),
            vertical: Vec::new(),
            color: Color::BLACK,
            linestyle: DashPattern::Dashed,
            linewidth: 0.5,
            alpha: 0.3,
            label: None,
        }
    }
}

impl ReferenceLines {
    pub fn new() -> Self {
        ReferenceLines::default()
    }

    /// Add a horizontal line at `y`.
    pub fn horizontal(mut self, y: f64) -> Self {
        self.horizontal.push(y);
        self
    }

    /// Add a vertical line at `x`.
    pub fn vertical(mut self, x: f64) -> Self {
        self.vertical.push(x);
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn linestyle(mut self, style: DashPattern) -> Self {
        self.linestyle = style;
        self
    }

    pub fn linewidth(mut self, width: f64) -> Self {
        self.linewidth = width;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Legend label, attached to the first line only.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Draw reference lines. The label goes on the first horizontal line, or
/// on the first vertical line when there are no horizontal ones.
pub fn add_reference_line<T: PlotTarget + ?Sized>(target: &mut T, lines: &ReferenceLines) -> StyleResult<()> {
    check_alpha(Some(lines.alpha))?;
    check_positive("Line width", lines.linewidth)?;
    let make = |orientation, value, first: bool| RefLineCall {
        orientation,
        value,
        color: lines.color,
        linestyle: lines.linestyle.clone(),
        linewidth: lines.linewidth,
        alpha: lines.alpha,
        label: if first { lines.label.clone() } else { None },
    };
    for (i, &y) in lines.horizontal.iter().enumerate() {
        target.draw(PlotCommand::ReferenceLine(make(Orientation::Horizontal, y, i == 0)))?;
    }
    let label_vertical = lines.horizontal.is_empty();
    for (i, &x) in lines.vertical.iter().enumerate() {
        let first = label_vertical && i == 0;
        target.draw(PlotCommand::ReferenceLine(make(Orientation::Vertical, x, first)))?;
    }
    Ok(())
}

/// A shaded band across the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightRegion {
    xmin: Option<f64>,
    xmax: Option<f64>,
    ymin: Option<f64>,
    ymax: Option<f64>,
    color: Color,
    alpha: f64,
    label: Option<String>,
}

impl Default for HighlightRegion {
    fn default() -> Self {
        HighlightRegion {
            xmin: None,
            xmax: None,
            ymin: None,
            ymax: None,
            color: Color::gray(0.85),
            alpha: 0.5,
            label: None,
        }
    }
}

impl HighlightRegion {
    pub fn new() -> Self {
        HighlightRegion::default()
    }

    pub fn x_range(mut self, min: f64, max: f64) -> Self {
        self.xmin = Some(min);
        self.xmax = Some(max);
        self
    }

    pub fn y_range(mut self, min: f64, max: f64) -> Self {
        self.ymin = Some(min);
        self.ymax = Some(max);
        self
    }

    pub fn xmin(mut self, v: f64) -> Self {
        self.xmin = Some(v);
        self
    }

    pub fn xmax(mut self, v: f64) -> Self {
        self.xmax = Some(v);
        self
    }

    pub fn ymin(mut self, v: f64) -> Self {
        self.ymin = Some(v);
        self
    }

    pub fn ymax(mut self, v: f64) -> Self {
        self.ymax = Some(v);
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Shade a band. A complete y range takes precedence over an x range.
pub fn add_highlight_region<T: PlotTarget + ?Sized>(
    target: &mut T,
    region: &HighlightRegion,
) -> StyleResult<()> {
    check_alpha(Some(region.alpha))?;
    let (orientation, min, max) = match (region.ymin, region.ymax, region.xmin, region.xmax) {
        (Some(lo), Some(hi), _, _) => (Orientation::Horizontal, lo, hi),
        (_, _, Some(lo), Some(hi)) => (Orientation::Vertical, lo, hi),
        _ => {
            return Err(StyleError::invalid(
                "Highlight region needs both ymin and ymax or both xmin and xmax",
            ))
        }
    };
    if !min.is_finite() || !max.is_finite() {
        return Err(StyleError::invalid(format!(
            "Highlight bounds must be finite, got ({}, {})",
            min, max
        )));
    }
    target.draw(PlotCommand::Span(SpanCall {
        orientation,
        min,
        max,
        color: region.color,
        alpha: region.alpha,
        label: region.label.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleOptions;
    use crate::plotting::target::Recorder;

    fn lines(rec: &Recorder) -> Vec<&LineCall> {
        rec.commands()
            .iter()
            .filter_map(|c| match c {
                PlotCommand::Line(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_plot_uses_counter() {
        let mut ctx = StyleContext::new().unwrap();
        let mut rec = Recorder::new();
        let first = ctx.plot_styled(&mut rec, [0.0, 1.0], [1.0, 2.0]).build().unwrap();
        let second = ctx.plot_styled(&mut rec, [0.0, 1.0], [2.0, 3.0]).build().unwrap();
        assert_eq!(first.color, ctx.cycle_color(0));
        assert_eq!(second.color, ctx.cycle_color(1));
        assert_eq!(ctx.color_cycle_index(), 2);
        assert_eq!(first.linewidth, 2.0);
        assert_eq!(first.zorder, None);
    }

    #[test]
    fn test_plot_explicit_color_keeps_counter() {
        let mut ctx = StyleContext::new().unwrap();
        let mut rec = Recorder::new();
        let call = ctx
            .plot_styled(&mut rec, [0.0], [0.0])
            .color(Color::RED)
            .build()
            .unwrap();
        assert_eq!(call.color, Color::RED);
        assert_eq!(ctx.color_cycle_index(), 0);

        let call = ctx.plot_styled(&mut rec, [0.0], [0.0]).color_idx(3).build().unwrap();
        assert_eq!(call.color, ctx.cycle_color(3));
        assert_eq!(ctx.color_cycle_index(), 0);
    }

    #[test]
    fn test_plot_progressive_width() {
        let mut ctx =
            StyleContext::from_options(&StyleOptions::default().vary_linewidth(2.0, 1.3)).unwrap();
        let mut rec = Recorder::new();
        let widths: Vec<f64> = (0..3)
            .map(|_| ctx.plot_styled(&mut rec, [0.0], [0.0]).build().unwrap().linewidth)
            .collect();
        assert_eq!(widths[0], 2.0);
        assert!((widths[1] - 2.6).abs() < 1e-9);
        assert!((widths[2] - 3.38).abs() < 1e-9);

        let call = ctx
            .plot_styled(&mut rec, [0.0], [0.0])
            .color(Color::BLUE)
            .build()
            .unwrap();
        assert_eq!(call.linewidth, 2.0);
    }

    #[test]
    fn test_plot_outline_and_centerline() {
        let mut ctx = StyleContext::new().unwrap();
        let mut rec = Recorder::new();
        ctx.plot_styled(&mut rec, [0.0, 1.0], [0.0, 1.0])
            .label("signal")
            .linewidth(3.0)
            .markersize(6.0)
            .outline()
            .centerline()
            .build()
            .unwrap();
        let drawn = lines(&rec);
        assert_eq!(drawn.len(), 3);
        assert_eq!(drawn[0].zorder, Some(1));
        assert_eq!(drawn[0].linewidth, 5.0);
        assert_eq!(drawn[0].markersize, Some(7.0));
        assert_eq!(drawn[0].color, Color::BLACK);
        assert_eq!(drawn[0].label, None);
        assert_eq!(drawn[1].zorder, Some(2));
        assert_eq!(drawn[1].label.as_deref(), Some("signal"));
        assert_eq!(drawn[2].zorder, Some(3));
        assert_eq!(drawn[2].linewidth, 1.0);
        assert_eq!(drawn[2].markersize, Some(5.0));
    }

    #[test]
    fn test_centerline_minimum_width() {
        let mut ctx = StyleContext::new().unwrap();
        let mut rec = Recorder::new();
        ctx.plot_styled(&mut rec, [0.0], [0.0])
            .linewidth(1.0)
            .centerline()
            .build()
            .unwrap();
        let drawn = lines(&rec);
        assert_eq!(drawn[1].linewidth, 0.5);
        assert_eq!(drawn[0].zorder, None);
    }

    #[test]
    fn test_plot_intensity() {
        let mut ctx = StyleContext::new().unwrap();
        let mut rec = Recorder::new();
        let call = ctx
            .plot_styled(&mut rec, [0.0], [0.0])
            .color_idx(0)
            .color_intensity(0.5)
            .build()
            .unwrap();
        assert_eq!(call.color, ctx.cycle_color(0).with_intensity(0.5).unwrap());
        let err = ctx
            .plot_styled(&mut rec, [0.0], [0.0])
            .color_intensity(1.5)
            .build()
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_plot_length_mismatch_keeps_counter() {
        let mut ctx = StyleContext::new().unwrap();
        let mut rec = Recorder::new();
        let err = ctx.plot_styled(&mut rec, [0.0, 1.0], [0.0]).build().unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(ctx.color_cycle_index(), 0);
        assert!(rec.is_empty());
    }

    #[test]
    fn test_plot_kwargs_passthrough() {
        let mut ctx = StyleContext::new().unwrap();
        let mut rec = Recorder::new();
        let call = ctx
            .plot_styled(&mut rec, [0.0], [0.0])
            .kwarg("drawstyle", "steps-mid")
            .build()
            .unwrap();
        assert_eq!(call.extra["drawstyle"], Value::from("steps-mid"));
    }

    #[test]
    fn test_scatter_defaults() {
        let mut ctx = StyleContext::new().unwrap();
        let mut rec = Recorder::new();
        let call = ctx.scatter_styled(&mut rec, [1.0, 2.0], [3.0, 4.0]).build().unwrap();
        assert_eq!(call.s, 20.0);
        assert_eq!(call.marker, Marker::Circle);
        assert_eq!(call.color, ctx.cycle_color(0));
        assert_eq!(ctx.color_cycle_index(), 1);
    }

    #[test]
    fn test_errorbar() {
        let mut ctx = StyleContext::new().unwrap();
        let mut rec = Recorder::new();
        let call = ctx
            .errorbar_styled(&mut rec, [1.0, 2.0], [3.0, 4.0])
            .yerr([0.1, 0.2])
            .build()
            .unwrap();
        assert_eq!(call.capsize, 3.0);
        assert_eq!(call.fmt, "o");
        assert_eq!(call.linewidth, 2.0);

        let err = ctx
            .errorbar_styled(&mut rec, [1.0, 2.0], [3.0, 4.0])
            .xerr([0.1])
            .build()
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(ctx.color_cycle_index(), 1);
    }

    #[test]
    fn test_errorbar_format_strings() {
        let mut ctx = StyleContext::new().unwrap();
        let mut rec = Recorder::new();
        for fmt in ["ro", "k-", "none", "bs--"] {
            let call = ctx
                .errorbar_styled(&mut rec, [1.0], [2.0])
                .fmt(fmt)
                .build()
                .unwrap();
            assert_eq!(call.fmt, fmt);
        }
        let err = ctx
            .errorbar_styled(&mut rec, [1.0], [2.0])
            .fmt("q")
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(ctx.color_cycle_index(), 4);
        assert_eq!(rec.len(), 4);
    }

    #[test]
    fn test_errorbar_width_ignores_preset() {
        let mut ctx = StyleContext::new().unwrap();
        ctx.apply_preset("nature").unwrap();
        assert_eq!(ctx.base_linewidth(), 1.0);
        let mut rec = Recorder::new();
        let call = ctx.errorbar_styled(&mut rec, [1.0], [2.0]).build().unwrap();
        assert_eq!(call.linewidth, 2.0);

        let mut ctx =
            StyleContext::from_options(&StyleOptions::default().vary_linewidth(1.0, 1.5)).unwrap();
        ctx.set_color_cycle_index(1);
        let call = ctx.errorbar_styled(&mut rec, [1.0], [2.0]).build().unwrap();
        assert_eq!(call.linewidth, 3.0);
    }

    #[test]
    fn test_kwarg_shadowing_styled_field() {
        let mut ctx = StyleContext::new().unwrap();
        let mut rec = Recorder::new();
        let err = ctx
            .plot_styled(&mut rec, [0.0], [0.0])
            .kwarg("linewidth", 9.0)
            .kwarg("color", "red")
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(ctx.color_cycle_index(), 0);
        assert!(rec.is_empty());

        let err = ctx
            .bar_styled(&mut rec, [0.0], [1.0])
            .kwarg("edgecolor", "red")
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
        let err = ctx
            .errorbar_styled(&mut rec, [0.0], [1.0])
            .kwarg("capsize", 5)
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
        let err = ctx
            .scatter_styled(&mut rec, [0.0], [1.0])
            .kwarg("kind", "line")
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(ctx
            .hist_styled(&mut rec, vec![1.0])
            .kwarg("bins", 3)
            .build()
            .unwrap_err()
            .is_configuration());
        assert_eq!(ctx.color_cycle_index(), 0);
        assert!(rec.is_empty());
    }

    #[test]
    fn test_overflowing_width_keeps_counter() {
        let mut ctx =
            StyleContext::from_options(&StyleOptions::default().vary_linewidth(2.0, 10.0)).unwrap();
        ctx.set_color_cycle_index(400);
        let mut rec = Recorder::new();
        let err = ctx.plot_styled(&mut rec, [0.0], [0.0]).build().unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(ctx.color_cycle_index(), 400);
        let err = ctx.errorbar_styled(&mut rec, [0.0], [0.0]).build().unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(ctx.color_cycle_index(), 400);
        assert!(rec.is_empty());
    }

    #[test]
    fn test_shrinking_width_underflows() {
        let mut ctx =
            StyleContext::from_options(&StyleOptions::default().vary_linewidth(2.0, 0.5)).unwrap();
        ctx.set_color_cycle_index(1100);
        let mut rec = Recorder::new();
        let call = ctx.plot_styled(&mut rec, [0.0], [0.0]).build().unwrap();
        assert_eq!(call.linewidth, 0.0);
        assert_eq!(ctx.color_cycle_index(), 1101);
    }

    #[test]
    fn test_bar_and_hist_defaults() {
        let mut ctx = StyleContext::new().unwrap();
        let mut rec = Recorder::new();
        let bar = ctx.bar_styled(&mut rec, [0.0, 1.0], [5.0, 3.0]).build().unwrap();
        assert_eq!(bar.edgecolor, Color::BLACK);
        assert_eq!(bar.linewidth, 1.0);

        let hist = ctx
            .hist_styled(&mut rec, vec![1.0, 2.0, 2.5, 3.0])
            .bins(4)
            .build()
            .unwrap();
        assert_eq!(hist.edgecolor, Color::WHITE);
        assert_eq!(hist.alpha, 0.8);
        assert_eq!(hist.bins, Some(Bins::Count(4)));
        assert_eq!(hist.color, ctx.cycle_color(1));

        let err = ctx
            .hist_styled(&mut rec, vec![1.0])
            .bin_edges([1.0, 0.0])
            .build()
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_reference_line_labels() {
        let mut rec = Recorder::new();
        let refs = ReferenceLines::new()
            .horizontal(0.0)
            .horizontal(1.0)
            .vertical(2.0)
            .label("baseline");
        add_reference_line(&mut rec, &refs).unwrap();
        let labels: Vec<Option<&str>> = rec.commands().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec![Some("baseline"), None, None]);

        let mut rec = Recorder::new();
        add_reference_line(&mut rec, &ReferenceLines::new().vertical(1.0).vertical(2.0).label("t0")).unwrap();
        let labels: Vec<Option<&str>> = rec.commands().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec![Some("t0"), None]);
        match &rec.commands()[0] {
            PlotCommand::ReferenceLine(call) => {
                assert_eq!(call.orientation, Orientation::Vertical);
                assert_eq!(call.color, Color::BLACK);
                assert_eq!(call.linestyle, DashPattern::Dashed);
                assert_eq!(call.linewidth, 0.5);
                assert_eq!(call.alpha, 0.3);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_highlight_region() {
        let mut rec = Recorder::new();
        let region = HighlightRegion::new().x_range(1.0, 2.0).y_range(3.0, 4.0);
        add_highlight_region(&mut rec, &region).unwrap();
        match &rec.commands()[0] {
            PlotCommand::Span(call) => {
                assert_eq!(call.orientation, Orientation::Horizontal);
                assert_eq!((call.min, call.max), (3.0, 4.0));
                assert_eq!(call.color, Color::gray(0.85));
                assert_eq!(call.alpha, 0.5);
            }
            other => panic!("unexpected {:?}", other),
        }

        add_highlight_region(&mut rec, &HighlightRegion::new().xmin(1.0).xmax(2.0)).unwrap();
        assert!(matches!(
            &rec.commands()[1],
            PlotCommand::Span(SpanCall { orientation: Orientation::Vertical, .. })
        ));

        let err = add_highlight_region(&mut rec, &HighlightRegion::new().xmin(1.0).ymax(2.0)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(rec.len(), 2);
    }
}
