//! Drawing calls forwarded to a plotting engine.
//!
//! Each styled wrapper turns its arguments into one or more
//! [`PlotCommand`]s. Keyword arguments the wrapper does not interpret are
//! carried in `extra` and flattened into the serialized call.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::{StyleError, StyleResult};
use crate::style::{Color, DashPattern, Marker};

/// Passthrough keyword arguments.
pub type Kwargs = IndexMap<String, Value>;

pub(crate) const LINE_FIELDS: &[&str] = &[
    "x", "y", "color", "linestyle", "linewidth", "marker", "markersize", "alpha", "zorder", "label",
];
pub(crate) const SCATTER_FIELDS: &[&str] = &["x", "y", "color", "s", "marker", "alpha", "label"];
pub(crate) const ERRORBAR_FIELDS: &[&str] = &[
    "x", "y", "yerr", "xerr", "color", "linewidth", "capsize", "fmt", "label",
];
pub(crate) const BAR_FIELDS: &[&str] = &["x", "height", "color", "edgecolor", "linewidth", "label"];
pub(crate) const HIST_FIELDS: &[&str] = &["x", "bins", "color", "edgecolor", "alpha", "label"];
pub(crate) const LEGEND_FIELDS: &[&str] = &["loc", "frameon", "framealpha", "ncol"];

/// Reject passthrough keys that would shadow a field the wrapper sets, or
/// the `kind` tag.
pub(crate) fn check_kwargs(extra: &Kwargs, fields: &[&str]) -> StyleResult<()> {
    match extra
        .keys()
        .find(|key| key.as_str() == "kind" || fields.contains(&key.as_str()))
    {
        Some(key) => Err(StyleError::config(format!(
            "Keyword '{}' conflicts with a styled argument",
            key
        ))),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineCall {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Color,
    pub linestyle: DashPattern,
    pub linewidth: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markersize: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zorder: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Kwargs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterCall {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Color,
    /// Marker area in points squared
    pub s: f64,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Kwargs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorbarCall {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yerr: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xerr: Option<Vec<f64>>,
    pub color: Color,
    pub linewidth: f64,
    pub capsize: f64,
    pub fmt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Kwargs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarCall {
    pub x: Vec<f64>,
    pub height: Vec<f64>,
    pub color: Color,
    pub edgecolor: Color,
    /// Edge line width
    pub linewidth: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Kwargs,
}

/// Histogram binning: a bin count or explicit edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Bins {
    Count(usize),
    Edges(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistCall {
    pub x: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<Bins>,
    pub color: Color,
    pub edgecolor: Color,
    pub alpha: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Kwargs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Spans the x axis at a fixed y
    Horizontal,
    /// Spans the y axis at a fixed x
    Vertical,
}

/// A line across the whole axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefLineCall {
    pub orientation: Orientation,
    pub value: f64,
    pub color: Color,
    pub linestyle: DashPattern,
    pub linewidth: f64,
    pub alpha: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A shaded band across the whole axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanCall {
    pub orientation: Orientation,
    pub min: f64,
    pub max: f64,
    pub color: Color,
    pub alpha: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendCall {
    pub loc: String,
    pub frameon: bool,
    pub framealpha: f64,
    pub ncol: usize,
    #[serde(flatten)]
    pub extra: Kwargs,
}

/// Axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
    Symlog,
    Logit,
}

/// Tick placement rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Locator {
    /// Ticks at every multiple of `base`
    Multiple { base: f64 },
    /// Logarithmic ticks, at most `numticks` of them
    Log { numticks: usize, auto_subs: bool },
}

/// Tick direction and placement on all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickParams {
    pub direction: &'static str,
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    /// Also style minor ticks on the x axis
    pub minor_x: bool,
    /// Also style minor ticks on the y axis
    pub minor_y: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCall {
    pub alpha: f64,
    pub linestyle: DashPattern,
    pub linewidth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisCall {
    pub xscale: AxisScale,
    pub yscale: AxisScale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xlim: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ylim: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xlabel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ylabel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub ticks: TickParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_major: Option<Locator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_minor: Option<Locator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_major: Option<Locator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_minor: Option<Locator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridCall>,
}

/// One call to the plotting engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlotCommand {
    Line(LineCall),
    Scatter(ScatterCall),
    Errorbar(ErrorbarCall),
    Bar(BarCall),
    Hist(HistCall),
    ReferenceLine(RefLineCall),
    Span(SpanCall),
    Axis(AxisCall),
    Legend(LegendCall),
}

impl PlotCommand {
    /// Name of the call, as used in the serialized form.
    pub fn kind(&self) -> &'static str {
        match self {
            PlotCommand::Line(_) => "line",
            PlotCommand::Scatter(_) => "scatter",
            PlotCommand::Errorbar(_) => "errorbar",
            PlotCommand::Bar(_) => "bar",
            PlotCommand::Hist(_) => "hist",
            PlotCommand::ReferenceLine(_) => "reference_line",
            PlotCommand::Span(_) => "span",
            PlotCommand::Axis(_) => "axis",
            PlotCommand::Legend(_) => "legend",
        }
    }

    /// The color the call draws with, if it has one.
    pub fn color(&self) -> Option<Color> {
        match self {
            PlotCommand::Line(c) => Some(c.color),
            PlotCommand::Scatter(c) => Some(c.color),
            PlotCommand::Errorbar(c) => Some(c.color),
            PlotCommand::Bar(c) => Some(c.color),
            PlotCommand::Hist(c) => Some(c.color),
            PlotCommand::ReferenceLine(c) => Some(c.color),
            PlotCommand::Span(c) => Some(c.color),
            PlotCommand::Axis(_) | PlotCommand::Legend(_) => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            PlotCommand::Line(c) => c.label.as_deref(),
            PlotCommand::Scatter(c) => c.label.as_deref(),
            PlotCommand::Errorbar(c) => c.label.as_deref(),
            PlotCommand::Bar(c) => c.label.as_deref(),
            PlotCommand::Hist(c) => c.label.as_deref(),
            PlotCommand::ReferenceLine(c) => c.label.as_deref(),
            PlotCommand::Span(c) => c.label.as_deref(),
            PlotCommand::Axis(_) | PlotCommand::Legend(_) => None,
        }
    }
}
