//! Styled plotting wrappers.
//! Calls are forwarded to a [`PlotTarget`] as [`PlotCommand`]s.

pub mod axis;
pub mod command;
pub mod data;
pub mod styled;
pub mod target;

pub use axis::{format_legend, setup_axis, AxisSetup, LegendFormat};
pub use command::{AxisScale, Bins, Kwargs, Locator, Orientation, PlotCommand};
pub use data::IntoPlotData;
pub use styled::{
    add_highlight_region, add_reference_line, BarBuilder, CurveBuilder, ErrorbarBuilder,
    HighlightRegion, HistBuilder, ReferenceLines, ScatterBuilder,
};
pub use target::{PlotTarget, Recorder};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::context::StyleContext;
    pub use crate::plotting::axis::{AxisSetup, LegendFormat};
    pub use crate::plotting::command::AxisScale;
    pub use crate::plotting::data::IntoPlotData;
    pub use crate::plotting::styled::{HighlightRegion, ReferenceLines};
    pub use crate::plotting::target::{PlotTarget, Recorder};
    pub use crate::style::{Color, DashPattern, Marker};
}
