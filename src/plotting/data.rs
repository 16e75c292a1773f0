//! Conversion of numeric sequences into plot series.

use crate::error::{StyleError, StyleResult};

/// Types that can be passed as a data series.
pub trait IntoPlotData {
    fn into_plot_data(self) -> Vec<f64>;
}

impl IntoPlotData for Vec<f64> {
    fn into_plot_data(self) -> Vec<f64> {
        self
    }
}

impl IntoPlotData for &Vec<f64> {
    fn into_plot_data(self) -> Vec<f64> {
        self.clone()
    }
}

impl IntoPlotData for &[f64] {
    fn into_plot_data(self) -> Vec<f64> {
        self.to_vec()
    }
}

impl<const N: usize> IntoPlotData for [f64; N] {
    fn into_plot_data(self) -> Vec<f64> {
        self.to_vec()
    }
}

impl<const N: usize> IntoPlotData for &[f64; N] {
    fn into_plot_data(self) -> Vec<f64> {
        self.to_vec()
    }
}

macro_rules! impl_lossy_series {
    ($($t:ty),*) => {
        $(
            impl IntoPlotData for Vec<$t> {
                fn into_plot_data(self) -> Vec<f64> {
                    self.into_iter().map(|v| v as f64).collect()
                }
            }

            impl IntoPlotData for &[$t] {
                fn into_plot_data(self) -> Vec<f64> {
                    self.iter().map(|v| *v as f64).collect()
                }
            }

            impl<const N: usize> IntoPlotData for [$t; N] {
                fn into_plot_data(self) -> Vec<f64> {
                    self.iter().map(|v| *v as f64).collect()
                }
            }
        )*
    };
}

impl_lossy_series!(f32, i32, i64, u32, usize);

/// Fail unless `series` has `expected` points.
pub(crate) fn check_len(what: &str, series: &[f64], expected: usize) -> StyleResult<()> {
    if series.len() != expected {
        return Err(StyleError::invalid(format!(
            "{} has {} points, expected {}",
            what,
            series.len(),
            expected
        )));
    }
    Ok(())
}
