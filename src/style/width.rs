//! Progressive line widths.
//!
//! Giving every successive line a geometrically thicker stroke keeps series
//! distinguishable when colors alone are not (grayscale print, color vision
//! deficiencies).

use crate::error::{StyleError, StyleResult};

/// Line width for the `n`-th series: `base * factor^n`. Shrinking
/// progressions may underflow to zero; only overflow is an error.
pub fn width_for(n: i64, base: f64, factor: f64) -> StyleResult<f64> {
    if n < 0 {
        return Err(StyleError::invalid(format!(
            "Line index must be non-negative, got {}",
            n
        )));
    }
    validate_progression(base, factor)?;
    let width = base * factor.powf(n as f64);
    if !width.is_finite() {
        return Err(StyleError::invalid(format!(
            "Line width for index {} overflows (base {}, factor {})",
            n, base, factor
        )));
    }
    Ok(width)
}

/// Check the parameters of a width progression.
pub fn validate_progression(base: f64, factor: f64) -> StyleResult<()> {
    if !base.is_finite() || base <= 0.0 {
        return Err(StyleError::invalid(format!(
            "Base line width must be positive, got {}",
            base
        )));
    }
    if !factor.is_finite() || factor <= 0.0 {
        return Err(StyleError::invalid(format!(
            "Line width progression factor must be positive, got {}",
            factor
        )));
    }
    Ok(())
}

/// The first `count` widths of a progression.
pub fn progression(count: usize, base: f64, factor: f64) -> StyleResult<Vec<f64>> {
    (0..count as i64).map(|n| width_for(n, base, factor)).collect()
}
