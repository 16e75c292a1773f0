//! Per-thread default style context.
//!
//! Convenience layer for callers that do not want to pass a
//! [`StyleContext`] around. Each thread gets its own context, created with
//! the default options on first use.

use std::cell::RefCell;

use serde_json::Value;

use crate::config::StyleOptions;
use crate::context::{StyleChoice, StyleContext};
use crate::error::{StyleError, StyleResult};
use crate::style::preset::RcParams;

thread_local! {
    static CONTEXT: RefCell<Option<StyleContext>> = const { RefCell::new(None) };
}

/// Run `f` against this thread's context.
///
/// Calling back into this module from inside `f` is an error.
pub fn with_style<T>(f: impl FnOnce(&mut StyleContext) -> StyleResult<T>) -> StyleResult<T> {
    CONTEXT.with(|cell| {
        let mut slot = cell
            .try_borrow_mut()
            .map_err(|_| StyleError::config("Style context is already in use on this thread"))?;
        if slot.is_none() {
            *slot = Some(StyleContext::new()?);
        }
        match slot.as_mut() {
            Some(ctx) => f(ctx),
            None => Err(StyleError::config("Style context is not initialized")),
        }
    })
}

pub fn initialize(options: &StyleOptions) -> StyleResult<()> {
    with_style(|ctx| ctx.initialize(options))
}

pub fn initialize_from_value(options: Value) -> StyleResult<()> {
    with_style(|ctx| ctx.initialize_from_value(options))
}

pub fn apply_preset(name: &str) -> StyleResult<()> {
    with_style(|ctx| ctx.apply_preset(name))
}

pub fn apply_preset_with(name: &str, overrides: &RcParams) -> StyleResult<()> {
    with_style(|ctx| ctx.apply_preset_with(name, overrides))
}

pub fn next_style(color_idx: Option<usize>) -> StyleResult<StyleChoice> {
    with_style(|ctx| ctx.next_style(color_idx))
}

pub fn reset_color_cycle() -> StyleResult<()> {
    with_style(|ctx| {
        ctx.reset_color_cycle();
        Ok(())
    })
}

/// A copy of this thread's context.
pub fn get_style() -> StyleResult<StyleContext> {
    with_style(|ctx| Ok(ctx.clone()))
}

/// Run `f` with a preset applied to this thread's context; the previous
/// settings are restored afterwards, also when `f` panics.
pub fn style_context<T>(preset: &str, f: impl FnOnce() -> T) -> StyleResult<T> {
    let saved = get_style()?;
    apply_preset(preset)?;
    let _restore = Restore(Some(saved));
    Ok(f())
}

struct Restore(Option<StyleContext>);

impl Drop for Restore {
    fn drop(&mut self) {
        if let Some(saved) = self.0.take() {
            CONTEXT.with(|cell| {
                if let Ok(mut slot) = cell.try_borrow_mut() {
                    *slot = Some(saved);
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Preset;

    #[test]
    fn test_lazy_default() {
        let ctx = get_style().unwrap();
        assert_eq!(ctx.palette_name(), "viridis");
    }

    #[test]
    fn test_counter_shared_between_calls() {
        reset_color_cycle().unwrap();
        assert_eq!(next_style(None).unwrap().index, 0);
        assert_eq!(next_style(None).unwrap().index, 1);
        reset_color_cycle().unwrap();
        assert_eq!(next_style(None).unwrap().index, 0);
    }

    #[test]
    fn test_style_context_restores() {
        apply_preset("default").unwrap();
        let inner = style_context("poster", || get_style().unwrap().fonts().medium).unwrap();
        assert_eq!(inner, 24.0);
        assert_eq!(get_style().unwrap().preset(), Preset::Default);
    }

    #[test]
    fn test_style_context_unknown_preset() {
        apply_preset("default").unwrap();
        assert!(style_context("xyz", || ()).unwrap_err().is_configuration());
        assert_eq!(get_style().unwrap().preset(), Preset::Default);
    }

    #[test]
    fn test_reentrant_call_rejected() {
        let err = with_style(|_| next_style(None)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_threads_are_independent() {
        initialize(&StyleOptions::default().palette("tab10", 3)).unwrap();
        let other = std::thread::spawn(|| get_style().unwrap().palette().len())
            .join()
            .unwrap();
        assert_eq!(other, 10);
        assert_eq!(get_style().unwrap().palette().len(), 3);
    }
}
