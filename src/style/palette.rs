//! Discrete color palettes built from named colormaps.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, Mutex, OnceLock};

use log::{debug, warn};
use serde::Serialize;

use super::color::Color;
use super::colormap::{self, Category, Colormap, Provider};
use crate::error::{StyleError, StyleResult};

/// Palette used when nothing else is configured.
pub const DEFAULT_PALETTE_NAME: &str = "viridis";
/// Number of colors in the default palette.
pub const DEFAULT_PALETTE_SIZE: usize = 10;

/// Map substituted for extended-only names when the extended provider is absent.
const FALLBACK_COLORMAP: &str = "viridis";

/// How palette names are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteStrategy {
    /// Base and seaborn-style maps
    Extended,
    /// Base maps only; extended names fall back to viridis
    Base,
}

static STRATEGY: OnceLock<PaletteStrategy> = OnceLock::new();

impl PaletteStrategy {
    /// Probe which provider is compiled in.
    pub fn detect() -> Self {
        if cfg!(feature = "extended-palettes") {
            PaletteStrategy::Extended
        } else {
            PaletteStrategy::Base
        }
    }

    /// The process-wide strategy, probed once.
    pub fn current() -> Self {
        *STRATEGY.get_or_init(|| {
            let strategy = PaletteStrategy::detect();
            debug!("Palette strategy: {:?}", strategy);
            strategy
        })
    }

    /// Whether maps from `provider` are available under this strategy.
    pub fn provides(&self, provider: Provider) -> bool {
        match self {
            PaletteStrategy::Extended => true,
            PaletteStrategy::Base => provider == Provider::Base,
        }
    }

    /// Resolve a palette name to a colormap and reversal flag.
    pub fn lookup(&self, name: &str) -> StyleResult<(&'static Colormap, bool)> {
        let (cmap, reversed) = colormap::find(name).ok_or_else(|| {
            StyleError::config(format!(
                "Unknown palette '{}'. Available: {}",
                name,
                self.available_names().join(", ")
            ))
        })?;

        if self.provides(cmap.provider) {
            return Ok((cmap, reversed));
        }

        warn!(
            "Palette '{}' needs the extended palette provider; falling back to '{}'",
            name, FALLBACK_COLORMAP
        );
        colormap::find(FALLBACK_COLORMAP).ok_or_else(|| {
            StyleError::config(format!("Fallback palette '{}' is missing", FALLBACK_COLORMAP))
        })
    }

    fn available_names(&self) -> Vec<&'static str> {
        colormap::all()
            .iter()
            .filter(|c| self.provides(c.provider))
            .map(|c| c.name)
            .collect()
    }
}

/// An ordered, indexable sequence of colors sampled from a colormap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    name: String,
    source: String,
    colors: Vec<Color>,
}

impl Palette {
    /// Build a palette of `size` colors from the named colormap.
    pub fn new(name: &str, size: usize) -> StyleResult<Self> {
        Palette::with_strategy(name, size, PaletteStrategy::current())
    }

    /// Build a palette using an explicit resolution strategy.
    pub fn with_strategy(name: &str, size: usize, strategy: PaletteStrategy) -> StyleResult<Self> {
        if size == 0 {
            return Err(StyleError::invalid("Palette size must be at least 1"));
        }
        let (cmap, reversed) = strategy.lookup(name)?;
        let source = if reversed {
            format!("{}_r", cmap.name)
        } else {
            cmap.name.to_string()
        };
        debug!("Building palette '{}' from '{}' with {} colors", name, source, size);
        Ok(Palette {
            name: name.to_string(),
            source,
            colors: cmap.colors(size, reversed),
        })
    }

    /// Build a palette directly from a list of colors.
    pub fn from_colors(name: impl Into<String>, colors: Vec<Color>) -> StyleResult<Self> {
        if colors.is_empty() {
            return Err(StyleError::invalid("Palette needs at least one color"));
        }
        let name = name.into();
        Ok(Palette {
            source: name.clone(),
            name,
            colors,
        })
    }

    /// Fetch a palette from the process-wide cache, building it on first use.
    pub fn cached(name: &str, size: usize) -> StyleResult<Arc<Palette>> {
        static CACHE: LazyLock<Mutex<HashMap<(String, usize), Arc<Palette>>>> =
            LazyLock::new(|| Mutex::new(HashMap::new()));

        let key = (name.to_string(), size);
        if let Some(palette) = lock(&CACHE).get(&key) {
            return Ok(Arc::clone(palette));
        }
        let palette = Arc::new(Palette::new(name, size)?);
        lock(&CACHE).insert(key, Arc::clone(&palette));
        Ok(palette)
    }

    /// Requested palette name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Colormap the colors were sampled from (differs from `name` after a fallback).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All colors in order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }

    /// Strict lookup; indices past the end are an error.
    pub fn get(&self, idx: usize) -> StyleResult<Color> {
        self.colors.get(idx).copied().ok_or_else(|| {
            StyleError::invalid(format!(
                "Color index {} out of range for palette of size {}",
                idx,
                self.colors.len()
            ))
        })
    }

    /// Strict lookup of several indices.
    pub fn get_many(&self, indices: &[usize]) -> StyleResult<Vec<Color>> {
        indices.iter().map(|&i| self.get(i)).collect()
    }

    /// Lookup with wraparound: `palette[idx mod len]`.
    pub fn cycle(&self, idx: usize) -> Color {
        self.colors[idx % self.colors.len()]
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Palette('{}', size={})", self.name, self.colors.len())
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Resolve one color: the `index`-th entry (wrapping) of the named palette
/// sampled at `size` colors.
pub fn resolve_color(palette_name: &str, size: usize, index: i64) -> StyleResult<Color> {
    resolve_color_with(palette_name, size, index, 1.0, None)
}

/// [`resolve_color`] with intensity and alpha adjustment.
pub fn resolve_color_with(
    palette_name: &str,
    size: usize,
    index: i64,
    intensity: f64,
    alpha: Option<f64>,
) -> StyleResult<Color> {
    if index < 0 {
        return Err(StyleError::invalid(format!(
            "Color index must be non-negative, got {}",
            index
        )));
    }
    if size == 0 {
        return Err(StyleError::invalid("Palette size must be at least 1"));
    }
    let palette = Palette::cached(palette_name, size)?;
    let mut color = palette.cycle(index as usize);
    if intensity != 1.0 {
        color = color.with_intensity(intensity)?;
    }
    if let Some(alpha) = alpha {
        color = color.with_alpha(alpha)?;
    }
    Ok(color)
}

/// Catalogue entry for a known palette.
#[derive(Debug, Clone, Serialize)]
pub struct PaletteInfo {
    pub name: &'static str,
    pub category: Category,
    pub provider: Provider,
    pub available: bool,
}

/// List all known palettes and whether the current strategy can use them.
pub fn available_palettes() -> Vec<PaletteInfo> {
    let strategy = PaletteStrategy::current();
    colormap::all()
        .iter()
        .map(|c| PaletteInfo {
            name: c.name,
            category: c.category,
            provider: c.provider,
            available: strategy.provides(c.provider),
        })
        .collect()
}

// ----------------------------------------------------------------------------
// Process default palette
// ----------------------------------------------------------------------------

static DEFAULT_PALETTE: LazyLock<Mutex<Option<Arc<Palette>>>> = LazyLock::new(|| Mutex::new(None));

/// The process default palette (viridis, 10 colors unless changed).
pub fn get_default_palette() -> StyleResult<Arc<Palette>> {
    let mut slot = lock(&DEFAULT_PALETTE);
    if let Some(palette) = slot.as_ref() {
        return Ok(Arc::clone(palette));
    }
    let palette = Palette::cached(DEFAULT_PALETTE_NAME, DEFAULT_PALETTE_SIZE)?;
    *slot = Some(Arc::clone(&palette));
    Ok(palette)
}

/// Replace the process default palette.
pub fn set_default_palette(name: &str, size: usize) -> StyleResult<()> {
    let palette = Palette::cached(name, size)?;
    *lock(&DEFAULT_PALETTE) = Some(palette);
    Ok(())
}

/// Strict lookup in the default palette.
pub fn get_color(idx: usize) -> StyleResult<Color> {
    get_default_palette()?.get(idx)
}

/// Wrapping lookup in the default palette.
pub fn cycle_color(idx: usize) -> StyleResult<Color> {
    Ok(get_default_palette()?.cycle(idx))
}
