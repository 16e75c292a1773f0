//! Built-in colormap tables.
//!
//! Continuous maps are stored as evenly spaced anchor colors and sampled by
//! linear interpolation between neighbouring anchors. The anchors follow the
//! published matplotlib / seaborn maps closely enough for figure styling; they
//! are not bit-exact reproductions.

use serde::Serialize;

use super::color::Color;

/// Which palette provider ships a colormap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Always available (matplotlib-style maps)
    Base,
    /// Only with the `extended-palettes` feature (seaborn-style maps)
    Extended,
}

/// Intended use of a colormap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sequential,
    Diverging,
    Categorical,
}

/// How a colormap produces its colors.
#[derive(Debug, Clone, Copy)]
pub enum ColormapData {
    /// Evenly spaced anchors over `[0, 1]`
    Continuous(&'static [u32]),
    /// A fixed list of discrete colors
    Listed(&'static [u32]),
    /// Evenly spaced hues at fixed saturation and lightness
    Hues { saturation: f64, lightness: f64 },
}

/// A named colormap definition.
#[derive(Debug, Clone, Copy)]
pub struct Colormap {
    pub name: &'static str,
    pub provider: Provider,
    pub category: Category,
    pub data: ColormapData,
}

impl Colormap {
    /// Sample a continuous map at `t` in `[0, 1]`.
    ///
    /// Listed maps are sampled by nearest entry, hue maps around the wheel.
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self.data {
            ColormapData::Continuous(stops) | ColormapData::Listed(stops) if stops.len() == 1 => {
                from_u32(stops[0])
            }
            ColormapData::Continuous(stops) => {
                let pos = t * (stops.len() - 1) as f64;
                let lower = pos.floor() as usize;
                if lower >= stops.len() - 1 {
                    return from_u32(stops[stops.len() - 1]);
                }
                from_u32(stops[lower]).lerp(&from_u32(stops[lower + 1]), pos - lower as f64)
            }
            ColormapData::Listed(stops) => {
                let idx = (t * (stops.len() - 1) as f64).round() as usize;
                from_u32(stops[idx.min(stops.len() - 1)])
            }
            ColormapData::Hues {
                saturation,
                lightness,
            } => hsl_to_rgb(HUE_OFFSET + t, saturation, lightness),
        }
    }

    /// Produce `size` discrete colors from this map.
    pub fn colors(&self, size: usize, reversed: bool) -> Vec<Color> {
        let mut colors: Vec<Color> = match self.data {
            ColormapData::Continuous(_) => {
                let step = if size > 1 { 1.0 / (size - 1) as f64 } else { 0.0 };
                (0..size)
                    .map(|i| {
                        let t = i as f64 * step;
                        self.sample(if reversed { 1.0 - t } else { t })
                    })
                    .collect()
            }
            ColormapData::Listed(stops) => {
                let mut list: Vec<Color> = stops.iter().map(|&c| from_u32(c)).collect();
                if reversed {
                    list.reverse();
                }
                (0..size).map(|i| list[i % list.len()]).collect()
            }
            ColormapData::Hues {
                saturation,
                lightness,
            } => (0..size)
                .map(|i| hsl_to_rgb(HUE_OFFSET + i as f64 / size as f64, saturation, lightness))
                .collect(),
        };
        if reversed && matches!(self.data, ColormapData::Hues { .. }) {
            colors.reverse();
        }
        colors
    }
}

const HUE_OFFSET: f64 = 0.01;

fn from_u32(rgb: u32) -> Color {
    Color::from_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color {
    let h = h.rem_euclid(1.0);
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    Color::rgb(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

/// Look up a colormap by name. A trailing `_r` selects the reversed map.
///
/// Returns the definition and whether it is reversed.
pub fn find(name: &str) -> Option<(&'static Colormap, bool)> {
    if let Some(cmap) = COLORMAPS.iter().find(|c| c.name == name) {
        return Some((cmap, false));
    }
    let base = name.strip_suffix("_r")?;
    COLORMAPS
        .iter()
        .find(|c| c.name == base)
        .map(|cmap| (cmap, true))
}

/// All colormap definitions, in catalogue order.
pub fn all() -> &'static [Colormap] {
    COLORMAPS
}

const fn cmap(
    name: &'static str,
    provider: Provider,
    category: Category,
    data: ColormapData,
) -> Colormap {
    Colormap {
        name,
        provider,
        category,
        data,
    }
}

use Category::{Categorical, Diverging, Sequential};
use ColormapData::{Continuous, Hues, Listed};
use Provider::{Base, Extended};

static COLORMAPS: &[Colormap] = &[
    // Sequential (matplotlib)
    cmap("viridis", Base, Sequential, Continuous(&[
        0x440154, 0x482475, 0x414487, 0x355f8d, 0x2a788e, 0x21918c,
        0x22a884, 0x44bf70, 0x7ad151, 0xbddf26, 0xfde725,
    ])),
    cmap("plasma", Base, Sequential, Continuous(&[
        0x0d0887, 0x41049d, 0x6a00a8, 0x8f0da4, 0xb12a90, 0xcc4778,
        0xe16462, 0xf2844b, 0xfca636, 0xfcce25, 0xf0f921,
    ])),
    cmap("inferno", Base, Sequential, Continuous(&[
        0x000004, 0x160b39, 0x420a68, 0x6a176e, 0x932667, 0xbc3754,
        0xdd513a, 0xf37819, 0xfca50a, 0xf6d746, 0xfcffa4,
    ])),
    cmap("magma", Base, Sequential, Continuous(&[
        0x000004, 0x140e36, 0x3b0f70, 0x641a80, 0x8c2981, 0xb73779,
        0xde4968, 0xf7705c, 0xfe9f6d, 0xfecf92, 0xfcfdbf,
    ])),
    cmap("cividis", Base, Sequential, Continuous(&[
        0x00224e, 0x123570, 0x3b496c, 0x575d6d, 0x707173, 0x8a8779,
        0xa69d75, 0xc4b56c, 0xe4cf5b, 0xfee838,
    ])),
    cmap("Greys", Base, Sequential, Continuous(&[
        0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696, 0x737373,
        0x525252, 0x252525, 0x000000,
    ])),
    cmap("gray", Base, Sequential, Continuous(&[0x000000, 0xffffff])),
    cmap("Blues", Base, Sequential, Continuous(&[
        0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6,
        0x2171b5, 0x08519c, 0x08306b,
    ])),
    cmap("Reds", Base, Sequential, Continuous(&[
        0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c,
        0xcb181d, 0xa50f15, 0x67000d,
    ])),
    // Sequential (seaborn)
    cmap("mako", Extended, Sequential, Continuous(&[
        0x0b0405, 0x2e1e3b, 0x413d7b, 0x37659e, 0x348fa7, 0x40b7ad,
        0x8bdab2, 0xdef5e5,
    ])),
    cmap("rocket", Extended, Sequential, Continuous(&[
        0x03051a, 0x35193e, 0x701f57, 0xad1759, 0xe13342, 0xf37651,
        0xf6b48f, 0xfaebdd,
    ])),
    cmap("crest", Extended, Sequential, Continuous(&[
        0xa5cd90, 0x6db48e, 0x3f9b8d, 0x25818b, 0x1f6787, 0x27497f,
        0x2c1e3d,
    ])),
    cmap("flare", Extended, Sequential, Continuous(&[
        0xedb081, 0xe98d6b, 0xe3685c, 0xd14a61, 0xb13c6c, 0x8f3371,
        0x6c2b6d, 0x4b2362,
    ])),
    // Diverging (matplotlib)
    cmap("coolwarm", Base, Diverging, Continuous(&[
        0x3b4cc0, 0x5977e3, 0x7b9ff9, 0x9ebeff, 0xc0d4f5, 0xdddcdc,
        0xf2cbb7, 0xf7ac8e, 0xee8468, 0xd65244, 0xb40426,
    ])),
    cmap("RdBu", Base, Diverging, Continuous(&[
        0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xf7f7f7,
        0xd1e5f0, 0x92c5de, 0x4393c3, 0x2166ac, 0x053061,
    ])),
    // Diverging (seaborn)
    cmap("vlag", Extended, Diverging, Continuous(&[
        0x2369bd, 0x6d9bd5, 0xafc6e8, 0xe9e7e6, 0xe6b0ad, 0xd47575,
        0xa9373b,
    ])),
    cmap("icefire", Extended, Diverging, Continuous(&[
        0xbde7db, 0x69b3d6, 0x3f78c1, 0x3b3f86, 0x1f1e21, 0x7a2a3e,
        0xc23c3d, 0xee7636, 0xfdd9a5,
    ])),
    // Categorical (matplotlib)
    cmap("tab10", Base, Categorical, Listed(&[
        0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd, 0x8c564b,
        0xe377c2, 0x7f7f7f, 0xbcbd22, 0x17becf,
    ])),
    cmap("Set1", Base, Categorical, Listed(&[
        0xe41a1c, 0x377eb8, 0x4daf4a, 0x984ea3, 0xff7f00, 0xffff33,
        0xa65628, 0xf781bf, 0x999999,
    ])),
    cmap("Set2", Base, Categorical, Listed(&[
        0x66c2a5, 0xfc8d62, 0x8da0cb, 0xe78ac3, 0xa6d854, 0xffd92f,
        0xe5c494, 0xb3b3b3,
    ])),
    cmap("Dark2", Base, Categorical, Listed(&[
        0x1b9e77, 0xd95f02, 0x7570b3, 0xe7298a, 0x66a61e, 0xe6ab02,
        0xa6761d, 0x666666,
    ])),
    cmap("Paired", Base, Categorical, Listed(&[
        0xa6cee3, 0x1f78b4, 0xb2df8a, 0x33a02c, 0xfb9a99, 0xe31a1c,
        0xfdbf6f, 0xff7f00, 0xcab2d6, 0x6a3d9a, 0xffff99, 0xb15928,
    ])),
    // Categorical (seaborn)
    cmap("deep", Extended, Categorical, Listed(&[
        0x4c72b0, 0xdd8452, 0x55a868, 0xc44e52, 0x8172b3, 0x937860,
        0xda8bc3, 0x8c8c8c, 0xccb974, 0x64b5cd,
    ])),
    cmap("muted", Extended, Categorical, Listed(&[
        0x4878d0, 0xee854a, 0x6acc64, 0xd65f5f, 0x956cb4, 0x8c613c,
        0xdc7ec0, 0x797979, 0xd5bb67, 0x82c6e2,
    ])),
    cmap("colorblind", Extended, Categorical, Listed(&[
        0x0173b2, 0xde8f05, 0x029e73, 0xd55e00, 0xcc78bc, 0xca9161,
        0xfbafe4, 0x949494, 0xece133, 0x56b4e9,
    ])),
    cmap("husl", Extended, Categorical, Hues {
        saturation: 0.9,
        lightness: 0.65,
    }),
];
