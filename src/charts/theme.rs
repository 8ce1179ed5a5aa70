//! Color Themes
//! Sequential color schemes for the map and heatmap.

use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color, independent of the drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ThemeColor {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.r, self.g, self.b)
    }

    pub fn to_rgb(self) -> plotters::style::RGBColor {
        plotters::style::RGBColor(self.r, self.g, self.b)
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Black or white, whichever reads better on this background.
    pub fn contrast_text(self) -> Self {
        let luma = 0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64;
        if luma > 140.0 {
            Self::from_hex(0x000000)
        } else {
            Self::from_hex(0xffffff)
        }
    }
}

impl Serialize for ThemeColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Selectable color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Blues,
    Cividis,
    Greens,
    Inferno,
    Magma,
    Plasma,
    Reds,
    Rainbow,
    Turbo,
    Viridis,
}

const BLUES: [u32; 9] = [
    0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b,
];
const CIVIDIS: [u32; 10] = [
    0x00204d, 0x00336f, 0x39486b, 0x575c6d, 0x707173, 0x8a8779, 0xa69d75, 0xc4b56c, 0xe4cf5b,
    0xffea46,
];
const GREENS: [u32; 9] = [
    0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c, 0x00441b,
];
const INFERNO: [u32; 10] = [
    0x000004, 0x1b0c41, 0x4a0c6b, 0x781c6d, 0xa52c60, 0xcf4446, 0xed6925, 0xfb9b06, 0xf7d13d,
    0xfcffa4,
];
const MAGMA: [u32; 10] = [
    0x000004, 0x180f3d, 0x440f76, 0x721f81, 0x9e2f7f, 0xcd4071, 0xf1605d, 0xfd9668, 0xfeca8d,
    0xfcfdbf,
];
const PLASMA: [u32; 11] = [
    0x0d0887, 0x41049d, 0x6a00a8, 0x8f0da4, 0xb12a90, 0xcc4778, 0xe16462, 0xf2844b, 0xfca636,
    0xfcce25, 0xf0f921,
];
const REDS: [u32; 9] = [
    0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15, 0x67000d,
];
const RAINBOW: [u32; 11] = [
    0x6e40aa, 0xbf3caf, 0xfe4b83, 0xff7847, 0xe2b72f, 0xaff05b, 0x52f667, 0x1ddfa3, 0x23abd8,
    0x4c6edb, 0x6e40aa,
];
const TURBO: [u32; 11] = [
    0x23171b, 0x4a58dd, 0x2f9df5, 0x27d7c4, 0x4df884, 0x95fb51, 0xdedd32, 0xffa423, 0xf65f18,
    0xba2208, 0x900c00,
];
const VIRIDIS: [u32; 10] = [
    0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b,
    0xfde725,
];

impl ColorTheme {
    /// Selector order.
    pub const ALL: [ColorTheme; 10] = [
        ColorTheme::Blues,
        ColorTheme::Cividis,
        ColorTheme::Greens,
        ColorTheme::Inferno,
        ColorTheme::Magma,
        ColorTheme::Plasma,
        ColorTheme::Reds,
        ColorTheme::Rainbow,
        ColorTheme::Turbo,
        ColorTheme::Viridis,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Blues => "blues",
            ColorTheme::Cividis => "cividis",
            ColorTheme::Greens => "greens",
            ColorTheme::Inferno => "inferno",
            ColorTheme::Magma => "magma",
            ColorTheme::Plasma => "plasma",
            ColorTheme::Reds => "reds",
            ColorTheme::Rainbow => "rainbow",
            ColorTheme::Turbo => "turbo",
            ColorTheme::Viridis => "viridis",
        }
    }

    fn stops(self) -> &'static [u32] {
        match self {
            ColorTheme::Blues => &BLUES,
            ColorTheme::Cividis => &CIVIDIS,
            ColorTheme::Greens => &GREENS,
            ColorTheme::Inferno => &INFERNO,
            ColorTheme::Magma => &MAGMA,
            ColorTheme::Plasma => &PLASMA,
            ColorTheme::Reds => &REDS,
            ColorTheme::Rainbow => &RAINBOW,
            ColorTheme::Turbo => &TURBO,
            ColorTheme::Viridis => &VIRIDIS,
        }
    }

    /// Sample the gradient at `t` (clamped to 0..=1).
    pub fn sample(self, t: f64) -> ThemeColor {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let pos = t * (stops.len() - 1) as f64;
        let lower = pos.floor() as usize;
        let upper = (lower + 1).min(stops.len() - 1);
        let frac = pos - lower as f64;

        ThemeColor::from_hex(stops[lower]).lerp(ThemeColor::from_hex(stops[upper]), frac)
    }

    /// Color for `value` on a linear scale over `[min, max]`.
    pub fn scale(self, value: i64, min: i64, max: i64) -> ThemeColor {
        if max <= min {
            return self.sample(1.0);
        }
        self.sample((value - min) as f64 / (max - min) as f64)
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown color theme '{0}'")]
pub struct UnknownTheme(pub String);

impl FromStr for ColorTheme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ColorTheme::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// Fixed two-tone palettes for the migration donuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DonutColor {
    Green,
    Red,
}

impl DonutColor {
    /// (highlight, shade)
    pub fn pair(self) -> (ThemeColor, ThemeColor) {
        match self {
            DonutColor::Green => (ThemeColor::from_hex(0x27ae60), ThemeColor::from_hex(0x12783d)),
            DonutColor::Red => (ThemeColor::from_hex(0xe74c3c), ThemeColor::from_hex(0x781f16)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme_names() {
        for theme in ColorTheme::ALL {
            assert_eq!(theme.name().parse::<ColorTheme>().unwrap(), theme);
        }
        assert_eq!("Viridis".parse::<ColorTheme>().unwrap(), ColorTheme::Viridis);
        assert!("sepia".parse::<ColorTheme>().is_err());
    }

    #[test]
    fn test_sample_endpoints() {
        assert_eq!(ColorTheme::Blues.sample(0.0).to_hex(), "#f7fbff");
        assert_eq!(ColorTheme::Blues.sample(1.0).to_hex(), "#08306b");
        assert_eq!(ColorTheme::Viridis.sample(-3.0).to_hex(), "#440154");
        assert_eq!(ColorTheme::Viridis.sample(7.0).to_hex(), "#fde725");
    }

    #[test]
    fn test_sample_interpolates() {
        // Halfway between the first two greens stops.
        let mid = ColorTheme::Greens.sample(0.5 / 8.0);
        assert_eq!(mid, ThemeColor::from_hex(0xf7fcf5).lerp(ThemeColor::from_hex(0xe5f5e0), 0.5));
    }

    #[test]
    fn test_scale_degenerate_range() {
        assert_eq!(ColorTheme::Reds.scale(5, 5, 5), ColorTheme::Reds.sample(1.0));
        assert_eq!(ColorTheme::Reds.scale(0, 0, 100), ColorTheme::Reds.sample(0.0));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ColorTheme::Inferno).unwrap();
        assert_eq!(json, "\"inferno\"");
        let theme: ColorTheme = serde_json::from_str("\"turbo\"").unwrap();
        assert_eq!(theme, ColorTheme::Turbo);
    }

    #[test]
    fn test_donut_pairs() {
        let (hi, lo) = DonutColor::Green.pair();
        assert_eq!(hi.to_hex(), "#27ae60");
        assert_eq!(lo.to_hex(), "#12783d");
    }
}
