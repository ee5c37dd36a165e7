//! Colors and value-to-color mapping
//!
//! Matrix cells are shaded along a single hue: the larger an entry's absolute
//! value relative to the figure's scale, the darker the cell.

use serde::{Deserialize, Serialize};

/// Linear RGBA color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha (opacity)
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with explicit alpha
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from hue (degrees), saturation and lightness
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Self::rgb(r + m, g + m, b + m)
    }

    /// Convert to (hue in degrees, saturation, lightness)
    pub fn to_hsl(&self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let lightness = (max + min) / 2.0;
        let delta = max - min;

        if delta <= f32::EPSILON {
            return (0.0, 0.0, lightness);
        }

        let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());
        let hue = if (max - self.r).abs() <= f32::EPSILON {
            60.0 * ((self.g - self.b) / delta).rem_euclid(6.0)
        } else if (max - self.g).abs() <= f32::EPSILON {
            60.0 * ((self.b - self.r) / delta + 2.0)
        } else {
            60.0 * ((self.r - self.g) / delta + 4.0)
        };

        (hue, saturation, lightness)
    }

    /// Return the same color with a different alpha
    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Linear interpolation towards `other`; `t` is clamped to `0.0..=1.0`
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// 8-bit RGBA channels
    pub fn to_rgba8(&self) -> [u8; 4] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }

    /// Hex notation without alpha, e.g. `#1f77b4`
    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// How the magnitude scale of a matrix is chosen
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ColorScale {
    /// Scale by the matrix's own largest absolute entry
    #[default]
    Auto,
    /// Share a fixed scale, e.g. across all matrices of one figure
    Fixed(f64),
}

impl ColorScale {
    /// Resolve the scale for a matrix whose largest absolute entry is `own_max`
    pub const fn resolve(&self, own_max: f64) -> f64 {
        match self {
            Self::Auto => own_max,
            Self::Fixed(scale) => *scale,
        }
    }
}

/// Maps a value's absolute magnitude to a lightness along a fixed hue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeColormap {
    /// Hue in degrees
    pub hue: f32,
    /// Saturation (0-1)
    pub saturation: f32,
    /// Lightness used for the largest magnitude
    pub lightness_min: f32,
    /// Lightness used for zero
    pub lightness_max: f32,
}

impl MagnitudeColormap {
    /// Create a colormap for the given hue with the default lightness range
    pub fn new(hue: f32) -> Self {
        Self { hue, ..Self::default() }
    }

    /// Set the lightness range
    pub const fn with_lightness(mut self, min: f32, max: f32) -> Self {
        self.lightness_min = min;
        self.lightness_max = max;
        self
    }

    /// Lightness for `value` on a scale whose largest magnitude is `max_abs`
    pub fn lightness_for(&self, value: f64, max_abs: f64) -> f32 {
        if !value.is_finite() || !max_abs.is_finite() || max_abs <= 0.0 {
            return self.lightness_max;
        }
        let t = (value.abs() / max_abs).clamp(0.0, 1.0) as f32;
        self.lightness_max + (self.lightness_min - self.lightness_max) * t
    }

    /// Cell color for `value`
    pub fn color_for(&self, value: f64, max_abs: f64) -> Color {
        Color::from_hsl(self.hue, self.saturation, self.lightness_for(value, max_abs))
    }

    /// Darkest color of the map, useful for solid pattern cells
    pub fn saturated(&self) -> Color {
        Color::from_hsl(self.hue, self.saturation, self.lightness_min)
    }
}

impl Default for MagnitudeColormap {
    fn default() -> Self {
        Self {
            hue: 210.0,
            saturation: 0.7,
            lightness_min: 0.35,
            lightness_max: 0.97,
        }
    }
}

/// Categorical colors for coloring groups
pub struct Palette;

impl Palette {
    const BASE: [Color; 8] = [
        Color::rgb(0.122, 0.467, 0.706),
        Color::rgb(1.000, 0.498, 0.055),
        Color::rgb(0.173, 0.627, 0.173),
        Color::rgb(0.839, 0.153, 0.157),
        Color::rgb(0.580, 0.404, 0.741),
        Color::rgb(0.549, 0.337, 0.294),
        Color::rgb(0.890, 0.467, 0.761),
        Color::rgb(0.737, 0.741, 0.133),
    ];

    /// `n` visually distinct colors
    ///
    /// The first eight are fixed; after that hues rotate by the golden angle.
    pub fn categorical(n: usize) -> Vec<Color> {
        const GOLDEN_ANGLE: f32 = 137.507_77;
        (0..n)
            .map(|i| {
                Self::BASE.get(i).copied().unwrap_or_else(|| {
                    Color::from_hsl(i as f32 * GOLDEN_ANGLE, 0.65, 0.5)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Color::from_hsl(0.0, 1.0, 0.5).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Color::from_hsl(120.0, 1.0, 0.5).to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Color::from_hsl(240.0, 1.0, 0.5).to_rgba8(), [0, 0, 255, 255]);
        assert_eq!(Color::from_hsl(0.0, 0.0, 1.0).to_rgba8(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_hsl_round_trip() {
        let (h, s, l) = Color::from_hsl(210.0, 0.7, 0.4).to_hsl();
        assert_relative_eq!(h, 210.0, epsilon = 1e-3);
        assert_relative_eq!(s, 0.7, epsilon = 1e-4);
        assert_relative_eq!(l, 0.4, epsilon = 1e-4);
    }

    #[test]
    fn test_hex() {
        assert_eq!(Color::rgb(1.0, 0.5, 0.0).to_hex(), "#ff8000");
    }

    #[test]
    fn test_lightness_is_linear_in_magnitude() {
        let map = MagnitudeColormap::new(0.0).with_lightness(0.2, 1.0);
        assert_relative_eq!(map.lightness_for(0.0, 4.0), 1.0);
        assert_relative_eq!(map.lightness_for(-2.0, 4.0), 0.6);
        assert_relative_eq!(map.lightness_for(4.0, 4.0), 0.2);
        // Clamped above the scale
        assert_relative_eq!(map.lightness_for(10.0, 4.0), 0.2);
    }

    #[test]
    fn test_degenerate_scale_is_lightest() {
        let map = MagnitudeColormap::default();
        assert_eq!(map.lightness_for(3.0, 0.0), map.lightness_max);
        assert_eq!(map.lightness_for(f64::NAN, 1.0), map.lightness_max);
        assert_eq!(map.lightness_for(1.0, f64::INFINITY), map.lightness_max);
    }

    #[test]
    fn test_color_scale_resolve() {
        assert_eq!(ColorScale::Auto.resolve(3.0), 3.0);
        assert_eq!(ColorScale::Fixed(8.0).resolve(3.0), 8.0);
    }

    #[test]
    fn test_palette_is_distinct() {
        let colors = Palette::categorical(12);
        assert_eq!(colors.len(), 12);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a.to_rgba8(), b.to_rgba8());
            }
        }
    }
}
