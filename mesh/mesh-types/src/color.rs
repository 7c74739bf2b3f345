//! Normalized RGB color values.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGB color with `f64` channels normalized to `[0, 1]`.
///
/// This is the sample type stored on face corners and the value type all
/// color comparisons work in. Channels are not clamped on construction so
/// that averaged or interpolated values stay exact; use [`Rgb::clamped`]
/// when a value must be brought back into range.
///
/// # Example
///
/// ```
/// use mesh_types::Rgb;
///
/// let orange = Rgb::new(1.0, 0.5, 0.0);
/// assert_eq!(orange.to_bytes(), [255, 127, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Black (0, 0, 0).
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// White (1, 1, 1).
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Red (1, 0, 0).
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);

    /// Green (0, 1, 0).
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);

    /// Blue (0, 0, 1).
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a color from normalized channels.
    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channels.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Rgb;
    ///
    /// let c = Rgb::from_bytes(255, 0, 51);
    /// assert!((c.r - 1.0).abs() < 1e-12);
    /// assert!((c.b - 0.2).abs() < 1e-12);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Convert to 8-bit channels.
    ///
    /// Channels are clamped to `[0, 1]` and truncated, so `0.5` maps to 127.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation and sign loss are safe: values are clamped to [0.0, 1.0] before * 255.0
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0) as u8,
            (self.g.clamp(0.0, 1.0) * 255.0) as u8,
            (self.b.clamp(0.0, 1.0) * 255.0) as u8,
        ]
    }

    /// Channels as a vector, for distance computations in channel space.
    #[inline]
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.r, self.g, self.b)
    }

    /// Copy of this color with every channel clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Convert to hue, saturation and value, each in `[0, 1]`.
    ///
    /// Hue is a fraction of a full turn (multiply by 360 for degrees).
    /// Grays report a hue of 0.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Rgb;
    ///
    /// let (h, s, v) = Rgb::BLUE.to_hsv();
    /// assert!((h * 360.0 - 240.0).abs() < 1e-9);
    /// assert!((s - 1.0).abs() < 1e-12);
    /// assert!((v - 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn to_hsv(self) -> (f64, f64, f64) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let value = max;
        let span = max - min;
        if span <= 0.0 || max <= 0.0 {
            return (0.0, 0.0, value);
        }

        let saturation = span / max;
        let rc = (max - self.r) / span;
        let gc = (max - self.g) / span;
        let bc = (max - self.b) / span;

        #[allow(clippy::float_cmp)] // max is one of the channels exactly
        let sector = if self.r == max {
            bc - gc
        } else if self.g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        ((sector / 6.0).rem_euclid(1.0), saturation, value)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f64; 3]> for Rgb {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [f64; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}
