//! Human-readable reference color readout.

use std::fmt;

use mesh_types::Rgb;

/// A color formatted the way the tool's swatch panel shows it.
///
/// Renders three lines: normalized RGB rounded to two places, 8-bit RGB,
/// and HSV with hue in degrees and saturation/value in percent.
///
/// # Example
///
/// ```
/// use mesh_color_select::ColorReadout;
/// use mesh_types::Rgb;
///
/// let readout = ColorReadout::new(Rgb::new(1.0, 0.5, 0.0));
/// assert_eq!(
///     readout.to_string(),
///     "RGB (0-1): (1.0, 0.5, 0.0)\nRGB (0-255): (255, 127, 0)\nHSV: (30.0, 100.0, 100.0)"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorReadout {
    color: Rgb,
}

impl ColorReadout {
    /// Wrap a color for display.
    #[must_use]
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }

    /// The underlying color.
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Normalized channels rounded to two decimals.
    #[must_use]
    pub fn normalized(&self) -> [f64; 3] {
        [self.color.r, self.color.g, self.color.b].map(round2)
    }

    /// 8-bit channels.
    #[must_use]
    pub fn bytes(&self) -> [u8; 3] {
        self.color.to_bytes()
    }

    /// Hue in degrees, saturation and value in percent, rounded to two decimals.
    #[must_use]
    pub fn hsv(&self) -> [f64; 3] {
        let (h, s, v) = self.color.to_hsv();
        [h * 360.0, s * 100.0, v * 100.0].map(round2)
    }
}

impl fmt::Display for ColorReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.normalized();
        let [r8, g8, b8] = self.bytes();
        let [h, s, v] = self.hsv();
        writeln!(f, "RGB (0-1): ({r:?}, {g:?}, {b:?})")?;
        writeln!(f, "RGB (0-255): ({r8}, {g8}, {b8})")?;
        write!(f, "HSV: ({h:?}, {s:?}, {v:?})")
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
