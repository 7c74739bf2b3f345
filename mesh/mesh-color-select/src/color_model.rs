//! Color averaging and distance.
//!
//! All functions here are pure. Colors are compared as points in the unit
//! RGB cube, so the largest possible distance is the cube diagonal.

use mesh_types::Rgb;

use crate::error::{SelectError, SelectResult};

/// Euclidean diagonal of the unit RGB cube, `sqrt(3)`.
pub const MAX_RGB_DISTANCE: f64 = 1.732_050_807_568_877_2;

/// Average a face's corner samples into one color.
///
/// Each channel is averaged independently.
///
/// # Errors
///
/// Returns [`SelectError::NoColorData`] if `samples` is empty.
///
/// # Example
///
/// ```
/// use mesh_color_select::average_color;
/// use mesh_types::Rgb;
///
/// let avg = average_color(&[Rgb::RED, Rgb::BLUE]).unwrap();
/// assert_eq!(avg, Rgb::new(0.5, 0.0, 0.5));
/// ```
pub fn average_color(samples: &[Rgb]) -> SelectResult<Rgb> {
    if samples.is_empty() {
        return Err(SelectError::NoColorData);
    }

    #[allow(clippy::cast_precision_loss)] // corner counts are tiny
    let n = samples.len() as f64;
    let sum = samples
        .iter()
        .fold(nalgebra::Vector3::zeros(), |acc, c| acc + c.to_vector());

    Ok(Rgb::new(sum.x / n, sum.y / n, sum.z / n))
}

/// Euclidean distance between two colors in channel space.
///
/// Symmetric, and zero exactly when the colors are equal.
#[inline]
#[must_use]
pub fn distance(a: Rgb, b: Rgb) -> f64 {
    (a.to_vector() - b.to_vector()).norm()
}

/// Clamp a tolerance percentage to `[0, 100]`. NaN becomes 0.
#[inline]
#[must_use]
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Convert a tolerance percentage into an absolute color distance.
///
/// # Example
///
/// ```
/// use mesh_color_select::{threshold_from_percent, MAX_RGB_DISTANCE};
///
/// assert_eq!(threshold_from_percent(100.0, MAX_RGB_DISTANCE), MAX_RGB_DISTANCE);
/// assert_eq!(threshold_from_percent(250.0, 2.0), 2.0);
/// assert_eq!(threshold_from_percent(-5.0, 2.0), 0.0);
/// ```
#[inline]
#[must_use]
pub fn threshold_from_percent(percent: f64, max_distance: f64) -> f64 {
    clamp_percent(percent) / 100.0 * max_distance
}

/// Whether every channel of `a` differs from `b` by strictly less than
/// `tolerance`.
#[inline]
#[must_use]
pub fn within_channel_tolerance(a: Rgb, b: Rgb, tolerance: f64) -> bool {
    (a.r - b.r).abs() < tolerance && (a.g - b.g).abs() < tolerance && (a.b - b.b).abs() < tolerance
}
