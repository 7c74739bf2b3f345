//! Selection tool configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color_model::clamp_percent;
use crate::host::Modifiers;
use crate::traversal::MatchStrategy;

/// Default tolerance in percent of the maximum color distance.
pub const DEFAULT_THRESHOLD: f64 = 1.0;

/// Default per-channel tolerance of the one-shot similar-color command.
pub const DEFAULT_CHANNEL_TOLERANCE: f64 = 0.01;

/// What happens to faces already accumulated in multi-select mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AccumulationPolicy {
    /// Accumulated faces stay selected once added, even if their color
    /// changes later.
    #[default]
    Sticky,
    /// Before every merge, drop accumulated faces that no longer exist or no
    /// longer carry color data.
    Revalidate,
}

/// Configuration for a [`SelectionController`](crate::SelectionController).
///
/// # Example
///
/// ```
/// use mesh_color_select::{MatchStrategy, SelectConfig};
///
/// let config = SelectConfig::default()
///     .with_threshold(12.5)
///     .with_strategy(MatchStrategy::Exhaustive);
/// assert_eq!(config.default_threshold, 12.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectConfig {
    /// Tolerance a new session starts with, in percent.
    /// Default: `1.0`
    pub default_threshold: f64,

    /// Contiguous flood fill or mesh-wide scan.
    /// Default: [`MatchStrategy::Contiguous`]
    pub strategy: MatchStrategy,

    /// Modifier keys that switch a pick into multi-select mode.
    /// Default: [`Modifiers::SHIFT`]
    pub multi_select_mask: Modifiers,

    /// Handling of previously accumulated faces.
    /// Default: [`AccumulationPolicy::Sticky`]
    pub accumulation: AccumulationPolicy,

    /// Per-channel tolerance of
    /// [`select_similar_by_channel`](crate::SelectionController::select_similar_by_channel).
    /// Default: `0.01`
    pub channel_tolerance: f64,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
            strategy: MatchStrategy::Contiguous,
            multi_select_mask: Modifiers::SHIFT,
            accumulation: AccumulationPolicy::Sticky,
            channel_tolerance: DEFAULT_CHANNEL_TOLERANCE,
        }
    }
}

impl SelectConfig {
    /// Set the starting tolerance (clamped to `[0, 100]`).
    #[must_use]
    pub fn with_threshold(mut self, percent: f64) -> Self {
        self.default_threshold = clamp_percent(percent);
        self
    }

    /// Set the match strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the modifier mask that enables multi-select.
    #[must_use]
    pub fn with_multi_select_mask(mut self, mask: Modifiers) -> Self {
        self.multi_select_mask = mask;
        self
    }

    /// Set the accumulation policy.
    #[must_use]
    pub fn with_accumulation(mut self, policy: AccumulationPolicy) -> Self {
        self.accumulation = policy;
        self
    }

    /// Set the one-shot per-channel tolerance.
    #[must_use]
    pub fn with_channel_tolerance(mut self, tolerance: f64) -> Self {
        self.channel_tolerance = tolerance.max(0.0);
        self
    }

    /// Preset for selecting every face of one color across the whole mesh.
    #[must_use]
    pub fn mesh_wide() -> Self {
        Self {
            strategy: MatchStrategy::Exhaustive,
            ..Default::default()
        }
    }
}
