//! Per-session selection state.

use mesh_types::Rgb;

use crate::color_model::clamp_percent;
use crate::host::{FaceRef, FaceSet};

/// Everything the controller remembers between events.
///
/// Owned by one [`SelectionController`](crate::SelectionController); only
/// its event handlers mutate it. Read access is public for inspection and
/// tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    reference_face: Option<FaceRef>,
    reference_color: Option<Rgb>,
    accumulated: FaceSet,
    last_observed: FaceSet,
    last_written: Option<FaceSet>,
    last_threshold: f64,
}

impl SelectionState {
    /// Fresh state with the given starting tolerance.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            reference_face: None,
            reference_color: None,
            accumulated: FaceSet::new(),
            last_observed: FaceSet::new(),
            last_written: None,
            last_threshold: clamp_percent(threshold),
        }
    }

    /// Face anchoring the current match.
    #[must_use]
    pub const fn reference_face(&self) -> Option<FaceRef> {
        self.reference_face
    }

    /// Cached color of the reference face; `None` if it has no color data.
    #[must_use]
    pub const fn reference_color(&self) -> Option<Rgb> {
        self.reference_color
    }

    /// Faces accumulated across multi-select picks.
    #[must_use]
    pub const fn accumulated(&self) -> &FaceSet {
        &self.accumulated
    }

    /// Host selection as of the last processed selection event.
    #[must_use]
    pub const fn last_observed(&self) -> &FaceSet {
        &self.last_observed
    }

    /// The set most recently computed for the host selection.
    #[must_use]
    pub const fn last_written(&self) -> Option<&FaceSet> {
        self.last_written.as_ref()
    }

    /// Current tolerance in percent.
    #[must_use]
    pub const fn last_threshold(&self) -> f64 {
        self.last_threshold
    }

    /// Whether `selection` is a notification this session already knows
    /// about: the last observed selection, the accumulated set, or our own
    /// last write.
    #[must_use]
    pub fn is_echo(&self, selection: &FaceSet) -> bool {
        *selection == self.last_observed
            || *selection == self.accumulated
            || self.last_written.as_ref() == Some(selection)
    }

    pub(crate) fn set_reference(&mut self, face: FaceRef, color: Option<Rgb>) {
        self.reference_face = Some(face);
        self.reference_color = color;
    }

    pub(crate) fn refresh_reference_color(&mut self, color: Option<Rgb>) {
        if self.reference_face.is_some() {
            self.reference_color = color;
        }
    }

    pub(crate) fn accumulated_mut(&mut self) -> &mut FaceSet {
        &mut self.accumulated
    }

    pub(crate) fn observe(&mut self, selection: FaceSet) {
        self.last_observed = selection;
    }

    pub(crate) fn record_write(&mut self, selection: FaceSet) {
        self.last_written = Some(selection);
    }

    pub(crate) fn set_threshold(&mut self, percent: f64) {
        self.last_threshold = clamp_percent(percent);
    }

    /// Drop the reference and everything derived from it.
    pub(crate) fn clear(&mut self) {
        self.reference_face = None;
        self.reference_color = None;
        self.accumulated.clear();
        self.last_written = None;
    }

    pub(crate) fn forget_observed(&mut self) {
        self.last_observed.clear();
    }

    /// End-of-session teardown. The tolerance survives for the next session.
    pub(crate) fn reset(&mut self) {
        self.clear();
        self.forget_observed();
    }
}
