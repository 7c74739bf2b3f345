//! The selection state machine.
//!
//! [`SelectionController`] turns host events into selection updates. Every
//! handler runs against a copy of [`SelectionState`]; the copy replaces the
//! live state only when the handler finishes without a host failure, so an
//! aborted event leaves the session exactly as it was.

use mesh_types::Rgb;
use tracing::{debug, info, warn};

use crate::color_model::{threshold_from_percent, MAX_RGB_DISTANCE};
use crate::config::{AccumulationPolicy, SelectConfig};
use crate::error::{SelectError, SelectResult};
use crate::host::{FaceRef, FaceSet, HostResult, MeshHost, MeshQuery, Severity};
use crate::message::MessageLog;
use crate::readout::ColorReadout;
use crate::state::SelectionState;
use crate::traversal::{face_color, scan_by_channel, select_matching, MatchStrategy};

const SELECT_A_FACE: &str = "Please, select a face.";
const NO_REFERENCE_COLOR: &str = "No vertex colors found on the selected face.";
const NO_MATCH: &str = "No matching faces found.";
const SELECT_TO_PAINT: &str = "Please select vertices to apply the color.";
const SELECT_TO_CLEAR: &str = "Please, select faces or vertices to clear vertex colors.";
const SELECT_SEED: &str = "Please select a face.";

const UPDATING_SELECTION: &str = "Error updating selection";
const APPLYING_COLORS: &str = "Error applying vertex colors";
const CLEARING_COLORS: &str = "Error clearing vertex colors";
const SELECTING_SIMILAR: &str = "Error selecting similar faces";

/// What a handler did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nothing to do.
    Idle,
    /// The host selection was emptied; the session is idle.
    Cleared,
    /// The notification repeated a known selection and was ignored.
    Echo,
    /// A match was computed.
    Selected {
        /// Size of the resulting selection.
        faces: usize,
        /// Whether the host selection had to be rewritten.
        written: bool,
    },
    /// Colors were painted or cleared on the selected faces.
    Painted {
        /// Number of faces touched.
        faces: usize,
    },
    /// The handler declined to act; the user was told why.
    Declined(SelectError),
}

/// Side effects that only reach the host once an event commits.
#[derive(Debug, Default)]
struct Effects {
    notice: Option<(&'static str, Severity)>,
    readout: Option<Option<Rgb>>,
}

impl Effects {
    fn notify(&mut self, text: &'static str, severity: Severity) {
        self.notice = Some((text, severity));
    }

    fn flush<H: MeshHost + ?Sized>(self, host: &mut H, messages: &mut MessageLog) {
        if let Some(color) = self.readout {
            let readout = color.map(ColorReadout::new);
            host.show_reference_color(readout.as_ref());
        }
        if let Some((text, severity)) = self.notice {
            messages.show(host, text, severity);
        }
    }
}

/// Interactive magic-wand selection by vertex color.
///
/// One controller lives for one tool session. Feed it the host's
/// selection-changed and tolerance-changed events; it decides whether a
/// pick starts a new region, extends an accumulated multi-selection, or just
/// re-confirms the current region, and writes the result back to the host
/// only when it differs from what the host already shows.
///
/// # Example
///
/// ```
/// use mesh_color_select::{FaceRef, Scene, SelectConfig, SelectionController};
/// use mesh_types::{quad_grid, Rgb};
///
/// let mut grid = quad_grid(3, 1);
/// for (face, color) in [Rgb::RED, Rgb::RED, Rgb::BLUE].into_iter().enumerate() {
///     grid.paint_face(face as u32, color).unwrap();
/// }
///
/// let mut scene = Scene::new();
/// let mesh = scene.add_mesh(grid);
/// let mut wand = SelectionController::new(SelectConfig::default());
///
/// scene.pick([FaceRef::new(mesh, 0)]);
/// scene.dispatch_pending(&mut wand).unwrap();
///
/// assert_eq!(scene.selection().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SelectionController {
    config: SelectConfig,
    state: SelectionState,
    messages: MessageLog,
    fill_color: Rgb,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(SelectConfig::default())
    }
}

impl SelectionController {
    /// Start a session.
    #[must_use]
    pub fn new(config: SelectConfig) -> Self {
        let state = SelectionState::new(config.default_threshold);
        Self {
            config,
            state,
            messages: MessageLog::new(),
            fill_color: Rgb::BLACK,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Color used by [`apply_fill_color`](Self::apply_fill_color).
    #[must_use]
    pub const fn fill_color(&self) -> Rgb {
        self.fill_color
    }

    /// The last message sent to the host.
    #[must_use]
    pub fn last_message(&self) -> Option<&str> {
        self.messages.last()
    }

    /// Handle a selection-changed notification.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::HostQueryFailure`] after reporting it to the
    /// user; the session state is left untouched.
    pub fn on_selection_changed<H: MeshHost + ?Sized>(
        &mut self,
        host: &mut H,
        selection: FaceSet,
    ) -> SelectResult<EventOutcome> {
        self.transact(host, UPDATING_SELECTION, |this, host, state, fx| {
            this.process_selection(host, state, fx, selection)
        })
    }

    /// Handle a tolerance slider change (percent, clamped to `[0, 100]`).
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::HostQueryFailure`] after reporting it to the
    /// user; the session state, including the stored tolerance, is left
    /// untouched.
    pub fn on_threshold_changed<H: MeshHost + ?Sized>(
        &mut self,
        host: &mut H,
        percent: f64,
    ) -> SelectResult<EventOutcome> {
        self.transact(host, UPDATING_SELECTION, |this, host, state, fx| {
            state.set_threshold(percent);
            let merge = !state.accumulated().is_empty();
            this.evaluate(host, state, fx, merge)
        })
    }

    /// Switch between contiguous and mesh-wide matching and re-evaluate the
    /// current region.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::HostQueryFailure`] after reporting it.
    pub fn set_strategy<H: MeshHost + ?Sized>(
        &mut self,
        host: &mut H,
        strategy: MatchStrategy,
    ) -> SelectResult<EventOutcome> {
        if self.config.strategy == strategy {
            return Ok(EventOutcome::Idle);
        }
        self.config.strategy = strategy;
        if self.state.reference_face().is_none() {
            return Ok(EventOutcome::Idle);
        }
        self.reevaluate(host)
    }

    /// Re-run the match from the stored reference at the stored tolerance,
    /// as when the tool window reopens after [`hide`](Self::hide).
    ///
    /// After [`close`](Self::close) there is no reference, and the user is
    /// asked to pick a face.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::HostQueryFailure`] after reporting it.
    pub fn open<H: MeshHost + ?Sized>(&mut self, host: &mut H) -> SelectResult<EventOutcome> {
        self.reevaluate(host)
    }

    /// The tool window was closed; the host stops delivering events.
    ///
    /// Reference, accumulation and tolerance are kept for the next
    /// [`open`](Self::open). The observed selection is forgotten, since the
    /// host selection may change while no events arrive.
    pub fn hide(&mut self) {
        debug!("Selection tool hidden");
        self.state.forget_observed();
    }

    /// End the session. The tolerance and fill color are kept for the next
    /// [`open`](Self::open).
    pub fn close(&mut self) {
        debug!("Selection session closed");
        self.state.reset();
        self.messages.reset();
    }

    /// Set the paint color.
    pub fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    /// Copy the reference color into the paint color.
    ///
    /// Returns `false` (and changes nothing) without a colored reference.
    pub fn use_reference_as_fill(&mut self) -> bool {
        match self.state.reference_color() {
            Some(color) => {
                self.fill_color = color;
                true
            }
            None => false,
        }
    }

    /// Paint every selected face with the fill color.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::HostQueryFailure`] after reporting it.
    pub fn apply_fill_color<H: MeshHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> SelectResult<EventOutcome> {
        let color = self.fill_color;
        self.transact(host, APPLYING_COLORS, |_, host, state, fx| {
            let selection = host.current_selection()?;
            if selection.is_empty() {
                fx.notify(SELECT_TO_PAINT, Severity::Info);
                return Ok(EventOutcome::Declined(SelectError::EmptySelection));
            }
            host.set_face_colors(&selection, color)?;
            info!(faces = selection.len(), "Applied fill color");
            refresh_reference(&*host, state, fx)?;
            Ok(EventOutcome::Painted {
                faces: selection.len(),
            })
        })
    }

    /// Remove color data from every selected face.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::HostQueryFailure`] after reporting it.
    pub fn clear_vertex_colors<H: MeshHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> SelectResult<EventOutcome> {
        self.transact(host, CLEARING_COLORS, |_, host, state, fx| {
            let selection = host.current_selection()?;
            if selection.is_empty() {
                fx.notify(SELECT_TO_CLEAR, Severity::Info);
                return Ok(EventOutcome::Declined(SelectError::EmptySelection));
            }
            host.clear_face_colors(&selection)?;
            info!(faces = selection.len(), "Cleared vertex colors");
            refresh_reference(&*host, state, fx)?;
            Ok(EventOutcome::Painted {
                faces: selection.len(),
            })
        })
    }

    /// One-shot command: select every face of the first selected face's mesh
    /// whose color is within the configured per-channel tolerance.
    ///
    /// Independent of the session state.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::HostQueryFailure`] after reporting it.
    pub fn select_similar_by_channel<H: MeshHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> SelectResult<EventOutcome> {
        let tolerance = self.config.channel_tolerance;
        self.transact(host, SELECTING_SIMILAR, |_, host, _, fx| {
            let selection = host.current_selection()?;
            let Some(&seed) = selection.iter().min() else {
                fx.notify(SELECT_SEED, Severity::Warning);
                return Ok(EventOutcome::Declined(SelectError::EmptySelection));
            };
            let Some(target) = face_color(&*host, seed)? else {
                fx.notify(NO_REFERENCE_COLOR, Severity::Warning);
                return Ok(EventOutcome::Declined(SelectError::NoColorData));
            };

            let matches = scan_by_channel(&*host, seed.mesh, target, tolerance)?;
            if matches.is_empty() {
                fx.notify(NO_MATCH, Severity::Info);
                return Ok(EventOutcome::Declined(SelectError::NoMatchFound));
            }

            let written = selection != matches;
            if written {
                host.set_selection(&matches)?;
            }
            Ok(EventOutcome::Selected {
                faces: matches.len(),
                written,
            })
        })
    }

    fn reevaluate<H: MeshHost + ?Sized>(&mut self, host: &mut H) -> SelectResult<EventOutcome> {
        self.transact(host, UPDATING_SELECTION, |this, host, state, fx| {
            let merge = !state.accumulated().is_empty();
            this.evaluate(host, state, fx, merge)
        })
    }

    /// Run `op` on a copy of the state and commit it only on success.
    fn transact<H, F>(&mut self, host: &mut H, context: &str, op: F) -> SelectResult<EventOutcome>
    where
        H: MeshHost + ?Sized,
        F: FnOnce(&Self, &mut H, &mut SelectionState, &mut Effects) -> SelectResult<EventOutcome>,
    {
        let mut next = self.state.clone();
        let mut effects = Effects::default();

        match op(self, host, &mut next, &mut effects) {
            Ok(outcome) => {
                self.state = next;
                effects.flush(host, &mut self.messages);
                Ok(outcome)
            }
            Err(err) => {
                warn!(%err, context, "Event aborted, selection state unchanged");
                let text = format!("{context}: {err}");
                self.messages.show(host, &text, Severity::Error);
                Err(err)
            }
        }
    }

    fn process_selection<H: MeshHost + ?Sized>(
        &self,
        host: &mut H,
        state: &mut SelectionState,
        fx: &mut Effects,
        selection: FaceSet,
    ) -> SelectResult<EventOutcome> {
        if selection.is_empty() {
            debug!("Selection emptied, dropping reference");
            state.clear();
            state.observe(selection);
            fx.readout = Some(None);
            return Ok(EventOutcome::Cleared);
        }

        if state.is_echo(&selection) {
            debug!(faces = selection.len(), "Ignoring selection echo");
            state.observe(selection);
            return Ok(EventOutcome::Echo);
        }

        let newly_picked: FaceSet = selection
            .difference(state.accumulated())
            .copied()
            .collect();
        let multi_select = host
            .modifier_state()
            .intersects(self.config.multi_select_mask);

        // A pick inside the region the current reference already matches is
        // a re-confirmation (typically the echo of a tolerance change), not a
        // request for a new reference.
        let reconfirms = match (state.reference_face(), state.reference_color()) {
            (Some(face), Some(color)) => {
                let current = select_matching(
                    &*host,
                    self.config.strategy,
                    face,
                    color,
                    threshold_distance(state),
                )?;
                newly_picked.is_subset(&current)
            }
            _ => false,
        };

        let new_seed = if multi_select || !reconfirms {
            pick_seed(&newly_picked, state.last_written())
        } else {
            None
        };

        if let Some(seed) = new_seed {
            let color = face_color(&*host, seed)?;
            debug!(%seed, multi_select, has_color = color.is_some(), "New reference face");
            state.set_reference(seed, color);
            fx.readout = Some(color);
            if multi_select {
                state.accumulated_mut().extend(selection.iter().copied());
            } else {
                state.accumulated_mut().clear();
            }
        } else if !multi_select {
            state.accumulated_mut().clear();
        }

        state.observe(selection);
        self.evaluate(host, state, fx, multi_select)
    }

    /// Match from the current reference and reconcile with the host.
    fn evaluate<H: MeshHost + ?Sized>(
        &self,
        host: &mut H,
        state: &mut SelectionState,
        fx: &mut Effects,
        merge: bool,
    ) -> SelectResult<EventOutcome> {
        let Some(seed) = state.reference_face() else {
            fx.notify(SELECT_A_FACE, Severity::Info);
            return Ok(EventOutcome::Declined(SelectError::EmptySelection));
        };
        let Some(color) = state.reference_color() else {
            fx.notify(NO_REFERENCE_COLOR, Severity::Info);
            return Ok(EventOutcome::Declined(SelectError::NoColorData));
        };

        if merge && self.config.accumulation == AccumulationPolicy::Revalidate {
            revalidate(&*host, state.accumulated_mut())?;
        }

        let matches = select_matching(
            &*host,
            self.config.strategy,
            seed,
            color,
            threshold_distance(state),
        )?;

        let result = if merge {
            let accumulated = state.accumulated_mut();
            accumulated.extend(matches);
            accumulated.clone()
        } else {
            state.accumulated_mut().clear();
            matches
        };

        if result.is_empty() {
            fx.notify(NO_MATCH, Severity::Info);
            return Ok(EventOutcome::Declined(SelectError::NoMatchFound));
        }

        let written = host.current_selection()? != result;
        if written {
            host.set_selection(&result)?;
            info!(
                faces = result.len(),
                threshold = state.last_threshold(),
                merge,
                "Selection updated"
            );
        }

        let faces = result.len();
        state.record_write(result);
        Ok(EventOutcome::Selected { faces, written })
    }
}

/// The smallest newly picked face outside the previously written selection,
/// or the smallest newly picked face if all of them were in it.
fn pick_seed(newly_picked: &FaceSet, previous: Option<&FaceSet>) -> Option<FaceRef> {
    newly_picked
        .iter()
        .filter(|face| previous.is_none_or(|prev| !prev.contains(*face)))
        .min()
        .or_else(|| newly_picked.iter().min())
        .copied()
}

fn threshold_distance(state: &SelectionState) -> f64 {
    threshold_from_percent(state.last_threshold(), MAX_RGB_DISTANCE)
}

/// Re-read the reference color after the host's color data changed.
fn refresh_reference<H: MeshHost + ?Sized>(
    host: &H,
    state: &mut SelectionState,
    fx: &mut Effects,
) -> HostResult<()> {
    if let Some(face) = state.reference_face() {
        let color = face_color(host, face)?;
        state.refresh_reference_color(color);
        fx.readout = Some(color);
    }
    Ok(())
}

/// Drop accumulated faces that vanished or lost their color data.
fn revalidate<Q: MeshQuery + ?Sized>(query: &Q, accumulated: &mut FaceSet) -> HostResult<()> {
    let mut keep = FaceSet::with_capacity(accumulated.len());
    for &face in accumulated.iter() {
        match query.face_vertex_colors(face) {
            Ok(samples) if !samples.is_empty() => {
                keep.insert(face);
            }
            Ok(_) => {}
            Err(err) if err.is_stale() => {}
            Err(err) => return Err(err),
        }
    }

    let dropped = accumulated.len() - keep.len();
    if dropped > 0 {
        debug!(dropped, "Dropped invalid accumulated faces");
    }
    *accumulated = keep;
    Ok(())
}
