//! The boundary to the mesh-editing host.
//!
//! The engine never owns meshes or selection. It talks to the host through
//! two traits: [`MeshQuery`] for the read-only lookups traversal needs, and
//! [`MeshHost`] for selection, painting and user feedback.

use std::fmt;
use std::ops::BitOr;

use hashbrown::HashSet;
use mesh_types::Rgb;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::readout::ColorReadout;

/// Identifies one mesh in the host scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh{}", self.0)
    }
}

/// Identifies one face of one mesh.
///
/// Ordering is by mesh, then face index. The controller relies on it to pick
/// a deterministic seed out of a set of newly picked faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceRef {
    /// Owning mesh.
    pub mesh: MeshId,
    /// Face index within the mesh.
    pub index: u32,
}

impl FaceRef {
    /// Create a face reference.
    #[inline]
    #[must_use]
    pub const fn new(mesh: MeshId, index: u32) -> Self {
        Self { mesh, index }
    }
}

impl fmt::Display for FaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.f[{}]", self.mesh, self.index)
    }
}

/// A set of faces, as read from or written to the host selection.
pub type FaceSet = HashSet<FaceRef>;

/// Keyboard modifier bitmask reported by the host.
///
/// Bit values follow the common layout of DCC hosts: Shift is bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Modifiers(u32);

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self(0);
    /// Shift.
    pub const SHIFT: Self = Self(1);
    /// Caps Lock.
    pub const CAPS_LOCK: Self = Self(1 << 1);
    /// Control.
    pub const CONTROL: Self = Self(1 << 2);
    /// Alt / Option.
    pub const ALT: Self = Self(1 << 3);

    /// Wrap a raw bitmask.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bitmask.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether any bit of `mask` is set.
    #[inline]
    #[must_use]
    pub const fn intersects(self, mask: Self) -> bool {
        self.0 & mask.0 != 0
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational.
    Info,
    /// Something the user should fix.
    Warning,
    /// An operation failed.
    Error,
}

/// Result type for host calls.
pub type HostResult<T> = Result<T, HostError>;

/// Failures reported by the host boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HostError {
    /// The face no longer exists (deleted, or the mesh was rebuilt).
    #[error("stale face reference {face}")]
    StaleFace {
        /// The face that could not be resolved.
        face: FaceRef,
    },

    /// The mesh is not part of the scene.
    #[error("unknown mesh {mesh}")]
    UnknownMesh {
        /// The mesh that could not be resolved.
        mesh: MeshId,
    },

    /// The host refused the request.
    #[error("host rejected request: {reason}")]
    Rejected {
        /// Host-provided reason.
        reason: String,
    },
}

impl HostError {
    /// Whether the error means a face or mesh has disappeared.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::StaleFace { .. } | Self::UnknownMesh { .. })
    }
}

/// Read-only mesh queries.
pub trait MeshQuery {
    /// Color samples stored on a face's corners.
    ///
    /// Returns an empty vector when the face carries no color data.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if the face cannot be resolved.
    fn face_vertex_colors(&self, face: FaceRef) -> HostResult<Vec<Rgb>>;

    /// Every face of a mesh.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if the mesh cannot be resolved.
    fn list_all_faces(&self, mesh: MeshId) -> HostResult<Vec<FaceRef>>;

    /// Faces sharing at least one edge with `face`.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if the face cannot be resolved.
    fn adjacent_faces(&self, face: FaceRef) -> HostResult<Vec<FaceRef>>;
}

/// Selection, painting and feedback capabilities of the host.
pub trait MeshHost: MeshQuery {
    /// The current selection, flattened to individual faces.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if the selection cannot be read.
    fn current_selection(&self) -> HostResult<FaceSet>;

    /// Modifier keys currently held.
    fn modifier_state(&self) -> Modifiers;

    /// Replace the selection.
    ///
    /// Hosts typically emit a selection-changed notification in response.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if any face cannot be resolved.
    fn set_selection(&mut self, faces: &FaceSet) -> HostResult<()>;

    /// Paint every corner of the given faces.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if any face cannot be resolved.
    fn set_face_colors(&mut self, faces: &FaceSet, color: Rgb) -> HostResult<()>;

    /// Remove color data from the given faces.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if any face cannot be resolved.
    fn clear_face_colors(&mut self, faces: &FaceSet) -> HostResult<()>;

    /// Show a message to the user.
    fn display_message(&mut self, text: &str, severity: Severity);

    /// Update the reference color swatch; `None` shows the "no color"
    /// placeholder.
    fn show_reference_color(&mut self, readout: Option<&ColorReadout>) {
        let _ = readout;
    }
}
