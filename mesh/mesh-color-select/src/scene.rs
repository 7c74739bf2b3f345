//! An in-memory [`MeshHost`].
//!
//! [`Scene`] stores a set of [`ColorMesh`]es with their face adjacency, a
//! face selection and a modifier state. It models the host's
//! selection-changed callback as a queue: every change of the selection,
//! whether from [`Scene::pick`] or from the controller writing back, queues
//! a notification that [`Scene::dispatch_pending`] delivers.

use std::collections::VecDeque;

use mesh_types::{ColorMesh, FaceAdjacency, MeshError, Rgb};
use tracing::{debug, warn};

use crate::controller::{EventOutcome, SelectionController};
use crate::error::SelectResult;
use crate::host::{
    FaceRef, FaceSet, HostError, HostResult, MeshHost, MeshId, MeshQuery, Modifiers, Severity,
};
use crate::readout::ColorReadout;

/// Upper bound on notifications delivered by one
/// [`dispatch_pending`](Scene::dispatch_pending) call.
pub const MAX_DISPATCH: usize = 32;

#[derive(Debug, Clone)]
struct SceneMesh {
    mesh: ColorMesh,
    adjacency: FaceAdjacency,
}

impl SceneMesh {
    fn new(mesh: ColorMesh) -> Self {
        let adjacency = FaceAdjacency::from_mesh(&mesh);
        Self { mesh, adjacency }
    }
}

/// A scene of colored meshes acting as the host.
///
/// # Example
///
/// ```
/// use mesh_color_select::{FaceRef, MeshQuery, Scene};
/// use mesh_types::{quad_grid, Rgb};
///
/// let mut grid = quad_grid(2, 1);
/// grid.paint_face(0, Rgb::GREEN).unwrap();
///
/// let mut scene = Scene::new();
/// let mesh = scene.add_mesh(grid);
///
/// let colors = scene.face_vertex_colors(FaceRef::new(mesh, 0)).unwrap();
/// assert_eq!(colors, vec![Rgb::GREEN; 4]);
/// assert!(scene.face_vertex_colors(FaceRef::new(mesh, 1)).unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: Vec<Option<SceneMesh>>,
    selection: FaceSet,
    modifiers: Modifiers,
    messages: Vec<(Severity, String)>,
    readout: Option<String>,
    pending: VecDeque<FaceSet>,
    selection_writes: usize,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh and return its id.
    pub fn add_mesh(&mut self, mesh: ColorMesh) -> MeshId {
        let id = MeshId(u32::try_from(self.meshes.len()).unwrap_or(u32::MAX));
        debug!(%id, faces = mesh.face_count(), "Mesh added to scene");
        self.meshes.push(Some(SceneMesh::new(mesh)));
        id
    }

    /// Replace a mesh's geometry and colors, recomputing adjacency.
    ///
    /// Faces that no longer exist become stale; the selection is not
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownMesh`] if `id` is not in the scene.
    pub fn replace_mesh(&mut self, id: MeshId, mesh: ColorMesh) -> HostResult<()> {
        let slot = self
            .meshes
            .get_mut(id.0 as usize)
            .filter(|slot| slot.is_some())
            .ok_or(HostError::UnknownMesh { mesh: id })?;
        *slot = Some(SceneMesh::new(mesh));
        Ok(())
    }

    /// Delete a mesh. Its faces become stale.
    pub fn remove_mesh(&mut self, id: MeshId) -> Option<ColorMesh> {
        self.meshes
            .get_mut(id.0 as usize)
            .and_then(Option::take)
            .map(|entry| entry.mesh)
    }

    /// A mesh in the scene.
    #[must_use]
    pub fn mesh(&self, id: MeshId) -> Option<&ColorMesh> {
        self.meshes
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .map(|entry| &entry.mesh)
    }

    /// Replace the selection the way a user click would.
    pub fn pick(&mut self, faces: impl IntoIterator<Item = FaceRef>) {
        let selection: FaceSet = faces.into_iter().collect();
        self.replace_selection(selection);
    }

    /// Set the modifier keys reported to the controller.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &FaceSet {
        &self.selection
    }

    /// Every message shown so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[(Severity, String)] {
        &self.messages
    }

    /// Text of the reference color display, if any.
    #[must_use]
    pub fn readout(&self) -> Option<&str> {
        self.readout.as_deref()
    }

    /// Number of times the selection was written through [`MeshHost`].
    #[must_use]
    pub const fn selection_writes(&self) -> usize {
        self.selection_writes
    }

    /// Pop the oldest queued selection-changed notification.
    pub fn take_notification(&mut self) -> Option<FaceSet> {
        self.pending.pop_front()
    }

    /// Deliver queued notifications to `controller` until the queue drains.
    ///
    /// Notifications produced while handling one (the controller's own
    /// writes) are delivered in turn. Delivery stops after
    /// [`MAX_DISPATCH`] notifications.
    ///
    /// # Errors
    ///
    /// Stops at the first handler error and returns it; later
    /// notifications stay queued.
    pub fn dispatch_pending(
        &mut self,
        controller: &mut SelectionController,
    ) -> SelectResult<Vec<EventOutcome>> {
        let mut outcomes = Vec::new();
        while let Some(selection) = self.take_notification() {
            if outcomes.len() == MAX_DISPATCH {
                warn!(
                    dropped = self.pending.len() + 1,
                    "Selection notifications did not settle"
                );
                self.pending.clear();
                break;
            }
            outcomes.push(controller.on_selection_changed(self, selection)?);
        }
        Ok(outcomes)
    }

    fn replace_selection(&mut self, selection: FaceSet) {
        if selection != self.selection {
            self.selection = selection.clone();
            self.pending.push_back(selection);
        }
    }

    fn entry(&self, mesh: MeshId) -> HostResult<&SceneMesh> {
        self.meshes
            .get(mesh.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(HostError::UnknownMesh { mesh })
    }

    fn entry_mut(&mut self, mesh: MeshId) -> HostResult<&mut SceneMesh> {
        self.meshes
            .get_mut(mesh.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(HostError::UnknownMesh { mesh })
    }

    fn check_face(&self, face: FaceRef) -> HostResult<&SceneMesh> {
        let entry = self.entry(face.mesh).map_err(|_| HostError::StaleFace { face })?;
        if face.index as usize >= entry.mesh.face_count() {
            return Err(HostError::StaleFace { face });
        }
        Ok(entry)
    }

    /// Apply `op` to every face, after validating all of them.
    fn edit_faces<F>(&mut self, faces: &FaceSet, mut op: F) -> HostResult<()>
    where
        F: FnMut(&mut ColorMesh, u32) -> Result<(), MeshError>,
    {
        for &face in faces {
            self.check_face(face)?;
        }
        for &face in faces {
            let entry = self.entry_mut(face.mesh)?;
            op(&mut entry.mesh, face.index).map_err(|_| HostError::StaleFace { face })?;
        }
        Ok(())
    }
}

impl MeshQuery for Scene {
    fn face_vertex_colors(&self, face: FaceRef) -> HostResult<Vec<Rgb>> {
        self.check_face(face)?
            .mesh
            .corner_colors(face.index)
            .map_err(|_| HostError::StaleFace { face })
    }

    fn list_all_faces(&self, mesh: MeshId) -> HostResult<Vec<FaceRef>> {
        let entry = self.entry(mesh)?;
        let count = u32::try_from(entry.mesh.face_count()).unwrap_or(u32::MAX);
        Ok((0..count).map(|index| FaceRef::new(mesh, index)).collect())
    }

    fn adjacent_faces(&self, face: FaceRef) -> HostResult<Vec<FaceRef>> {
        let entry = self.check_face(face)?;
        Ok(entry
            .adjacency
            .neighbors(face.index)
            .iter()
            .map(|&index| FaceRef::new(face.mesh, index))
            .collect())
    }
}

impl MeshHost for Scene {
    fn current_selection(&self) -> HostResult<FaceSet> {
        Ok(self.selection.clone())
    }

    fn modifier_state(&self) -> Modifiers {
        self.modifiers
    }

    fn set_selection(&mut self, faces: &FaceSet) -> HostResult<()> {
        for &face in faces {
            self.check_face(face)?;
        }
        self.selection_writes += 1;
        self.replace_selection(faces.clone());
        Ok(())
    }

    fn set_face_colors(&mut self, faces: &FaceSet, color: Rgb) -> HostResult<()> {
        self.edit_faces(faces, |mesh, index| mesh.paint_face(index, color))
    }

    fn clear_face_colors(&mut self, faces: &FaceSet) -> HostResult<()> {
        self.edit_faces(faces, ColorMesh::clear_face)
    }

    fn display_message(&mut self, text: &str, severity: Severity) {
        self.messages.push((severity, text.to_owned()));
    }

    fn show_reference_color(&mut self, readout: Option<&ColorReadout>) {
        self.readout = readout.map(ToString::to_string);
    }
}
