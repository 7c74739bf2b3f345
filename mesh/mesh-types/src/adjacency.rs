//! Face-to-face adjacency over shared edges.

use hashbrown::HashMap;

use crate::mesh::ColorMesh;

/// Face adjacency information.
///
/// Two faces are adjacent if they share an edge. Faces that only touch at a
/// vertex are not neighbors. Non-manifold edges connect every face on the
/// edge to every other one.
#[derive(Debug, Clone, Default)]
pub struct FaceAdjacency {
    /// For each face, the sorted list of adjacent face indices.
    adjacent: Vec<Vec<u32>>,
}

impl FaceAdjacency {
    /// Build face adjacency from a mesh.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{quad_grid, FaceAdjacency};
    ///
    /// let grid = quad_grid(2, 2);
    /// let adj = FaceAdjacency::from_mesh(&grid);
    ///
    /// // Corner quad touches its right and upper neighbors, not the diagonal.
    /// assert_eq!(adj.neighbors(0), &[1, 2]);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // face count fits u32, see ColorMesh::add_face
    pub fn from_mesh(mesh: &ColorMesh) -> Self {
        let mut edge_to_faces: HashMap<(u32, u32), Vec<u32>> = HashMap::new();

        for (face_idx, face) in mesh.faces().iter().enumerate() {
            for edge in face.edges() {
                edge_to_faces.entry(edge).or_default().push(face_idx as u32);
            }
        }

        let mut adjacent: Vec<Vec<u32>> = vec![Vec::new(); mesh.face_count()];

        for faces in edge_to_faces.values() {
            for (i, &a) in faces.iter().enumerate() {
                for &b in &faces[i + 1..] {
                    if a != b {
                        adjacent[a as usize].push(b);
                        adjacent[b as usize].push(a);
                    }
                }
            }
        }

        // Two faces sharing several edges would otherwise appear twice
        for adj_list in &mut adjacent {
            adj_list.sort_unstable();
            adj_list.dedup();
        }

        Self { adjacent }
    }

    /// Get the neighbors of a face.
    ///
    /// Returns an empty slice if the face index is out of bounds.
    #[must_use]
    pub fn neighbors(&self, face: u32) -> &[u32] {
        self.adjacent.get(face as usize).map_or(&[], Vec::as_slice)
    }

    /// Number of faces covered.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.adjacent.len()
    }

    /// Check if two faces share an edge.
    #[must_use]
    pub fn are_adjacent(&self, face_a: u32, face_b: u32) -> bool {
        self.neighbors(face_a).binary_search(&face_b).is_ok()
    }
}
