//! Indexed polygon mesh with per-corner color samples.

use nalgebra::Point3;
use smallvec::SmallVec;

use crate::color::Rgb;
use crate::error::{MeshError, MeshResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One polygon of a [`ColorMesh`].
///
/// Colors are stored per corner (face-vertex), not per vertex, so two faces
/// sharing a vertex can carry different colors there. A corner without a
/// sample holds `None`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    vertices: SmallVec<[u32; 4]>,
    colors: SmallVec<[Option<Rgb>; 4]>,
}

impl Polygon {
    fn new(vertices: &[u32]) -> Self {
        Self {
            vertices: SmallVec::from_slice(vertices),
            colors: SmallVec::from_elem(None, vertices.len()),
        }
    }

    /// Vertex indices in winding order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[u32] {
        &self.vertices
    }

    /// Corner color samples, parallel to [`Polygon::vertices`].
    #[inline]
    #[must_use]
    pub fn colors(&self) -> &[Option<Rgb>] {
        &self.colors
    }

    /// Number of corners.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false for faces built through [`ColorMesh::add_face`].
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether at least one corner carries a color sample.
    #[must_use]
    pub fn has_color(&self) -> bool {
        self.colors.iter().any(Option::is_some)
    }

    /// Edges of the polygon, each normalized so the smaller index comes first.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| normalize_edge(self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// An indexed polygon mesh whose faces carry corner colors.
///
/// Faces are addressed by their position in insertion order; indices never
/// change once a face is added.
///
/// # Example
///
/// ```
/// use mesh_types::{ColorMesh, Point3, Rgb};
///
/// let mut mesh = ColorMesh::new();
/// let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
/// let face = mesh.add_face(&[a, b, c]).unwrap();
///
/// mesh.paint_face(face, Rgb::RED).unwrap();
/// assert_eq!(mesh.corner_colors(face).unwrap(), vec![Rgb::RED; 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,

    faces: Vec<Polygon>,
}

impl ColorMesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Append a vertex and return its index.
    #[allow(clippy::cast_possible_truncation)] // meshes beyond u32::MAX vertices are not supported
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        self.positions.push(position);
        (self.positions.len() - 1) as u32
    }

    /// Append a polygon and return its face index.
    ///
    /// New faces carry no color data.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegenerateFace`] if the polygon has fewer than
    /// three corners or repeats a vertex, and
    /// [`MeshError::InvalidVertexIndex`] if a vertex does not exist.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_face(&mut self, vertices: &[u32]) -> MeshResult<u32> {
        if vertices.len() < 3 {
            return Err(MeshError::DegenerateFace {
                reason: format!("{} corners, need at least 3", vertices.len()),
            });
        }
        for (i, &v) in vertices.iter().enumerate() {
            if v as usize >= self.positions.len() {
                return Err(MeshError::InvalidVertexIndex {
                    index: v,
                    vertex_count: self.positions.len(),
                });
            }
            if vertices[..i].contains(&v) {
                return Err(MeshError::DegenerateFace {
                    reason: format!("vertex {v} repeated"),
                });
            }
        }

        self.faces.push(Polygon::new(vertices));
        Ok((self.faces.len() - 1) as u32)
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Get a face by index.
    #[inline]
    #[must_use]
    pub fn face(&self, index: u32) -> Option<&Polygon> {
        self.faces.get(index as usize)
    }

    /// All faces in index order.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[Polygon] {
        &self.faces
    }

    /// The color samples present on a face, in corner order.
    ///
    /// Corners without a sample are skipped; an uncolored face yields an
    /// empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::FaceOutOfBounds`] for an unknown face.
    pub fn corner_colors(&self, face: u32) -> MeshResult<Vec<Rgb>> {
        let polygon = self.face_checked(face)?;
        Ok(polygon.colors.iter().flatten().copied().collect())
    }

    /// Set every corner of a face to one color.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::FaceOutOfBounds`] for an unknown face.
    pub fn paint_face(&mut self, face: u32, color: Rgb) -> MeshResult<()> {
        let polygon = self.face_checked_mut(face)?;
        polygon.colors.iter_mut().for_each(|c| *c = Some(color));
        Ok(())
    }

    /// Set a single corner's color.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::FaceOutOfBounds`] or
    /// [`MeshError::CornerOutOfBounds`] for invalid indices.
    pub fn set_corner_color(&mut self, face: u32, corner: usize, color: Rgb) -> MeshResult<()> {
        let polygon = self.face_checked_mut(face)?;
        let corner_count = polygon.colors.len();
        let slot = polygon
            .colors
            .get_mut(corner)
            .ok_or(MeshError::CornerOutOfBounds {
                face,
                corner,
                corner_count,
            })?;
        *slot = Some(color);
        Ok(())
    }

    /// Remove all color samples from a face.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::FaceOutOfBounds`] for an unknown face.
    pub fn clear_face(&mut self, face: u32) -> MeshResult<()> {
        let polygon = self.face_checked_mut(face)?;
        polygon.colors.iter_mut().for_each(|c| *c = None);
        Ok(())
    }

    fn face_checked(&self, face: u32) -> MeshResult<&Polygon> {
        let face_count = self.faces.len();
        self.faces
            .get(face as usize)
            .ok_or(MeshError::FaceOutOfBounds {
                index: face,
                face_count,
            })
    }

    fn face_checked_mut(&mut self, face: u32) -> MeshResult<&mut Polygon> {
        let face_count = self.faces.len();
        self.faces
            .get_mut(face as usize)
            .ok_or(MeshError::FaceOutOfBounds {
                index: face,
                face_count,
            })
    }
}

/// Create a flat grid of unit quads in the XY plane, without colors.
///
/// Faces are numbered row-major: the quad at `(col, row)` has index
/// `row * cols + col`. Horizontally and vertically neighboring quads share an
/// edge; diagonal neighbors only share a vertex.
///
/// # Example
///
/// ```
/// use mesh_types::quad_grid;
///
/// let grid = quad_grid(3, 2);
/// assert_eq!(grid.face_count(), 6);
/// assert_eq!(grid.vertex_count(), 12);
/// ```
#[must_use]
pub fn quad_grid(cols: u32, rows: u32) -> ColorMesh {
    let stride = cols + 1;
    let mut mesh = ColorMesh::with_capacity(
        (stride * (rows + 1)) as usize,
        (cols * rows) as usize,
    );

    for y in 0..=rows {
        for x in 0..=cols {
            mesh.add_vertex(Point3::new(f64::from(x), f64::from(y), 0.0));
        }
    }

    for y in 0..rows {
        for x in 0..cols {
            let v0 = y * stride + x;
            // Indices are in range and distinct by construction.
            mesh.faces.push(Polygon::new(&[v0, v0 + 1, v0 + stride + 1, v0 + stride]));
        }
    }

    mesh
}

/// Normalize an edge so the smaller vertex index comes first.
#[inline]
fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}
