//! Face selection strategies.
//!
//! Both strategies test faces with the same predicate: a face matches when
//! it carries color data and its averaged color lies within the threshold
//! distance of the reference color. Faces without color data never match.

use std::collections::VecDeque;

use hashbrown::HashSet;
use mesh_types::Rgb;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color_model::{average_color, distance, within_channel_tolerance};
use crate::host::{FaceRef, FaceSet, HostResult, MeshId, MeshQuery};

/// How far a match is allowed to spread from the seed face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MatchStrategy {
    /// Flood fill: only faces connected to the seed through matching faces.
    #[default]
    Contiguous,
    /// Every matching face of the seed's mesh.
    Exhaustive,
}

/// Averaged color of a face, or `None` if it carries no color data.
///
/// # Errors
///
/// Propagates host failures; missing color data is not an error.
pub fn face_color<Q: MeshQuery + ?Sized>(query: &Q, face: FaceRef) -> HostResult<Option<Rgb>> {
    let samples = query.face_vertex_colors(face)?;
    Ok(average_color(&samples).ok())
}

/// Run `strategy` from `seed`.
///
/// The exhaustive scan covers the seed's mesh.
///
/// # Errors
///
/// Propagates host failures.
pub fn select_matching<Q: MeshQuery + ?Sized>(
    query: &Q,
    strategy: MatchStrategy,
    seed: FaceRef,
    reference: Rgb,
    threshold: f64,
) -> HostResult<FaceSet> {
    match strategy {
        MatchStrategy::Contiguous => flood_fill(query, seed, reference, threshold),
        MatchStrategy::Exhaustive => exhaustive_scan(query, seed.mesh, reference, threshold),
    }
}

/// Select every face of `mesh` within `threshold` of `reference`.
///
/// # Errors
///
/// Propagates host failures.
pub fn exhaustive_scan<Q: MeshQuery + ?Sized>(
    query: &Q,
    mesh: MeshId,
    reference: Rgb,
    threshold: f64,
) -> HostResult<FaceSet> {
    let selected = scan_where(query, mesh, |color| distance(color, reference) <= threshold)?;
    debug!(%mesh, threshold, faces = selected.len(), "Exhaustive scan");
    Ok(selected)
}

/// Select every face of `mesh` whose channels each differ from `reference`
/// by less than `tolerance`.
///
/// # Errors
///
/// Propagates host failures.
pub fn scan_by_channel<Q: MeshQuery + ?Sized>(
    query: &Q,
    mesh: MeshId,
    reference: Rgb,
    tolerance: f64,
) -> HostResult<FaceSet> {
    let selected = scan_where(query, mesh, |color| {
        within_channel_tolerance(color, reference, tolerance)
    })?;
    debug!(%mesh, tolerance, faces = selected.len(), "Per-channel scan");
    Ok(selected)
}

/// Breadth-first flood fill from `start`, gated by color distance.
///
/// Each face is tested once. Only matching faces are expanded, so the
/// region never crosses a face that fails the test, even when faces beyond
/// it would match. The start face is tested like any other: an uncolored or
/// non-matching seed yields an empty set.
///
/// # Errors
///
/// Propagates host failures.
pub fn flood_fill<Q: MeshQuery + ?Sized>(
    query: &Q,
    start: FaceRef,
    reference: Rgb,
    threshold: f64,
) -> HostResult<FaceSet> {
    let mut visited: HashSet<FaceRef> = HashSet::new();
    let mut selected = FaceSet::new();
    let mut queue: VecDeque<FaceRef> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(face) = queue.pop_front() {
        let Some(color) = face_color(query, face)? else {
            continue;
        };
        if distance(color, reference) > threshold {
            continue;
        }

        selected.insert(face);

        for neighbor in query.adjacent_faces(face)? {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    debug!(
        %start,
        threshold,
        visited = visited.len(),
        faces = selected.len(),
        "Flood fill"
    );
    Ok(selected)
}

fn scan_where<Q, F>(query: &Q, mesh: MeshId, matches: F) -> HostResult<FaceSet>
where
    Q: MeshQuery + ?Sized,
    F: Fn(Rgb) -> bool,
{
    let mut selected = FaceSet::new();
    for face in query.list_all_faces(mesh)? {
        if face_color(query, face)?.is_some_and(&matches) {
            selected.insert(face);
        }
    }
    Ok(selected)
}
