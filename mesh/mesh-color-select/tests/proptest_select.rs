//! Property-based tests for color matching and traversal.
//!
//! Run with: cargo test -p mesh-color-select -- proptest

use std::collections::VecDeque;

use hashbrown::HashSet;
use mesh_color_select::{
    distance, exhaustive_scan, face_color, flood_fill, threshold_from_percent, FaceRef, FaceSet,
    MeshId, MeshQuery, Scene, SelectionController, MAX_RGB_DISTANCE,
};
use mesh_types::{quad_grid, Rgb};
use proptest::prelude::*;

const M: MeshId = MeshId(0);

// =============================================================================
// Strategies
// =============================================================================

fn arb_color() -> impl Strategy<Value = Rgb> {
    prop::array::uniform3(0.0..=1.0f64).prop_map(Rgb::from)
}

/// A grid painted from a small palette, so that regions form. `None` faces
/// stay bare.
fn arb_grid() -> impl Strategy<Value = (Scene, u32)> {
    (1u32..6, 1u32..6).prop_flat_map(|(cols, rows)| {
        let faces = (cols * rows) as usize;
        let palette = prop::collection::vec(arb_color(), 1..4);
        (palette, prop::collection::vec(prop::option::weighted(0.85, 0usize..4), faces))
            .prop_map(move |(palette, picks)| {
                let mut mesh = quad_grid(cols, rows);
                for (face, pick) in picks.iter().enumerate() {
                    if let Some(i) = pick {
                        let color = palette[i % palette.len()];
                        mesh.paint_face(u32::try_from(face).unwrap(), color).unwrap();
                    }
                }
                let mut scene = Scene::new();
                scene.add_mesh(mesh);
                (scene, cols * rows)
            })
    })
}

fn arb_percent() -> impl Strategy<Value = f64> {
    0.0..=100.0f64
}

/// Faces of `region` reachable from `start` without leaving `region`.
fn reachable_within(scene: &Scene, start: FaceRef, region: &FaceSet) -> FaceSet {
    let mut seen: HashSet<FaceRef> = HashSet::new();
    let mut queue = VecDeque::new();
    if region.contains(&start) {
        seen.insert(start);
        queue.push_back(start);
    }
    while let Some(face) = queue.pop_front() {
        for next in scene.adjacent_faces(face).unwrap() {
            if region.contains(&next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

// =============================================================================
// Color model
// =============================================================================

proptest! {
    #[test]
    fn proptest_distance_is_symmetric_and_bounded(a in arb_color(), b in arb_color()) {
        let d = distance(a, b);
        prop_assert_eq!(d, distance(b, a));
        prop_assert!(d >= 0.0);
        prop_assert!(d <= MAX_RGB_DISTANCE + 1e-12);
        prop_assert_eq!(distance(a, a), 0.0);
    }

    #[test]
    fn proptest_threshold_is_monotonic(p in arb_percent(), q in arb_percent()) {
        let (lo, hi) = if p <= q { (p, q) } else { (q, p) };
        prop_assert!(
            threshold_from_percent(lo, MAX_RGB_DISTANCE)
                <= threshold_from_percent(hi, MAX_RGB_DISTANCE)
        );
    }
}

// =============================================================================
// Traversal
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_flood_fill_is_a_connected_subset_of_the_scan(
        (scene, faces) in arb_grid(),
        seed in any::<prop::sample::Index>(),
        percent in arb_percent(),
    ) {
        let seed = FaceRef::new(M, u32::try_from(seed.index(faces as usize)).unwrap());
        let Some(reference) = face_color(&scene, seed).unwrap() else {
            let region = flood_fill(&scene, seed, Rgb::BLACK, MAX_RGB_DISTANCE).unwrap();
            prop_assert!(region.is_empty());
            return Ok(());
        };
        let threshold = threshold_from_percent(percent, MAX_RGB_DISTANCE);

        let region = flood_fill(&scene, seed, reference, threshold).unwrap();
        let scan = exhaustive_scan(&scene, M, reference, threshold).unwrap();

        prop_assert!(region.contains(&seed));
        prop_assert!(region.is_subset(&scan));
        prop_assert_eq!(reachable_within(&scene, seed, &region), region.clone());

        // Maximal: no matching face borders the region from outside.
        for &face in &region {
            for next in scene.adjacent_faces(face).unwrap() {
                if scan.contains(&next) {
                    prop_assert!(region.contains(&next));
                }
            }
        }
    }

    #[test]
    fn proptest_scan_selects_exactly_the_matching_faces(
        (scene, faces) in arb_grid(),
        reference in arb_color(),
        percent in arb_percent(),
    ) {
        let threshold = threshold_from_percent(percent, MAX_RGB_DISTANCE);
        let scan = exhaustive_scan(&scene, M, reference, threshold).unwrap();

        for index in 0..faces {
            let face = FaceRef::new(M, index);
            let matches = face_color(&scene, face)
                .unwrap()
                .is_some_and(|color| distance(color, reference) <= threshold);
            prop_assert_eq!(scan.contains(&face), matches);
        }
    }

    #[test]
    fn proptest_larger_tolerance_never_shrinks_the_region(
        (scene, faces) in arb_grid(),
        seed in any::<prop::sample::Index>(),
        p in arb_percent(),
        q in arb_percent(),
    ) {
        let seed = FaceRef::new(M, u32::try_from(seed.index(faces as usize)).unwrap());
        let Some(reference) = face_color(&scene, seed).unwrap() else {
            return Ok(());
        };
        let (lo, hi) = if p <= q { (p, q) } else { (q, p) };

        let lo = threshold_from_percent(lo, MAX_RGB_DISTANCE);
        let hi = threshold_from_percent(hi, MAX_RGB_DISTANCE);

        let small = flood_fill(&scene, seed, reference, lo).unwrap();
        let large = flood_fill(&scene, seed, reference, hi).unwrap();
        prop_assert!(small.is_subset(&large));
    }
}

// =============================================================================
// Controller
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn proptest_single_pick_selection_tracks_the_slider(
        (mut scene, faces) in arb_grid(),
        seed in any::<prop::sample::Index>(),
        steps in prop::collection::vec(arb_percent(), 1..6),
    ) {
        let seed = FaceRef::new(M, u32::try_from(seed.index(faces as usize)).unwrap());
        let mut wand = SelectionController::default();
        scene.pick([seed]);
        scene.dispatch_pending(&mut wand).unwrap();

        let Some(reference) = wand.state().reference_color() else {
            prop_assert_eq!(scene.selection().len(), 1);
            return Ok(());
        };

        for percent in steps {
            wand.on_threshold_changed(&mut scene, percent).unwrap();
            scene.dispatch_pending(&mut wand).unwrap();

            let threshold = threshold_from_percent(percent, MAX_RGB_DISTANCE);
            let expected = flood_fill(&scene, seed, reference, threshold).unwrap();
            prop_assert_eq!(scene.selection(), &expected);
            prop_assert_eq!(wand.state().reference_face(), Some(seed));
        }
    }
}
