//! Magic-wand face selection by vertex color.
//!
//! This crate selects the faces of a polygon mesh whose averaged vertex
//! color is close to that of a reference face:
//!
//! - **Contiguous** matching flood-fills outward from the reference face
//!   across shared edges and stops at the first face that does not match
//! - **Exhaustive** matching scans every face of the reference face's mesh
//!
//! On top of the two strategies sits [`SelectionController`], a state
//! machine that reacts to host selection and tolerance events: picking a
//! face makes it the reference, holding Shift accumulates regions, and
//! dragging the tolerance slider re-runs the match without losing the
//! reference.
//!
//! # Layer 0 Crate
//!
//! The engine talks to its host only through the [`MeshQuery`] and
//! [`MeshHost`] traits. [`Scene`] implements them in memory for tests and
//! headless tools.
//!
//! # Color Distance
//!
//! Colors are points in the unit RGB cube. A tolerance of `p` percent
//! accepts faces within `p / 100 * sqrt(3)` (Euclidean) of the reference
//! color, so 100% matches every colored face. Faces without color data
//! never match.
//!
//! # Example
//!
//! ```
//! use mesh_color_select::{FaceRef, Scene, SelectConfig, SelectionController};
//! use mesh_types::{quad_grid, Rgb};
//!
//! // Red | red | blue | red
//! let mut grid = quad_grid(4, 1);
//! for (face, color) in [Rgb::RED, Rgb::RED, Rgb::BLUE, Rgb::RED].into_iter().enumerate() {
//!     grid.paint_face(face as u32, color).unwrap();
//! }
//!
//! let mut scene = Scene::new();
//! let mesh = scene.add_mesh(grid);
//! let mut wand = SelectionController::new(SelectConfig::default());
//!
//! scene.pick([FaceRef::new(mesh, 0)]);
//! scene.dispatch_pending(&mut wand).unwrap();
//!
//! // The blue face stops the flood fill before the last red face.
//! let mut selected: Vec<_> = scene.selection().iter().map(|f| f.index).collect();
//! selected.sort_unstable();
//! assert_eq!(selected, vec![0, 1]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod color_model;
mod config;
mod controller;
mod error;
mod host;
mod message;
mod readout;
mod scene;
mod state;
mod traversal;

pub use color_model::{
    average_color, clamp_percent, distance, threshold_from_percent, within_channel_tolerance,
    MAX_RGB_DISTANCE,
};
pub use config::{AccumulationPolicy, SelectConfig, DEFAULT_CHANNEL_TOLERANCE, DEFAULT_THRESHOLD};
pub use controller::{EventOutcome, SelectionController};
pub use error::{SelectError, SelectResult};
pub use host::{
    FaceRef, FaceSet, HostError, HostResult, MeshHost, MeshId, MeshQuery, Modifiers, Severity,
};
pub use message::MessageLog;
pub use readout::ColorReadout;
pub use scene::{Scene, MAX_DISPATCH};
pub use state::SelectionState;
pub use traversal::{
    exhaustive_scan, face_color, flood_fill, scan_by_channel, select_matching, MatchStrategy,
};
