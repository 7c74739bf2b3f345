//! Core mesh types for vertex-color face selection.
//!
//! This crate provides the foundational types the selection engine works on:
//!
//! - [`Rgb`] - A normalized RGB color sample
//! - [`ColorMesh`] - An indexed polygon mesh with per-corner colors
//! - [`Polygon`] - One face of a [`ColorMesh`]
//! - [`FaceAdjacency`] - Face-to-face adjacency over shared edges
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero engine or GUI dependencies**. It can be
//! used in host plugins, CLI tools, servers or tests.
//!
//! # Corner Colors
//!
//! Colors live on face corners (face-vertex pairs). A vertex shared by a red
//! face and a blue face can be red on one and blue on the other, which keeps
//! painted regions crisp along their borders. A face's color is the mean of
//! the samples present on its corners.
//!
//! # Example
//!
//! ```
//! use mesh_types::{quad_grid, FaceAdjacency, Rgb};
//!
//! let mut grid = quad_grid(3, 1);
//! grid.paint_face(0, Rgb::RED).unwrap();
//! grid.paint_face(1, Rgb::BLUE).unwrap();
//!
//! let adj = FaceAdjacency::from_mesh(&grid);
//! assert_eq!(adj.neighbors(1), &[0, 2]);
//! assert!(grid.corner_colors(2).unwrap().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod color;
mod error;
mod mesh;

pub use adjacency::FaceAdjacency;
pub use color::Rgb;
pub use error::{MeshError, MeshResult};
pub use mesh::{quad_grid, ColorMesh, Polygon};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
