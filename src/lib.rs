//! # pointgrid
//!
//! `pointgrid` is a Rust library for exact nearest-neighbor and cube range queries over a
//! fixed set of 3D points, designed to be used in Rust as well as compiled to WebAssembly
//! (WASM). Points are binned into a uniform grid sized from their bounding box.
//!
//! ## Features
//!
//! - **Adaptive resolution**: The grid follows the aspect ratio of the data and a target
//!   number of points per cell, with flat (2D) and linear (1D) point sets handled explicitly.
//! - **Exact nearest neighbor**: A local or shell search finds a bound that is then verified
//!   against every cell within reach, so results always match a linear scan.
//! - **Borrowed storage**: The index holds handles into any [`PointSet`], never copies of
//!   the points.
//! - **Parallel batches**: Many queries can be answered at once with `rayon`.
//! - **WASM-first**: `PointGrid3D` exposes the index to JavaScript and TypeScript.
//!
//! ## Example
//!
//! ```
//! use pointgrid::{GridConfig, PointGrid};
//!
//! let points = vec![[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [5.0, 8.0, 1.0]];
//! let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(2)).unwrap();
//!
//! assert_eq!(grid.nearest([4.0, 0.0, 0.0]), Ok(0));
//! assert!(grid.within([10.0, 0.0, 0.0], 0.5).contains(&1));
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`PointGrid`] struct.

mod bounds;
mod brute_force;
mod config;
#[cfg(any(debug_assertions, feature = "diagnostics"))]
pub mod diagnostics;
mod error;
pub mod grid;
mod index;
mod point;
mod wasm;

pub use bounds::BoundingBox;
pub use brute_force::BruteForce;
pub use config::GridConfig;
pub use config::DEFAULT_MAX_CELLS;
pub use config::DEFAULT_MAX_PER_CELL;
pub use error::GridError;
pub use grid::PointGrid;
pub use index::Neighbor;
pub use index::SpatialIndex;
pub use point::distance_sq;
pub use point::FlatPoints;
pub use point::Point3;
pub use point::PointSet;
pub use wasm::PointGrid3D;
