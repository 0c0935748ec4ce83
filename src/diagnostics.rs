//! Per-cell geometry of a [`PointGrid`], for inspection and visualization.
//!
//! Only compiled in debug builds or with the `diagnostics` feature. Nothing in the query
//! path depends on it.
//!
//! Corner numbering of a cell:
//!
//! ```text
//!       7 -------- 6
//!      /:         /|
//!     / :        / |
//!    4 -------- 5  |
//!    |  3 ......|. 2
//!    | .        | /
//!    |.         |/
//!    0 -------- 1
//! ```
//!
//! with x pointing from 0 to 1, y from 0 to 3 and z from 0 to 4.

use crate::grid::frame::{FACE_BACK, FACE_BOTTOM, FACE_FRONT, FACE_LEFT, FACE_RIGHT, FACE_TOP};
use crate::grid::PointGrid;

/// Corner indices of each face, indexed by the `FACE_*` constants.
pub const CELL_FACES: [[usize; 4]; 6] = {
    let mut faces = [[0; 4]; 6];
    faces[FACE_BOTTOM] = [0, 3, 2, 1];
    faces[FACE_FRONT] = [0, 1, 5, 4];
    faces[FACE_RIGHT] = [1, 2, 6, 5];
    faces[FACE_BACK] = [2, 3, 7, 6];
    faces[FACE_LEFT] = [3, 0, 4, 7];
    faces[FACE_TOP] = [4, 5, 6, 7];
    faces
};

/// Corner index pairs of the twelve cell edges: bottom ring, top ring, then verticals.
pub const CELL_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// The box of one grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellGeometry {
    pub cell: [usize; 3],
    pub corners: [[f64; 3]; 8],
    pub occupancy: usize,
}

impl CellGeometry {
    /// Name in the form `Grid-i-j-k`.
    pub fn name(&self) -> String {
        format!("Grid-{}-{}-{}", self.cell[0], self.cell[1], self.cell[2])
    }

    /// Flat `[x, y, z, ...]` corner coordinates.
    pub fn vertices(&self) -> Vec<f64> {
        self.corners.iter().flatten().copied().collect()
    }
}

/// Receiver for exported cell geometry, implemented by the visualization side.
pub trait CellGeometrySink {
    fn add_cell(&mut self, cell: &CellGeometry);

    /// Called once after the last cell.
    fn finish(&mut self) {}
}

impl CellGeometrySink for Vec<CellGeometry> {
    fn add_cell(&mut self, cell: &CellGeometry) {
        self.push(cell.clone());
    }
}

impl<S> PointGrid<S> {
    /// Geometry of the cell at integer coordinates `cell`.
    ///
    /// Returns `None` for coordinates outside the grid.
    pub fn cell_geometry(&self, cell: [usize; 3]) -> Option<CellGeometry> {
        let occupancy = self.bucket(cell)?.len();
        let lo = self.frame.cell_origin(cell);
        let step = self.frame.step_sizes;
        let hi = [lo[0] + step[0], lo[1] + step[1], lo[2] + step[2]];
        let corners = [
            [lo[0], lo[1], lo[2]],
            [hi[0], lo[1], lo[2]],
            [hi[0], hi[1], lo[2]],
            [lo[0], hi[1], lo[2]],
            [lo[0], lo[1], hi[2]],
            [hi[0], lo[1], hi[2]],
            [hi[0], hi[1], hi[2]],
            [lo[0], hi[1], hi[2]],
        ];
        Some(CellGeometry {
            cell,
            corners,
            occupancy,
        })
    }

    /// Sends every cell to `sink`, x fastest, then y, then z.
    pub fn export_cells<K>(&self, sink: &mut K)
    where
        K: CellGeometrySink + ?Sized,
    {
        let shape = self.frame.shape;
        for k in 0..shape[2] {
            for j in 0..shape[1] {
                for i in 0..shape[0] {
                    if let Some(geometry) = self.cell_geometry([i, j, k]) {
                        sink.add_cell(&geometry);
                    }
                }
            }
        }
        sink.finish();
    }
}
