use crate::bounds::BoundingBox;
use crate::grid::sizing::step_sizes;

/// Face index of the lower z face (`0,3,2,1` in corner numbering).
pub const FACE_BOTTOM: usize = 0;
/// Face index of the lower y face (`0,1,5,4`).
pub const FACE_FRONT: usize = 1;
/// Face index of the upper x face (`1,2,6,5`).
pub const FACE_RIGHT: usize = 2;
/// Face index of the upper y face (`2,3,7,6`).
pub const FACE_BACK: usize = 3;
/// Face index of the lower x face (`3,0,4,7`).
pub const FACE_LEFT: usize = 4;
/// Face index of the upper z face (`4,5,6,7`).
pub const FACE_TOP: usize = 5;

/// Geometry of a uniform grid laid over a padded bounding box.
///
/// Maps coordinates to integer cell coordinates and linear bucket indices.
#[derive(Clone, Copy, Debug)]
pub struct GridFrame {
    pub bounds: BoundingBox<3>,
    pub shape: [usize; 3],
    pub step_sizes: [f64; 3],
    pub inverse_step_sizes: [f64; 3],
}

impl GridFrame {
    pub fn new(bounds: BoundingBox<3>, shape: [usize; 3]) -> Self {
        let (step_sizes, inverse_step_sizes) = step_sizes(bounds.deltas(), shape);
        Self {
            bounds,
            shape,
            step_sizes,
            inverse_step_sizes,
        }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.shape[0] * self.shape[1] * self.shape[2]
    }

    /// Linear bucket index `i + j * n0 + k * n0 * n1`.
    #[inline]
    pub fn linear_index(&self, cell: [usize; 3]) -> usize {
        cell[0] + cell[1] * self.shape[0] + cell[2] * self.shape[0] * self.shape[1]
    }

    /// Unclamped cell coordinates as used during construction.
    ///
    /// The result may lie outside the grid; callers check it against `shape`.
    #[inline]
    pub fn raw_cell(&self, p: &[f64; 3]) -> [i64; 3] {
        let mut cell = [0i64; 3];
        for k in 0..3 {
            cell[k] = ((p[k] - self.bounds.min[k]) * self.inverse_step_sizes[k]).floor() as i64;
        }
        cell
    }

    /// Cell coordinates of an indexed point, or the offending raw coordinates.
    ///
    /// A point inside the box whose offset rounds up to `shape` is kept in the last cell,
    /// matching [`GridFrame::clamped_cell`]. Anything else outside the grid is an error.
    pub fn construction_cell(&self, p: &[f64; 3]) -> Result<[usize; 3], [i64; 3]> {
        let raw = self.raw_cell(p);
        let inside = self.bounds.contains(p);
        let mut cell = [0usize; 3];
        for k in 0..3 {
            let n = self.shape[k] as i64;
            let c = if raw[k] == n && inside { n - 1 } else { raw[k] };
            if c < 0 || c >= n {
                return Err(raw);
            }
            cell[k] = c as usize;
        }
        Ok(cell)
    }

    /// Cell coordinates for an arbitrary position.
    ///
    /// Positions below the box map to cell 0 on that axis, positions above it map to the
    /// last cell, everything else uses the floored offset.
    #[inline]
    pub fn clamped_cell(&self, p: &[f64; 3]) -> [usize; 3] {
        let mut cell = [0usize; 3];
        for k in 0..3 {
            let last = self.shape[k] - 1;
            cell[k] = if p[k] < self.bounds.min[k] {
                0
            } else if p[k] > self.bounds.max[k] {
                last
            } else {
                // A position exactly on the upper corner would floor to `shape`.
                (((p[k] - self.bounds.min[k]) * self.inverse_step_sizes[k]) as usize).min(last)
            };
        }
        cell
    }

    /// Lower corner of a cell.
    #[inline]
    pub fn cell_origin(&self, cell: [usize; 3]) -> [f64; 3] {
        let mut o = [0.0; 3];
        for k in 0..3 {
            o[k] = self.bounds.min[k] + cell[k] as f64 * self.step_sizes[k];
        }
        o
    }

    /// Signed distances from `p` to the six faces of `cell`.
    ///
    /// Ordered as [`FACE_BOTTOM`], [`FACE_FRONT`], [`FACE_RIGHT`], [`FACE_BACK`],
    /// [`FACE_LEFT`], [`FACE_TOP`]. A distance is negative when `p` lies outside that face.
    pub fn face_distances(&self, p: &[f64; 3], cell: [usize; 3]) -> [f64; 6] {
        let o = self.cell_origin(cell);
        let mut dists = [0.0; 6];

        dists[FACE_BOTTOM] = p[2] - o[2];
        dists[FACE_TOP] = self.step_sizes[2] - dists[FACE_BOTTOM];

        dists[FACE_FRONT] = p[1] - o[1];
        dists[FACE_BACK] = self.step_sizes[1] - dists[FACE_FRONT];

        dists[FACE_LEFT] = p[0] - o[0];
        dists[FACE_RIGHT] = self.step_sizes[0] - dists[FACE_LEFT];

        dists
    }

    /// Inclusive cell range covered by the cube `[center - half, center + half]^3`.
    pub fn cube_cells(&self, center: &[f64; 3], half: f64) -> ([usize; 3], [usize; 3]) {
        let lo = [center[0] - half, center[1] - half, center[2] - half];
        let hi = [center[0] + half, center[1] + half, center[2] + half];
        (self.clamped_cell(&lo), self.clamped_cell(&hi))
    }
}
