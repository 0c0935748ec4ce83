use crate::grid::PointGrid;
use crate::point::PointSet;

impl<S> PointGrid<S> {
    /// Handles of all points stored in cells that intersect the cube
    /// `[center - half_length, center + half_length]^3`.
    ///
    /// Cells that only partly overlap the cube contribute all of their points, so the result
    /// is a superset of the points inside the cube; use [`PointGrid::within_exact`] when exact
    /// membership is needed. A negative or NaN half-length, or a non-finite center, selects
    /// nothing.
    pub fn within(&self, center: [f64; 3], half_length: f64) -> Vec<usize> {
        let mut handles = Vec::new();
        self.visit_cube(&center, half_length, |h| handles.push(h));
        handles
    }

    /// Calls `visitor` for every handle in the cells intersecting the cube.
    pub(crate) fn visit_cube<F>(&self, center: &[f64; 3], half_length: f64, mut visitor: F)
    where
        F: FnMut(usize),
    {
        if !(half_length >= 0.0) || !center.iter().all(|c| c.is_finite()) {
            return;
        }
        let (lo, hi) = self.frame.cube_cells(center, half_length);
        for k in lo[2]..=hi[2] {
            for j in lo[1]..=hi[1] {
                let row = self.frame.linear_index([0, j, k]);
                for i in lo[0]..=hi[0] {
                    self.store.bucket(row + i).iter().for_each(|&h| visitor(h));
                }
            }
        }
    }
}

impl<S: PointSet> PointGrid<S> {
    /// Handles of the points inside the closed cube, filtered by coordinate.
    pub fn within_exact(&self, center: [f64; 3], half_length: f64) -> Vec<usize> {
        let mut handles = Vec::new();
        self.visit_cube(&center, half_length, |h| {
            let p = self.points.position(h);
            if (0..3).all(|k| (p[k] - center[k]).abs() <= half_length) {
                handles.push(h);
            }
        });
        handles
    }

    /// Handles of the points within Euclidean distance `radius` of `center`.
    pub fn within_radius(&self, center: [f64; 3], radius: f64) -> Vec<usize> {
        let radius_sq = radius * radius;
        let mut handles = Vec::new();
        self.visit_cube(&center, radius, |h| {
            if crate::point::distance_sq(&self.points.position(h), &center) <= radius_sq {
                handles.push(h);
            }
        });
        handles
    }
}
