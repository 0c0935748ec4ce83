use crate::error::GridError;
use crate::grid::PointGrid;
use crate::point::PointSet;
use rayon::prelude::*;

impl<S: PointSet + Sync> PointGrid<S> {
    /// Nearest point for each query, evaluated in parallel.
    ///
    /// The first failing query (empty index, non-finite position) fails the whole batch.
    pub fn nearest_batch(&self, queries: &[[f64; 3]]) -> Result<Vec<usize>, GridError> {
        queries.par_iter().map(|&q| self.nearest(q)).collect()
    }

    /// [`PointGrid::within`] for each `(center, half_length)` pair, evaluated in parallel.
    pub fn within_batch(&self, cubes: &[([f64; 3], f64)]) -> Vec<Vec<usize>> {
        cubes
            .par_iter()
            .map(|&(center, half_length)| self.within(center, half_length))
            .collect()
    }
}
