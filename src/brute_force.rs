use crate::error::GridError;
use crate::index::{Neighbor, SpatialIndex};
use crate::point::{distance_sq, PointSet};

/// Linear-scan index over the same point sets as [`PointGrid`](crate::PointGrid).
///
/// Every query is O(N). It serves as the reference result in tests and as the baseline
/// in benchmarks. Plain squared distances are compared, so queries far enough away for
/// them to overflow see every point as a tie.
#[derive(Clone, Debug)]
pub struct BruteForce<S> {
    points: S,
}

impl<S: PointSet> BruteForce<S> {
    pub fn new(points: S) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &S {
        &self.points
    }
}

impl<S: PointSet + Send + Sync> SpatialIndex for BruteForce<S> {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn nearest_neighbor(&self, query: [f64; 3]) -> Result<Neighbor, GridError> {
        (0..self.points.len())
            .map(|h| Neighbor::new(h, distance_sq(&self.points.position(h), &query)))
            .reduce(|best, n| if n.distance_sq < best.distance_sq { n } else { best })
            .ok_or(GridError::EmptyIndex)
    }

    /// Exactly the points inside the closed cube.
    fn within(&self, center: [f64; 3], half_length: f64) -> Vec<usize> {
        (0..self.points.len())
            .filter(|&h| {
                let p = self.points.position(h);
                (0..3).all(|k| (p[k] - center[k]).abs() <= half_length)
            })
            .collect()
    }
}
