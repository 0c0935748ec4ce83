use crate::error::GridError;

/// A nearest-neighbor result: the point handle and its squared distance to the query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub handle: usize,
    pub distance_sq: f64,
}

impl Neighbor {
    pub fn new(handle: usize, distance_sq: f64) -> Self {
        Self { handle, distance_sq }
    }

    pub fn distance(&self) -> f64 {
        self.distance_sq.sqrt()
    }
}

/// Trait defining a static point index.
/// This allows swapping the grid for a linear scan when comparing or validating results.
pub trait SpatialIndex: Send + Sync {
    /// Number of indexed points.
    fn len(&self) -> usize;

    /// The exact nearest point to `query`.
    ///
    /// Returns [`GridError::EmptyIndex`] when there are no points.
    fn nearest_neighbor(&self, query: [f64; 3]) -> Result<Neighbor, GridError>;

    /// Handles of points that may lie in the cube `[center - half_length, center + half_length]^3`.
    ///
    /// Implementations may return a superset of the points inside the cube, but never omit one.
    fn within(&self, center: [f64; 3], half_length: f64) -> Vec<usize>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn nearest(&self, query: [f64; 3]) -> Result<usize, GridError> {
        self.nearest_neighbor(query).map(|n| n.handle)
    }
}
