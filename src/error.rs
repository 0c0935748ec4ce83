use thiserror::Error;

/// Errors reported while building or querying a [`PointGrid`](crate::PointGrid).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A nearest-neighbor query was issued against an index holding no points.
    #[error("nearest-neighbor query on an empty index")]
    EmptyIndex,

    /// The target occupancy must be at least one point per cell.
    #[error("max_per_cell must be greater than zero")]
    InvalidMaxPerCell,

    /// An input point has a NaN or infinite coordinate.
    #[error("point {handle} has a non-finite coordinate: {position:?}")]
    NonFiniteCoordinate { handle: usize, position: [f64; 3] },

    /// A query position has a NaN or infinite coordinate.
    #[error("query position is not finite: {position:?}")]
    NonFiniteQuery { position: [f64; 3] },

    /// A point mapped outside the allocated cells during construction.
    ///
    /// The padded bounding box should make this impossible, so seeing it means the
    /// padding or sizing logic is wrong.
    #[error("point {handle} mapped to cell {cell:?} outside grid shape {shape:?}")]
    CellOutOfRange {
        handle: usize,
        cell: [i64; 3],
        shape: [usize; 3],
    },

    /// No grid shape fits in the configured cell limit, which only happens for a limit of zero.
    #[error("grid shape {shape:?} exceeds the limit of {limit} cells")]
    GridTooLarge { shape: [usize; 3], limit: usize },
}
