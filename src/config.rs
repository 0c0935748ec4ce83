use crate::error::GridError;

/// Default target of points per cell, on average.
pub const DEFAULT_MAX_PER_CELL: usize = 512;

/// Default upper bound on the number of cells a grid may allocate.
///
/// Larger shapes are scaled down to this many cells before the buckets are allocated.
pub const DEFAULT_MAX_CELLS: usize = 1 << 22;

/// Construction parameters for a [`PointGrid`](crate::PointGrid).
///
/// `max_per_cell` drives the sizing: the grid is shaped so that `points / cells`
/// approximates it. `max_cells` caps the allocation; a shape above it is scaled down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub max_per_cell: usize,
    pub max_cells: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_per_cell: DEFAULT_MAX_PER_CELL,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl GridConfig {
    pub fn with_max_per_cell(mut self, max_per_cell: usize) -> Self {
        self.max_per_cell = max_per_cell;
        self
    }

    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.max_per_cell == 0 {
            return Err(GridError::InvalidMaxPerCell);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.max_per_cell, 512);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_occupancy_rejected() {
        let config = GridConfig::default().with_max_per_cell(0);
        assert_eq!(config.validate(), Err(GridError::InvalidMaxPerCell));
    }
}
