use crate::bounds::BoundingBox;
use crate::config::GridConfig;
use crate::error::GridError;
use crate::index::{Neighbor, SpatialIndex};
use crate::point::PointSet;

mod batch;
pub mod frame;
mod nearest;
mod range;
pub mod sizing;
pub mod store;

use frame::GridFrame;
use sizing::{fit_cell_limit, grid_shape};
use store::CellStore;

/// A static spatial index over a fixed set of 3D points.
///
/// The points are binned into a uniform grid whose resolution follows the aspect ratio of
/// their bounding box, with about `max_per_cell` points per cell. Cells only hold handles
/// into the point set `S`; coordinates are always read back through [`PointSet::position`].
///
/// The structure is built once and never mutated afterwards, so shared references can be
/// queried from any number of threads. To change the point set, build a new grid.
#[derive(Clone, Debug)]
pub struct PointGrid<S> {
    pub(crate) points: S,
    pub(crate) frame: GridFrame,
    pub(crate) store: CellStore,
    pub(crate) config: GridConfig,
}

impl<S: PointSet> PointGrid<S> {
    /// Builds a grid with the default target of 512 points per cell.
    pub fn build(points: S) -> Result<Self, GridError> {
        Self::build_with(points, GridConfig::default())
    }

    /// Builds a grid with an explicit configuration.
    ///
    /// Fails on an invalid configuration or on non-finite coordinates. A shape above
    /// `config.max_cells` is scaled down to fit. An empty point set builds successfully;
    /// only nearest-neighbor queries on it report [`GridError::EmptyIndex`].
    pub fn build_with(points: S, config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let count = points.len();

        let mut bounds = BoundingBox::<3>::empty();
        for handle in 0..count {
            let position = points.position(handle);
            if !position.iter().all(|c| c.is_finite()) {
                log::warn!("point {handle} has a non-finite position {position:?}");
                return Err(GridError::NonFiniteCoordinate { handle, position });
            }
            bounds.update(&position);
        }

        if count == 0 {
            log::debug!("building empty point grid");
            let frame = GridFrame::new(BoundingBox::new([0.0; 3], [0.0; 3]), [1, 1, 1]);
            return Ok(Self {
                points,
                frame,
                store: CellStore::from_cell_indices(&[], 1),
                config,
            });
        }

        let bounds = bounds.padded();
        let sized = grid_shape(count, bounds.deltas(), config.max_per_cell);
        let (shape, cells) = fit_cell_limit(sized, config.max_cells).inspect_err(|_| {
            log::warn!("no grid shape fits in {} cells", config.max_cells);
        })?;
        if shape != sized {
            log::debug!(
                "grid shape {sized:?} for {count} points exceeds {} cells, using {shape:?}",
                config.max_cells
            );
        }
        let frame = GridFrame::new(bounds, shape);

        let mut cell_of = Vec::with_capacity(count);
        for handle in 0..count {
            let position = points.position(handle);
            let cell = frame.construction_cell(&position).map_err(|cell| {
                log::error!(
                    "point {handle} at {position:?} mapped to cell {cell:?} outside {shape:?}, \
                     bounds {bounds:?}"
                );
                GridError::CellOutOfRange { handle, cell, shape }
            })?;
            cell_of.push(frame.linear_index(cell));
        }

        let store = CellStore::from_cell_indices(&cell_of, cells);
        debug_assert_eq!(store.len(), count, "every point lands in exactly one cell");

        log::debug!(
            "built point grid: {count} points, shape {shape:?}, steps {:?}, \
             {} of {cells} cells occupied",
            frame.step_sizes,
            store.occupied_cells()
        );

        Ok(Self {
            points,
            frame,
            store,
            config,
        })
    }
}

impl<S> PointGrid<S> {
    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of cells along each axis.
    pub fn shape(&self) -> [usize; 3] {
        self.frame.shape
    }

    /// Edge length of a cell along each axis.
    pub fn step_sizes(&self) -> [f64; 3] {
        self.frame.step_sizes
    }

    pub fn cell_count(&self) -> usize {
        self.frame.cell_count()
    }

    /// The padded bounding box, or `None` when no points were indexed.
    pub fn bounds(&self) -> Option<&BoundingBox<3>> {
        (!self.is_empty()).then_some(&self.frame.bounds)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Handles stored in the cell at integer coordinates `cell`.
    pub fn bucket(&self, cell: [usize; 3]) -> Option<&[usize]> {
        let inside = (0..3).all(|k| cell[k] < self.frame.shape[k]);
        inside.then(|| self.store.bucket(self.frame.linear_index(cell)))
    }

    /// Cell coordinates of `position`, clamped to the grid.
    pub fn cell_of(&self, position: [f64; 3]) -> [usize; 3] {
        self.frame.clamped_cell(&position)
    }

    /// Largest number of points in a single cell.
    pub fn max_occupancy(&self) -> usize {
        self.store.max_occupancy()
    }

    pub fn points(&self) -> &S {
        &self.points
    }

    /// Releases the grid and hands the point set back.
    pub fn into_points(self) -> S {
        self.points
    }
}

impl<S: PointSet + Send + Sync> SpatialIndex for PointGrid<S> {
    fn len(&self) -> usize {
        PointGrid::len(self)
    }

    fn nearest_neighbor(&self, query: [f64; 3]) -> Result<Neighbor, GridError> {
        PointGrid::nearest_neighbor(self, query)
    }

    fn within(&self, center: [f64; 3], half_length: f64) -> Vec<usize> {
        PointGrid::within(self, center, half_length)
    }
}
