use crate::config::GridConfig;
use crate::grid::PointGrid;
use crate::point::FlatPoints;
use js_sys::{Float64Array, Uint32Array};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_GRID: &'static str = r#"
export const DEFAULT_MAX_PER_CELL = 512;
"#;

fn handles_to_js(handles: &[usize]) -> Uint32Array {
    let handles: Vec<u32> = handles.iter().map(|&h| h as u32).collect();
    Uint32Array::from(handles.as_slice())
}

/// A point grid over a flat `[x, y, z, x, y, z, ...]` coordinate array.
#[wasm_bindgen(js_name = PointGrid3D)]
pub struct PointGrid3D {
    inner: PointGrid<FlatPoints<Vec<f64>>>,
}

#[wasm_bindgen(js_class = PointGrid3D)]
impl PointGrid3D {
    /// Builds the grid. The coordinates are copied into the index.
    #[wasm_bindgen(constructor)]
    pub fn new(points: &[f64], max_per_cell: usize) -> Result<PointGrid3D, JsError> {
        let config = GridConfig::default().with_max_per_cell(max_per_cell);
        let inner = PointGrid::build_with(FlatPoints::new(points.to_vec()), config)?;
        Ok(PointGrid3D { inner })
    }

    /// Index of the point closest to `(x, y, z)`. Throws on an empty grid.
    pub fn nearest(&self, x: f64, y: f64, z: f64) -> Result<usize, JsError> {
        Ok(self.inner.nearest([x, y, z])?)
    }

    /// Nearest point indices for a flat array of query positions.
    pub fn nearest_batch(&self, queries: &[f64]) -> Result<Uint32Array, JsError> {
        let queries: Vec<[f64; 3]> = queries
            .chunks_exact(3)
            .map(|q| [q[0], q[1], q[2]])
            .collect();
        let handles = self.inner.nearest_batch(&queries)?;
        Ok(handles_to_js(&handles))
    }

    /// Indices of points in cells intersecting the cube around `(x, y, z)`.
    ///
    /// May include points just outside the cube.
    pub fn within(&self, x: f64, y: f64, z: f64, half_length: f64) -> Uint32Array {
        handles_to_js(&self.inner.within([x, y, z], half_length))
    }

    /// Indices of points inside the cube around `(x, y, z)`.
    pub fn within_exact(&self, x: f64, y: f64, z: f64, half_length: f64) -> Uint32Array {
        handles_to_js(&self.inner.within_exact([x, y, z], half_length))
    }

    #[wasm_bindgen(getter)]
    pub fn count_points(&self) -> usize {
        self.inner.len()
    }

    /// Number of cells along x, y and z.
    #[wasm_bindgen(getter)]
    pub fn shape(&self) -> Vec<u32> {
        self.inner.shape().iter().map(|&n| n as u32).collect()
    }

    #[wasm_bindgen(getter)]
    pub fn step_sizes(&self) -> Vec<f64> {
        self.inner.step_sizes().to_vec()
    }

    /// Padded bounds as `[min_x, min_y, min_z, max_x, max_y, max_z]`.
    ///
    /// Empty when there are no points.
    #[wasm_bindgen(getter)]
    pub fn bounds(&self) -> Float64Array {
        match self.inner.bounds() {
            Some(b) => {
                let flat = [b.min[0], b.min[1], b.min[2], b.max[0], b.max[1], b.max[2]];
                Float64Array::from(&flat[..])
            }
            None => Float64Array::new_with_length(0),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> {
        self.inner.points().as_slice().to_vec()
    }
}
