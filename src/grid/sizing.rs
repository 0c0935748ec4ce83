//! Grid resolution from the bounding-box aspect ratio and a target occupancy.

use crate::error::GridError;

/// Whether an extent is too small to be partitioned.
#[inline]
pub fn is_degenerate(delta: f64) -> bool {
    delta.abs() < f64::EPSILON
}

#[inline]
fn ceil_steps(v: f64) -> usize {
    // Saturating float-to-int cast; NaN becomes 0 and is lifted to 1.
    (v.ceil() as usize).max(1)
}

/// Computes the number of cells along each axis.
///
/// Cells follow the proportions of `deltas` and hold `max_per_cell` points on average.
/// Axes with a degenerate extent always get a single cell, and a set that fits the target
/// occupancy is kept in a single cell altogether.
pub fn grid_shape(n_points: usize, deltas: [f64; 3], max_per_cell: usize) -> [usize; 3] {
    let n = n_points as f64;
    let per_cell = max_per_cell.max(1) as f64;
    let degenerate = deltas.map(is_degenerate);
    let live: Vec<usize> = (0..3).filter(|&k| !degenerate[k]).collect();

    let mut steps = [1usize; 3];
    if n_points <= max_per_cell {
        return steps;
    }
    match live.as_slice() {
        [] => {}
        &[a] => {
            steps[a] = ceil_steps(n / per_cell);
        }
        &[a, b] => {
            let na = ceil_steps((n * deltas[a] / (per_cell * deltas[b])).sqrt());
            steps[a] = na;
            steps[b] = ceil_steps(na as f64 * deltas[b] / deltas[a]);
        }
        _ => {
            let n0 = ceil_steps(
                (n * deltas[0] * deltas[0] / (per_cell * deltas[1] * deltas[2])).cbrt(),
            );
            steps[0] = n0;
            steps[1] = ceil_steps(n0 as f64 * deltas[1] / deltas[0]);
            steps[2] = ceil_steps(n0 as f64 * deltas[2] / deltas[0]);
        }
    }
    steps
}

/// Total cell count for `shape`, rejecting shapes above `limit` or that overflow `usize`.
pub fn checked_cell_count(shape: [usize; 3], limit: usize) -> Result<usize, GridError> {
    shape[0]
        .checked_mul(shape[1])
        .and_then(|plane| plane.checked_mul(shape[2]))
        .filter(|&cells| cells <= limit)
        .ok_or(GridError::GridTooLarge { shape, limit })
}

/// Shrinks `shape` until it fits in `limit` cells and returns it with its cell count.
///
/// Axes with more than one cell are divided evenly by the root of the overshoot, so the
/// proportions survive. Queries stay exact on any shape, only occupancy grows. Fails only
/// when not even a single cell is allowed.
pub fn fit_cell_limit(shape: [usize; 3], limit: usize) -> Result<([usize; 3], usize), GridError> {
    if limit == 0 {
        return Err(GridError::GridTooLarge { shape, limit });
    }
    let total: f64 = shape.iter().map(|&n| n as f64).product();
    let mut fitted = shape;
    if total > limit as f64 {
        let live = shape.iter().filter(|&&n| n > 1).count();
        let factor = (total / limit as f64).powf(1.0 / live as f64);
        for n in fitted.iter_mut().filter(|n| **n > 1) {
            *n = ((*n as f64 / factor).floor() as usize).max(1);
        }
        // Rounding in the root can leave the product just above the limit.
        while checked_cell_count(fitted, limit).is_err() {
            let (axis, &largest) = fitted
                .iter()
                .enumerate()
                .max_by_key(|&(_, n)| *n)
                .unwrap_or((0, &1));
            if largest <= 1 {
                break;
            }
            fitted[axis] -= 1;
        }
    }
    checked_cell_count(fitted, limit).map(|cells| (fitted, cells))
}

/// Per-axis step sizes and their inverses.
///
/// A zero step (single cell over a zero extent) gets an inverse of 1.0 so that the
/// cell mapping stays finite and lands on cell 0.
pub fn step_sizes(deltas: [f64; 3], shape: [usize; 3]) -> ([f64; 3], [f64; 3]) {
    let mut steps = [0.0; 3];
    let mut inverse = [1.0; 3];
    for k in 0..3 {
        steps[k] = deltas[k] / shape[k] as f64;
        if steps[k] != 0.0 {
            inverse[k] = 1.0 / steps[k];
        }
    }
    (steps, inverse)
}
