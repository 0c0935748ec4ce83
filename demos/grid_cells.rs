use pointgrid::diagnostics::{CellGeometry, CELL_EDGES, CELL_FACES};
use pointgrid::{GridConfig, PointGrid};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde_json::json;

fn main() {
    env_logger::init();

    // A slab of points, thin along z, so the grid is visibly anisotropic.
    let mut rng = StdRng::seed_from_u64(3);
    let points: Vec<[f64; 3]> = (0..2000)
        .map(|_| [rng.gen_range(0.0..100.0), rng.gen_range(0.0..50.0), rng.gen_range(0.0..5.0)])
        .collect();

    let grid = match PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(32)) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Failed to build grid: {}", e);
            std::process::exit(1);
        }
    };

    let mut cells: Vec<CellGeometry> = Vec::new();
    grid.export_cells(&mut cells);

    let output = json!({
        "shape": grid.shape(),
        "step_sizes": grid.step_sizes(),
        "faces": CELL_FACES,
        "edges": CELL_EDGES,
        "cells": cells
            .iter()
            .map(|cell| json!({
                "name": cell.name(),
                "vertices": cell.vertices(),
                "occupancy": cell.occupancy,
            }))
            .collect::<Vec<_>>(),
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Failed to serialize cells: {}", e),
    }
}
