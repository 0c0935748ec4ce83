use pointgrid::PointGrid;
use rand::prelude::*;
use rand::rngs::StdRng;

fn main() {
    env_logger::init();

    // Initialize Rayon explicitly so thread creation happens
    // before the batch queries we want to profile.
    rayon::ThreadPoolBuilder::new().build_global().unwrap();

    let mut rng = StdRng::seed_from_u64(1);
    let points: Vec<[f64; 3]> = (0..1_000_000)
        .map(|_| [rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)])
        .collect();
    let queries: Vec<[f64; 3]> = (0..1_000_000)
        .map(|_| [rng.gen_range(-10.0..110.0), rng.gen_range(-10.0..110.0), rng.gen_range(-10.0..110.0)])
        .collect();

    let grid = PointGrid::build(&points).unwrap();

    // The hot path.
    let handles = grid.nearest_batch(&queries).unwrap();
    println!("{} queries answered on a {:?} grid", handles.len(), grid.shape());
}
