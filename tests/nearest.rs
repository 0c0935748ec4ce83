use pointgrid::{distance_sq, BruteForce, GridConfig, PointGrid, SpatialIndex};
use rand::prelude::*;
use rand::rngs::StdRng;

fn random_points(rng: &mut StdRng, count: usize, extent: [f64; 3]) -> Vec<[f64; 3]> {
    (0..count)
        .map(|_| {
            [
                rng.gen_range(0.0..=extent[0]),
                rng.gen_range(0.0..=extent[1]),
                rng.gen_range(0.0..=extent[2]),
            ]
        })
        .collect()
}

/// Compares distances rather than handles, since equidistant points may resolve differently.
fn assert_matches_oracle(grid: &PointGrid<&Vec<[f64; 3]>>, oracle: &BruteForce<&Vec<[f64; 3]>>, queries: &[[f64; 3]]) {
    for q in queries {
        let expected = oracle.nearest_neighbor(*q).expect("oracle has points");
        let found = grid.nearest_neighbor(*q).expect("grid has points");
        let actual_d2 = distance_sq(&grid.points()[found.handle], q);
        assert_eq!(actual_d2, found.distance_sq);
        assert!(
            found.distance_sq <= expected.distance_sq,
            "query {:?}: grid found {} at {}, brute force found {} at {}",
            q,
            found.handle,
            found.distance_sq,
            expected.handle,
            expected.distance_sq
        );
    }
}

#[test]
fn test_uniform_cloud_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(1);
    let points = random_points(&mut rng, 5000, [100.0, 100.0, 100.0]);
    let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(8)).unwrap();
    let oracle = BruteForce::new(&points);

    let queries = random_points(&mut rng, 500, [100.0, 100.0, 100.0]);
    assert_matches_oracle(&grid, &oracle, &queries);
}

#[test]
fn test_queries_outside_bounds_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(2);
    let points = random_points(&mut rng, 2000, [10.0, 20.0, 5.0]);
    let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(4)).unwrap();
    let oracle = BruteForce::new(&points);

    let queries: Vec<[f64; 3]> = (0..300)
        .map(|_| {
            [
                rng.gen_range(-50.0..60.0),
                rng.gen_range(-50.0..70.0),
                rng.gen_range(-50.0..55.0),
            ]
        })
        .collect();
    assert_matches_oracle(&grid, &oracle, &queries);
}

#[test]
fn test_clustered_points_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(3);
    let centers = [[5.0, 5.0, 5.0], [95.0, 10.0, 50.0], [50.0, 90.0, 90.0]];
    let mut points = Vec::new();
    for c in centers {
        for _ in 0..1000 {
            points.push([
                c[0] + rng.gen_range(-1.0..1.0),
                c[1] + rng.gen_range(-1.0..1.0),
                c[2] + rng.gen_range(-1.0..1.0),
            ]);
        }
    }
    let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(16)).unwrap();
    let oracle = BruteForce::new(&points);

    // Most queries land in empty cells between the clusters.
    let queries = random_points(&mut rng, 300, [100.0, 100.0, 100.0]);
    assert_matches_oracle(&grid, &oracle, &queries);
}

#[test]
fn test_flat_and_linear_sets_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(4);

    let plane: Vec<[f64; 3]> = random_points(&mut rng, 3000, [50.0, 20.0, 0.0]);
    let line: Vec<[f64; 3]> = random_points(&mut rng, 3000, [0.0, 0.0, 80.0]);

    for points in [plane, line] {
        let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(10)).unwrap();
        let oracle = BruteForce::new(&points);
        let queries: Vec<[f64; 3]> = (0..200)
            .map(|_| {
                [
                    rng.gen_range(-5.0..55.0),
                    rng.gen_range(-5.0..25.0),
                    rng.gen_range(-5.0..85.0),
                ]
            })
            .collect();
        assert_matches_oracle(&grid, &oracle, &queries);
    }
}

#[test]
fn test_single_cell_grid_equals_brute_force() {
    let mut rng = StdRng::seed_from_u64(5);
    let points = random_points(&mut rng, 400, [30.0, 30.0, 30.0]);
    let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(400)).unwrap();
    assert_eq!(grid.shape(), [1, 1, 1]);
    let oracle = BruteForce::new(&points);

    for _ in 0..200 {
        let q = [
            rng.gen_range(-10.0..40.0),
            rng.gen_range(-10.0..40.0),
            rng.gen_range(-10.0..40.0),
        ];
        let expected = oracle.nearest_neighbor(q).unwrap();
        let found = grid.nearest_neighbor(q).unwrap();
        assert_eq!(found.distance_sq, expected.distance_sq);
    }
}

#[test]
fn test_every_point_finds_itself() {
    let mut rng = StdRng::seed_from_u64(6);
    let points = random_points(&mut rng, 2000, [1.0, 1.0, 1.0]);
    let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(2)).unwrap();
    for p in &points {
        let n = grid.nearest_neighbor(*p).unwrap();
        assert_eq!(n.distance_sq, 0.0);
    }
}

#[test]
fn test_batch_matches_oracle() {
    let mut rng = StdRng::seed_from_u64(7);
    let points = random_points(&mut rng, 3000, [10.0, 10.0, 10.0]);
    let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(8)).unwrap();
    let oracle = BruteForce::new(&points);

    let queries = random_points(&mut rng, 1000, [10.0, 10.0, 10.0]);
    let handles = grid.nearest_batch(&queries).unwrap();
    for (q, h) in queries.iter().zip(handles) {
        let expected = oracle.nearest_neighbor(*q).unwrap();
        assert_eq!(distance_sq(&points[h], q), expected.distance_sq);
    }
}

#[test]
fn test_through_trait_object() {
    let points = vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let grid = PointGrid::build(&points).unwrap();
    let oracle = BruteForce::new(&points);
    let indexes: Vec<&dyn SpatialIndex> = vec![&grid, &oracle];
    for index in indexes {
        assert_eq!(index.len(), 2);
        assert_eq!(index.nearest([4.0, 4.0, 4.0]), Ok(1));
    }
}
