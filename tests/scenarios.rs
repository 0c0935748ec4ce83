use pointgrid::{GridConfig, GridError, PointGrid};

#[test]
fn test_two_points_collapse_to_one_cell() {
    let points = vec![[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]];
    let grid = PointGrid::build(&points).expect("build should succeed");

    assert_eq!(grid.shape(), [1, 1, 1]);
    assert_eq!(grid.nearest([4.0, 0.0, 0.0]), Ok(0));
    assert_eq!(grid.nearest([6.0, 0.0, 0.0]), Ok(1));
}

fn line_points() -> Vec<[f64; 3]> {
    // 2000 points evenly spaced along x in [0, 1000].
    (0..2000).map(|i| [i as f64 * 1000.0 / 1999.0, 0.0, 0.0]).collect()
}

#[test]
fn test_line_uses_one_dimensional_sizing() {
    let points = line_points();
    let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(100))
        .expect("build should succeed");
    assert_eq!(grid.shape(), [20, 1, 1]);
}

#[test]
fn test_line_cube_query_is_superset() {
    let points = line_points();
    let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(100))
        .expect("build should succeed");

    let found = grid.within([500.0, 0.0, 0.0], 5.0);
    let expected: Vec<usize> = (0..points.len())
        .filter(|&h| (495.0..=505.0).contains(&points[h][0]))
        .collect();
    assert!(!expected.is_empty());
    for h in expected {
        assert!(found.contains(&h), "point {} at {:?} was omitted", h, points[h]);
    }
}

#[test]
fn test_empty_index_reports_condition() {
    let points: Vec<[f64; 3]> = Vec::new();
    let grid = PointGrid::build(&points).expect("empty build should succeed");

    assert!(grid.is_empty());
    assert_eq!(grid.nearest([0.0, 0.0, 0.0]), Err(GridError::EmptyIndex));
    assert!(grid.within([0.0, 0.0, 0.0], 1.0).is_empty());
}

#[test]
fn test_point_on_upper_bound_is_found() {
    // The point with maximal coordinates sits exactly on the unpadded bounding box corner.
    let mut points: Vec<[f64; 3]> = Vec::new();
    for i in 0..10 {
        for j in 0..10 {
            for k in 0..10 {
                points.push([i as f64, j as f64, k as f64]);
            }
        }
    }
    let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(4))
        .expect("build should succeed");

    let corner = [9.0, 9.0, 9.0];
    let h = grid.nearest(corner).expect("non-empty grid");
    assert_eq!(points[h], corner);

    for axis in 0..3 {
        let mut on_face = [4.0, 4.0, 4.0];
        on_face[axis] = 9.0;
        let h = grid.nearest(on_face).expect("non-empty grid");
        assert_eq!(points[h], on_face);
    }
}

#[test]
fn test_negative_and_zero_max_coordinates() {
    // All maxima at or below zero exercise both padding rules.
    let points = vec![[-10.0, -5.0, -3.0], [-1.0, 0.0, -2.0], [-4.0, -2.5, -2.5]];
    let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(1))
        .expect("build should succeed");
    for (h, p) in points.iter().enumerate() {
        assert_eq!(grid.nearest(*p), Ok(h));
    }
}

#[test]
fn test_coincident_points() {
    let points = vec![[3.0, 3.0, 3.0]; 100];
    let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(8))
        .expect("build should succeed");
    assert_eq!(grid.max_occupancy(), 100);
    let n = grid.nearest_neighbor([0.0, 0.0, 0.0]).expect("non-empty grid");
    assert!((n.distance_sq - 27.0).abs() < 1e-12);
}

#[test]
fn test_coincident_points_at_origin_use_single_cell() {
    let points = vec![[0.0, 0.0, 0.0]; 1000];
    let grid = PointGrid::build_with(&points, GridConfig::default().with_max_per_cell(1))
        .expect("build should succeed");
    assert_eq!(grid.shape(), [1, 1, 1]);
    assert!(grid.nearest([1.0, 1.0, 1.0]).is_ok());
}

fn plane_points(y: f64) -> Vec<[f64; 3]> {
    // 316 x 316 points over a 100 x 100 square in the plane at height y.
    let mut points = Vec::with_capacity(316 * 316);
    for i in 0..316 {
        for k in 0..316 {
            points.push([i as f64 * 100.0 / 315.0, y, k as f64 * 100.0 / 315.0]);
        }
    }
    points
}

#[test]
fn test_plane_at_zero_uses_two_dimensional_sizing() {
    let points = plane_points(0.0);
    let grid = PointGrid::build(&points).expect("build should succeed");
    assert_eq!(grid.shape(), [14, 1, 14]);
}

#[test]
fn test_plane_offset_from_zero_builds() {
    // Padding leaves a tiny extent on y, so the sizing sees three live axes.
    let points = plane_points(0.001);
    let grid = PointGrid::build(&points).expect("build should succeed");
    assert!(grid.cell_count() <= pointgrid::DEFAULT_MAX_CELLS);
    assert_eq!(grid.len(), points.len());

    for q in [[50.3, 0.001, 49.8], [-10.0, 5.0, 120.0], [99.9, -3.0, 0.2]] {
        let h = grid.nearest(q).expect("non-empty grid");
        let best = points
            .iter()
            .map(|p| pointgrid::distance_sq(p, &q))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(pointgrid::distance_sq(&points[h], &q), best);
    }
}
