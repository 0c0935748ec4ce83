use crate::bounds::BoundingBox;
use crate::error::GridError;
use crate::grid::PointGrid;
use crate::index::Neighbor;
use crate::point::PointSet;

/// Slack applied to the verification cube so corner rounding cannot drop an equidistant point.
const VERIFY_SLACK: f64 = 4.0 * f64::EPSILON;

/// Gap between query and bounds beyond which squared distances could overflow.
const SCALE_THRESHOLD: f64 = 1e150;

/// Squared distances measured in units of a power of two.
///
/// Queries far outside the bounds would square to infinity and tie. Scaling both
/// positions by `2^-e` is exact, so comparisons keep full precision.
#[derive(Clone, Copy, Debug)]
struct QueryMetric {
    inverse_unit: f64,
}

impl QueryMetric {
    fn new(bounds: &BoundingBox<3>, query: &[f64; 3]) -> Self {
        // Halved so the subtraction itself cannot overflow.
        let mut half_gap = 0.0f64;
        for k in 0..3 {
            half_gap = half_gap
                .max(bounds.min[k] * 0.5 - query[k] * 0.5)
                .max(query[k] * 0.5 - bounds.max[k] * 0.5);
        }
        if half_gap <= SCALE_THRESHOLD * 0.5 {
            return Self { inverse_unit: 1.0 };
        }
        let exponent = (half_gap.log2().ceil() as i32 + 1).min(1020);
        Self {
            inverse_unit: 2f64.powi(-exponent),
        }
    }

    #[inline]
    fn distance_sq(&self, a: &[f64; 3], b: &[f64; 3]) -> f64 {
        let s = self.inverse_unit;
        let dx = a[0] * s - b[0] * s;
        let dy = a[1] * s - b[1] * s;
        let dz = a[2] * s - b[2] * s;
        dx * dx + dy * dy + dz * dz
    }

    /// Whether `a` is strictly closer to `q` than `b`, for equal rounded distances.
    ///
    /// Uses `|a - q|^2 - |b - q|^2 = (a - b) . (a + b - 2q)`, which keeps the small
    /// offset between the candidates that the squared distances round away.
    fn closer(&self, a: &[f64; 3], b: &[f64; 3], q: &[f64; 3]) -> bool {
        let s = self.inverse_unit;
        let mut diff = 0.0;
        for k in 0..3 {
            diff += (a[k] * s - b[k] * s) * (a[k] * s + b[k] * s - 2.0 * (q[k] * s));
        }
        diff < 0.0
    }

    /// Euclidean length of a scaled squared distance.
    #[inline]
    fn length(&self, scaled_sq: f64) -> f64 {
        scaled_sq.sqrt() / self.inverse_unit
    }

    /// Squared distance in coordinate units; infinite when it does not fit in an `f64`.
    #[inline]
    fn unscale_sq(&self, scaled_sq: f64) -> f64 {
        scaled_sq / self.inverse_unit / self.inverse_unit
    }
}

impl<S: PointSet> PointGrid<S> {
    /// Handle of the point closest to `query`.
    ///
    /// Ties resolve to whichever equidistant point is found first. Distances that round to
    /// the same value are separated exactly before they count as a tie.
    pub fn nearest(&self, query: [f64; 3]) -> Result<usize, GridError> {
        self.nearest_neighbor(query).map(|n| n.handle)
    }

    /// The point closest to `query` together with its squared distance.
    ///
    /// The search first looks at the cell containing the query. If the best point there is
    /// closer than every face of that cell it is a sound bound; otherwise shells of cells
    /// around it are scanned until one holds a point. Either way the bound is then checked
    /// against every cell intersecting the cube of that radius around the query, which makes
    /// the result exact.
    ///
    /// Queries far enough away for the squared distance to overflow still find the right
    /// point; the reported `distance_sq` is then infinite.
    pub fn nearest_neighbor(&self, query: [f64; 3]) -> Result<Neighbor, GridError> {
        if self.is_empty() {
            return Err(GridError::EmptyIndex);
        }
        if !query.iter().all(|c| c.is_finite()) {
            return Err(GridError::NonFiniteQuery { position: query });
        }

        let metric = QueryMetric::new(&self.frame.bounds, &query);
        let cell = self.frame.clamped_cell(&query);
        let faces = self.frame.face_distances(&query, cell);
        let local = self.closest_in_cell(&metric, &query, cell, None);

        let provisional = match local {
            Some(candidate) if faces.iter().all(|&d| metric.length(candidate.distance_sq) <= d) => {
                log::trace!(
                    "nearest {query:?}: local candidate {} inside cell {cell:?}",
                    candidate.handle
                );
                candidate
            }
            _ => self
                .ring_search(&metric, &query, cell, local)
                .ok_or(GridError::EmptyIndex)?,
        };

        let best = self.verify(&metric, &query, provisional);
        Ok(Neighbor::new(best.handle, metric.unscale_sq(best.distance_sq)))
    }

    /// Scans one cell, keeping `best` unless something strictly closer turns up.
    fn closest_in_cell(
        &self,
        metric: &QueryMetric,
        query: &[f64; 3],
        cell: [usize; 3],
        best: Option<Neighbor>,
    ) -> Option<Neighbor> {
        let bucket = self.store.bucket(self.frame.linear_index(cell));
        self.closest_in(metric, query, bucket, best)
    }

    fn closest_in(
        &self,
        metric: &QueryMetric,
        query: &[f64; 3],
        handles: &[usize],
        mut best: Option<Neighbor>,
    ) -> Option<Neighbor> {
        for &h in handles {
            let d2 = metric.distance_sq(&self.points.position(h), query);
            match best {
                Some(b) if !self.improves(metric, query, h, d2, b) => {}
                _ => best = Some(Neighbor::new(h, d2)),
            }
        }
        best
    }

    /// Whether handle `h` at scaled squared distance `d2` should replace `best`.
    #[inline]
    fn improves(
        &self,
        metric: &QueryMetric,
        query: &[f64; 3],
        h: usize,
        d2: f64,
        best: Neighbor,
    ) -> bool {
        if d2 != best.distance_sq {
            return d2 < best.distance_sq;
        }
        let a = self.points.position(h);
        let b = self.points.position(best.handle);
        metric.closer(&a, &b, query)
    }

    /// Visits Chebyshev shells of radius 1, 2, ... around `center` until a shell holds a point.
    ///
    /// Coordinates are signed so shells reaching past the grid edge are clipped, not wrapped.
    fn ring_search(
        &self,
        metric: &QueryMetric,
        query: &[f64; 3],
        center: [usize; 3],
        mut best: Option<Neighbor>,
    ) -> Option<Neighbor> {
        let c = center.map(|v| v as isize);
        let n = self.frame.shape.map(|v| v as isize);
        let max_radius = (0..3).map(|k| c[k].max(n[k] - 1 - c[k])).max().unwrap_or(0);

        for r in 1..=max_radius {
            let lo = [(c[0] - r).max(0), (c[1] - r).max(0), (c[2] - r).max(0)];
            let hi = [
                (c[0] + r).min(n[0] - 1),
                (c[1] + r).min(n[1] - 1),
                (c[2] + r).min(n[2] - 1),
            ];
            let mut found = false;

            for k in lo[2]..=hi[2] {
                for j in lo[1]..=hi[1] {
                    let on_shell = (k - c[2]).abs() == r || (j - c[1]).abs() == r;
                    let mut visit = |i: isize| {
                        let cell = [i as usize, j as usize, k as usize];
                        let bucket = self.store.bucket(self.frame.linear_index(cell));
                        if !bucket.is_empty() {
                            found = true;
                            best = self.closest_in(metric, query, bucket, best);
                        }
                    };
                    if on_shell {
                        (lo[0]..=hi[0]).for_each(&mut visit);
                    } else {
                        // Only the two x-extremes of this row belong to the shell.
                        for i in [c[0] - r, c[0] + r] {
                            if i >= 0 && i < n[0] {
                                visit(i);
                            }
                        }
                    }
                }
            }

            if found {
                log::trace!("nearest {query:?}: ring search stopped at radius {r}");
                break;
            }
        }
        best
    }

    /// Rescans every cell intersecting the cube of half-length `|provisional|` around `query`.
    fn verify(&self, metric: &QueryMetric, query: &[f64; 3], provisional: Neighbor) -> Neighbor {
        let len = metric.length(provisional.distance_sq);
        let mut best = provisional;
        self.visit_cube(query, len + len * VERIFY_SLACK, |h| {
            let d2 = metric.distance_sq(&self.points.position(h), query);
            if self.improves(metric, query, h, d2, best) {
                best = Neighbor::new(h, d2);
            }
        });
        best
    }
}
