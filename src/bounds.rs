/// Relative padding applied to the upper corner after accumulation.
pub const BOUNDS_PADDING: f64 = 1e-6;

/// Generic axis-aligned bounding box for N-dimensional space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    pub min: [f64; D],
    pub max: [f64; D],
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// An inverted box that any call to [`BoundingBox::update`] will overwrite.
    pub fn empty() -> Self {
        Self {
            min: [f64::INFINITY; D],
            max: [f64::NEG_INFINITY; D],
        }
    }

    /// Accumulates the extent of `points` in a single scan.
    ///
    /// Returns `None` for an empty iterator, there is no meaningful box to report.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = [f64; D]>,
    {
        let mut bounds = Self::empty();
        let mut any = false;
        for p in points {
            bounds.update(&p);
            any = true;
        }
        any.then_some(bounds)
    }

    /// Grows the box so that it contains `p`.
    pub fn update(&mut self, p: &[f64; D]) {
        for k in 0..D {
            if p[k] < self.min[k] {
                self.min[k] = p[k];
            }
            if p[k] > self.max[k] {
                self.max[k] = p[k];
            }
        }
    }

    /// Expands the upper corner so that points lying exactly on it still map to a valid cell.
    ///
    /// Each max component grows by `|max| * 1e-6`. When the grown component is still within
    /// machine epsilon of zero it is replaced by `(max - min) * (1 + 1e-6)`.
    pub fn padded(mut self) -> Self {
        for k in 0..D {
            self.max[k] += self.max[k].abs() * BOUNDS_PADDING;
            if self.max[k].abs() < f64::EPSILON {
                self.max[k] = (self.max[k] - self.min[k]) * (1.0 + BOUNDS_PADDING);
            }
        }
        self
    }

    /// Per-axis extent `max - min`.
    pub fn deltas(&self) -> [f64; D] {
        let mut d = [0.0; D];
        for k in 0..D {
            d[k] = self.max[k] - self.min[k];
        }
        d
    }

    /// Closed containment test.
    pub fn contains(&self, p: &[f64; D]) -> bool {
        (0..D).all(|k| p[k] >= self.min[k] && p[k] <= self.max[k])
    }
}
