/// A caller-owned point with a 3-component coordinate accessor.
pub trait Point3 {
    fn position(&self) -> [f64; 3];
}

impl Point3 for [f64; 3] {
    #[inline]
    fn position(&self) -> [f64; 3] {
        *self
    }
}

impl Point3 for (f64, f64, f64) {
    #[inline]
    fn position(&self) -> [f64; 3] {
        [self.0, self.1, self.2]
    }
}

impl<P: Point3 + ?Sized> Point3 for &P {
    #[inline]
    fn position(&self) -> [f64; 3] {
        (**self).position()
    }
}

/// Storage the index reads points from.
///
/// Points are addressed by a stable handle in `0..len()`. The index keeps only handles,
/// so the positions must not change while an index built over the set is alive. Borrowing
/// the set (`&[P]`, `&Vec<P>`) lets the compiler enforce that.
pub trait PointSet {
    fn len(&self) -> usize;

    fn position(&self, handle: usize) -> [f64; 3];

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P: Point3> PointSet for [P] {
    #[inline]
    fn len(&self) -> usize {
        <[P]>::len(self)
    }

    #[inline]
    fn position(&self, handle: usize) -> [f64; 3] {
        self[handle].position()
    }
}

impl<P: Point3> PointSet for Vec<P> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn position(&self, handle: usize) -> [f64; 3] {
        self[handle].position()
    }
}

impl<T: PointSet + ?Sized> PointSet for &T {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn position(&self, handle: usize) -> [f64; 3] {
        (**self).position(handle)
    }
}

/// Points stored as a flat `[x, y, z, x, y, z, ...]` buffer.
///
/// Trailing coordinates that do not complete a triple are ignored.
#[derive(Clone, Debug)]
pub struct FlatPoints<B> {
    coords: B,
}

impl<B: AsRef<[f64]>> FlatPoints<B> {
    pub fn new(coords: B) -> Self {
        Self { coords }
    }

    pub fn as_slice(&self) -> &[f64] {
        self.coords.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.coords
    }
}

impl<B: AsRef<[f64]>> PointSet for FlatPoints<B> {
    #[inline]
    fn len(&self) -> usize {
        self.coords.as_ref().len() / 3
    }

    #[inline]
    fn position(&self, handle: usize) -> [f64; 3] {
        let c = self.coords.as_ref();
        [c[handle * 3], c[handle * 3 + 1], c[handle * 3 + 2]]
    }
}

/// Squared Euclidean distance.
#[inline]
pub fn distance_sq(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}
