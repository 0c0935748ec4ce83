/// Point handles grouped per cell in a compressed (CSR) layout.
///
/// `handles[offsets[c]..offsets[c + 1]]` are the points of cell `c`. Only handles are
/// stored, never coordinates.
#[derive(Clone, Debug, Default)]
pub struct CellStore {
    offsets: Vec<usize>,
    handles: Vec<usize>,
}

impl CellStore {
    /// Groups handles by cell with a counting pass followed by a fill pass.
    ///
    /// `cell_of[h]` is the linear cell index of handle `h` and must be below `cell_count`.
    pub fn from_cell_indices(cell_of: &[usize], cell_count: usize) -> Self {
        let mut offsets = vec![0usize; cell_count + 1];
        for &c in cell_of {
            offsets[c + 1] += 1;
        }
        for c in 0..cell_count {
            offsets[c + 1] += offsets[c];
        }

        let mut cursor = offsets[..cell_count].to_vec();
        let mut handles = vec![0usize; cell_of.len()];
        for (h, &c) in cell_of.iter().enumerate() {
            handles[cursor[c]] = h;
            cursor[c] += 1;
        }

        Self { offsets, handles }
    }

    /// Handles stored in the cell with linear index `cell`.
    #[inline]
    pub fn bucket(&self, cell: usize) -> &[usize] {
        &self.handles[self.offsets[cell]..self.offsets[cell + 1]]
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Total number of stored handles.
    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of cells holding at least one handle.
    pub fn occupied_cells(&self) -> usize {
        self.offsets.windows(2).filter(|w| w[1] > w[0]).count()
    }

    /// Largest number of handles in a single cell.
    pub fn max_occupancy(&self) -> usize {
        self.offsets.windows(2).map(|w| w[1] - w[0]).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_handles_by_cell() {
        let store = CellStore::from_cell_indices(&[2, 0, 2, 3, 0], 4);
        assert_eq!(store.cell_count(), 4);
        assert_eq!(store.len(), 5);
        assert_eq!(store.bucket(0), &[1, 4]);
        assert!(store.bucket(1).is_empty());
        assert_eq!(store.bucket(2), &[0, 2]);
        assert_eq!(store.bucket(3), &[3]);
        assert_eq!(store.occupied_cells(), 3);
        assert_eq!(store.max_occupancy(), 2);
    }

    #[test]
    fn test_bucket_sizes_sum_to_point_count() {
        let cell_of: Vec<usize> = (0..1000).map(|h| (h * 7919) % 37).collect();
        let store = CellStore::from_cell_indices(&cell_of, 37);
        let total: usize = (0..store.cell_count()).map(|c| store.bucket(c).len()).sum();
        assert_eq!(total, 1000);
        for c in 0..37 {
            for &h in store.bucket(c) {
                assert_eq!(cell_of[h], c);
            }
        }
    }

    #[test]
    fn test_empty_store() {
        let store = CellStore::from_cell_indices(&[], 1);
        assert!(store.is_empty());
        assert!(store.bucket(0).is_empty());
        assert_eq!(store.max_occupancy(), 0);
    }
}
