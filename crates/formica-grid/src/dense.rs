//! Dense row-major cell storage.

use crate::error::GridError;
use formica_core::ColorId;

/// Flat `size × size` matrix of color ids, row-major.
///
/// Every in-range cell has a defined color; fresh cells are filled with
/// the background color by the allocating caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseStore {
    size: u32,
    cells: Vec<u8>,
}

impl DenseStore {
    /// Allocate a `size × size` matrix filled with `fill`.
    pub fn new(size: u32, fill: ColorId) -> Result<Self, GridError> {
        let len = cell_count(size)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GridError::AllocationFailed { bytes: len })?;
        cells.resize(len, fill.get());
        Ok(Self { size, cells })
    }

    /// Wrap an already-filled row-major buffer (expansion fast path).
    pub(crate) fn from_buffer(size: u32, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), size as usize * size as usize);
        Self { size, cells }
    }

    /// Validate and wrap a persisted row-major buffer.
    pub fn from_cells(size: u32, cells: Vec<u8>) -> Result<Self, GridError> {
        let len = cell_count(size)?;
        if cells.len() != len {
            return Err(GridError::InvalidState {
                reason: format!(
                    "dense buffer holds {} cells, expected {len} for size {size}",
                    cells.len()
                ),
            });
        }
        if let Some(&bad) = cells.iter().find(|&&b| ColorId::new(b).is_none()) {
            return Err(GridError::InvalidState {
                reason: format!("dense buffer contains invalid color id {bad}"),
            });
        }
        Ok(Self { size, cells })
    }

    /// Side length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Color at `(row, col)`. Callers guarantee both are `< size`.
    pub fn get(&self, row: u32, col: u32) -> ColorId {
        ColorId::new(self.cells[self.index(row, col)]).expect("store holds only valid color ids")
    }

    /// Write `(row, col)` and return the previous color.
    pub fn set(&mut self, row: u32, col: u32, color: ColorId) -> ColorId {
        let i = self.index(row, col);
        let old = std::mem::replace(&mut self.cells[i], color.get());
        ColorId::new(old).expect("store holds only valid color ids")
    }

    /// Raw bytes of one row (conversion and expansion scans).
    pub fn row(&self, row: u32) -> &[u8] {
        let start = row as usize * self.size as usize;
        &self.cells[start..start + self.size as usize]
    }

    /// The full row-major buffer.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.size as usize + col as usize
    }
}

/// Total cell count for a side length, with overflow checked.
fn cell_count(size: u32) -> Result<usize, GridError> {
    (size as usize)
        .checked_mul(size as usize)
        .ok_or(GridError::SizeOverflow { size })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(raw: u8) -> ColorId {
        ColorId::new(raw).expect("test color in range")
    }

    #[test]
    fn new_fills_with_background() {
        let store = DenseStore::new(4, color(3)).unwrap();
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(store.get(r, c), color(3));
            }
        }
    }

    #[test]
    fn set_returns_previous_color() {
        let mut store = DenseStore::new(3, color(0)).unwrap();
        assert_eq!(store.set(1, 2, color(5)), color(0));
        assert_eq!(store.set(1, 2, color(6)), color(5));
        assert_eq!(store.get(1, 2), color(6));
        assert_eq!(store.get(2, 1), color(0));
    }

    #[test]
    fn rows_are_contiguous_slices() {
        let mut store = DenseStore::new(3, color(0)).unwrap();
        store.set(1, 0, color(7));
        store.set(1, 2, color(9));
        assert_eq!(store.row(1), &[7, 0, 9]);
        assert_eq!(store.row(0), &[0, 0, 0]);
    }

    #[test]
    fn from_cells_rejects_bad_input() {
        assert!(matches!(
            DenseStore::from_cells(3, vec![0; 8]),
            Err(GridError::InvalidState { .. })
        ));
        let mut cells = vec![0u8; 9];
        cells[4] = 16;
        assert!(matches!(
            DenseStore::from_cells(3, cells),
            Err(GridError::InvalidState { .. })
        ));
        assert!(DenseStore::from_cells(3, vec![0; 9]).is_ok());
    }
}
