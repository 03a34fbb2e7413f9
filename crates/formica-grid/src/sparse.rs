//! Per-row sorted sparse cell storage.

use crate::error::GridError;
use formica_core::ColorId;
use smallvec::SmallVec;

/// Inline capacity per row before spilling to the heap. Rows freshly
/// created by an expansion stay inline; the well-trodden middle band
/// spills.
const ROW_INLINE: usize = 4;

/// One non-background entry in a sparse row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SparseCell {
    /// Column index within the row.
    pub column: u32,
    /// The cell's color; never the background color.
    pub color: ColorId,
}

type Row = SmallVec<[SparseCell; ROW_INLINE]>;

/// One column-sorted entry list per row; absent columns are implicitly
/// the background color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseStore {
    size: u32,
    rows: Vec<Row>,
}

impl SparseStore {
    /// Allocate `size` empty rows.
    pub fn new(size: u32) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        rows.try_reserve_exact(size as usize)
            .map_err(|_| GridError::AllocationFailed {
                bytes: size as usize * std::mem::size_of::<Row>(),
            })?;
        rows.resize_with(size as usize, SmallVec::new);
        Ok(Self { size, rows })
    }

    /// Side length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Color at `(row, col)`; columns without an entry read as `def`.
    pub fn get(&self, row: u32, col: u32, def: ColorId) -> ColorId {
        let list = &self.rows[row as usize];
        match list.binary_search_by_key(&col, |cell| cell.column) {
            Ok(i) => list[i].color,
            Err(_) => def,
        }
    }

    /// Write `(row, col)` and return the previous color, keeping the row
    /// column-sorted.
    ///
    /// Writing `def` removes any entry, preserving the invariant that a
    /// present entry is never background colored.
    pub fn set(&mut self, row: u32, col: u32, color: ColorId, def: ColorId) -> ColorId {
        let list = &mut self.rows[row as usize];
        match list.binary_search_by_key(&col, |cell| cell.column) {
            Ok(i) => {
                let old = list[i].color;
                if color == def {
                    list.remove(i);
                } else {
                    list[i].color = color;
                }
                old
            }
            Err(i) => {
                if color != def {
                    list.insert(i, SparseCell { column: col, color });
                }
                def
            }
        }
    }

    /// Reserve room for `extra` more entries in `row`, then append cells
    /// via [`append_sorted`](Self::append_sorted). Conversion fast path.
    pub(crate) fn reserve_row(&mut self, row: u32, extra: usize) -> Result<(), GridError> {
        self.rows[row as usize]
            .try_reserve(extra)
            .map_err(|_| GridError::AllocationFailed {
                bytes: extra * std::mem::size_of::<SparseCell>(),
            })
    }

    /// Append an entry to `row`; callers scan columns in ascending order.
    pub(crate) fn append_sorted(&mut self, row: u32, cell: SparseCell) {
        let list = &mut self.rows[row as usize];
        debug_assert!(list.last().is_none_or(|prev| prev.column < cell.column));
        list.push(cell);
    }

    /// Rebuild for a tripled grid: old row `r` becomes row `r + old_size`
    /// and every column shifts by `old_size`; the new outer bands are
    /// empty.
    pub fn expand(&mut self, new_size: u32) -> Result<(), GridError> {
        let old_size = self.size;
        let mut rows = Vec::new();
        rows.try_reserve_exact(new_size as usize)
            .map_err(|_| GridError::AllocationFailed {
                bytes: new_size as usize * std::mem::size_of::<Row>(),
            })?;
        rows.resize_with(old_size as usize, SmallVec::new);
        for mut row in self.rows.drain(..) {
            for cell in row.iter_mut() {
                cell.column += old_size;
            }
            rows.push(row);
        }
        rows.resize_with(new_size as usize, SmallVec::new);
        self.rows = rows;
        self.size = new_size;
        Ok(())
    }

    /// Entries in one row, column-ascending.
    pub fn row_entries(&self, row: u32) -> &[SparseCell] {
        &self.rows[row as usize]
    }

    /// Total entries across all rows — an exact occupancy recount.
    pub fn entry_count(&self) -> u64 {
        self.rows.iter().map(|row| row.len() as u64).sum()
    }

    /// Validate and wrap persisted rows.
    ///
    /// Rejects a row count that disagrees with `size`, columns at or past
    /// `size`, out-of-order or duplicate columns, and background-colored
    /// entries.
    pub fn from_rows(size: u32, rows: Vec<Vec<SparseCell>>, def: ColorId) -> Result<Self, GridError> {
        if rows.len() != size as usize {
            return Err(GridError::InvalidState {
                reason: format!("{} sparse rows, expected {size}", rows.len()),
            });
        }
        for (r, row) in rows.iter().enumerate() {
            let mut prev: Option<u32> = None;
            for cell in row {
                if cell.column >= size {
                    return Err(GridError::InvalidState {
                        reason: format!("row {r} entry at column {} past size {size}", cell.column),
                    });
                }
                if prev.is_some_and(|p| p >= cell.column) {
                    return Err(GridError::InvalidState {
                        reason: format!("row {r} columns not strictly ascending at {}", cell.column),
                    });
                }
                if cell.color == def {
                    return Err(GridError::InvalidState {
                        reason: format!(
                            "row {r} column {} stores the background color",
                            cell.column
                        ),
                    });
                }
                prev = Some(cell.column);
            }
        }
        Ok(Self {
            size,
            rows: rows.into_iter().map(SmallVec::from_vec).collect(),
        })
    }
}
