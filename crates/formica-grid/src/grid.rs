//! The hybrid grid: storage selection, growth, and conversion policy.

use crate::bounds::BoundingBox;
use crate::dense::DenseStore;
use crate::error::GridError;
use crate::expand::ExpansionJob;
use crate::sparse::{SparseCell, SparseStore};
use formica_core::{ColorId, Position, RuleTable};

/// Growth factor applied to the side length on every expansion.
pub const GRID_MULT: u32 = 3;

/// Smallest supported initial side length.
pub const MIN_INIT_SIZE: u32 = 2;

/// Default initial side length.
pub const DEF_INIT_SIZE: u32 = 4;

/// Largest supported initial side length.
pub const MAX_INIT_SIZE: u32 = 7;

/// Side-length ceiling for dense growth: once the tripled size would pass
/// this (3⁹ − 1), expansion prefers the sparse representation when the
/// memory heuristic agrees.
pub const SIZE_THRESHOLD: u32 = 19_682;

/// Occupancy ratio below which a large dense grid converts to sparse.
pub const USAGE_THRESHOLD: f64 = 0.5;

/// Byte budget for one silent-expansion call, converted to whole rows of
/// the target buffer.
const SILENT_EXPAND_BYTES: usize = 64 * 1024;

/// Cell storage backing a [`Grid`]: exactly one representation is live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Store {
    /// Full matrix, one entry per cell.
    Dense(DenseStore),
    /// Per-row sorted lists of non-background cells.
    Sparse(SparseStore),
}

/// Result of writing one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellWrite {
    /// The color the cell held before the write.
    pub previous: ColorId,
    /// Whether the write painted a background cell for the first time.
    pub first_visit: bool,
}

/// Hybrid dense/sparse square lattice with tripling growth.
///
/// A grid starts dense at a small initial size and triples whenever the
/// ant walks off an edge, re-centring the old content in the middle third
/// of the new plane. Conversion to the sparse representation is one-way
/// and happens either at growth time (when the dense footprint would
/// exceed the sparse one past [`SIZE_THRESHOLD`]) or immediately on large
/// grids whose occupancy falls below [`USAGE_THRESHOLD`].
///
/// Occupancy (`colored`) and the bounding box of all non-background cells
/// are maintained incrementally on every write.
#[derive(Clone, Debug)]
pub struct Grid {
    init_size: u32,
    size: u32,
    def_color: ColorId,
    colored: u64,
    bounds: BoundingBox,
    store: Store,
    pending: Option<ExpansionJob>,
}

impl Grid {
    /// Allocate a dense `init_size × init_size` grid filled with the rule
    /// table's background color, bounding box collapsed on the centre.
    ///
    /// Rejects `init_size` outside [`MIN_INIT_SIZE`]`..=`[`MAX_INIT_SIZE`].
    pub fn new(rules: &RuleTable, init_size: u32) -> Result<Self, GridError> {
        if !(MIN_INIT_SIZE..=MAX_INIT_SIZE).contains(&init_size) {
            return Err(GridError::InvalidInitSize { got: init_size });
        }
        let def_color = rules.default_color();
        let store = Store::Dense(DenseStore::new(init_size, def_color)?);
        let centre = Position::new(i64::from(init_size / 2), i64::from(init_size / 2));
        Ok(Self {
            init_size,
            size: init_size,
            def_color,
            colored: 0,
            bounds: BoundingBox::at(centre),
            store,
            pending: None,
        })
    }

    /// Current side length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Side length the grid was created with.
    pub fn init_size(&self) -> u32 {
        self.init_size
    }

    /// The background color.
    pub fn def_color(&self) -> ColorId {
        self.def_color
    }

    /// Number of cells whose color differs from the background.
    pub fn colored(&self) -> u64 {
        self.colored
    }

    /// Bounding box of every non-background cell written so far.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    /// The live cell storage.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The centre cell.
    pub fn center(&self) -> Position {
        let mid = i64::from(self.size / 2);
        Position::new(mid, mid)
    }

    /// Whether `pos` lies inside `[0, size)` on both axes.
    pub fn in_bounds(&self, pos: Position) -> bool {
        let size = i64::from(self.size);
        pos.row >= 0 && pos.row < size && pos.col >= 0 && pos.col < size
    }

    /// Whether the sparse representation is live.
    pub fn is_sparse(&self) -> bool {
        matches!(self.store, Store::Sparse(_))
    }

    /// Color at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside `[0, size)²` — a caller bug.
    pub fn color_at(&self, pos: Position) -> ColorId {
        assert!(
            self.in_bounds(pos),
            "position {pos} outside the {0}x{0} grid",
            self.size
        );
        let (row, col) = (pos.row as u32, pos.col as u32);
        match &self.store {
            Store::Dense(dense) => dense.get(row, col),
            Store::Sparse(sparse) => sparse.get(row, col, self.def_color),
        }
    }

    /// Write `color` at `pos`, maintaining occupancy and the bounding box.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside `[0, size)²` — a caller bug.
    pub fn set_color(&mut self, pos: Position, color: ColorId) -> CellWrite {
        assert!(
            self.in_bounds(pos),
            "position {pos} outside the {0}x{0} grid",
            self.size
        );
        let (row, col) = (pos.row as u32, pos.col as u32);
        let previous = match &mut self.store {
            Store::Dense(dense) => dense.set(row, col, color),
            Store::Sparse(sparse) => sparse.set(row, col, color, self.def_color),
        };
        let first_visit = previous == self.def_color && color != self.def_color;
        if first_visit {
            self.colored += 1;
            self.bounds.extend(pos);
        } else if previous != self.def_color && color == self.def_color {
            self.colored -= 1;
        }
        CellWrite {
            previous,
            first_visit,
        }
    }

    /// Whether the grid has grown at least two tripling generations past
    /// its initial size.
    pub fn is_large(&self) -> bool {
        self.size >= self.init_size * GRID_MULT * GRID_MULT
    }

    /// Whether occupancy has dropped below [`USAGE_THRESHOLD`] relative
    /// to the explored bounding box.
    pub fn is_usage_low(&self) -> bool {
        (self.colored as f64) / (self.bounds.area() as f64) < USAGE_THRESHOLD
    }

    /// Whether growing to `next_size` should switch to the sparse
    /// representation: the ceiling is passed and a dense buffer would out-
    /// weigh the estimated sparse footprint of the current occupancy.
    fn should_go_sparse(&self, next_size: u32) -> bool {
        if next_size <= SIZE_THRESHOLD || self.colored == 0 {
            return false;
        }
        let dense_bytes = self.size as f64 * self.size as f64;
        let sparse_bytes = self.colored as f64 * std::mem::size_of::<SparseCell>() as f64;
        dense_bytes / sparse_bytes < 1.0
    }

    /// Advance the silent pre-allocation of the next dense buffer by a
    /// bounded number of rows. No-op once sparse, when the next expansion
    /// would convert anyway, when the job is already complete, or when
    /// tripling would overflow.
    ///
    /// Returns the number of rows allocated this call. Reservation
    /// failures are absorbed: the job simply retries on a later call.
    pub fn silent_expand(&mut self) -> u32 {
        if self.is_sparse() {
            return 0;
        }
        let Some(next) = self.size.checked_mul(GRID_MULT) else {
            return 0;
        };
        if self.should_go_sparse(next) {
            // A dense buffer for a grid about to go sparse is wasted work.
            self.pending = None;
            return 0;
        }
        let job = self
            .pending
            .get_or_insert_with(|| ExpansionJob::new(next));
        debug_assert_eq!(job.target_size(), next);
        let max_rows = (SILENT_EXPAND_BYTES / next as usize).max(1) as u32;
        job.advance(self.def_color, max_rows)
    }

    /// Triple the side length, re-centring the old content in the middle
    /// third of the new plane.
    ///
    /// The bounding box is translated by the old size; the same offset is
    /// returned so the caller can translate anything positioned on the
    /// grid. A dense grid converts to sparse first when the memory
    /// heuristic says the tripled buffer is no longer worth its size;
    /// otherwise the dense path consumes whatever the pending job has
    /// pre-built. On error the grid is unchanged apart from a possible
    /// (still consistent) conversion.
    pub fn expand(&mut self) -> Result<u32, GridError> {
        let old = self.size;
        let next = old
            .checked_mul(GRID_MULT)
            .ok_or(GridError::SizeOverflow { size: old })?;
        if !self.is_sparse() && self.should_go_sparse(next) {
            self.make_sparse()?;
        }
        let replacement = match &mut self.store {
            Store::Sparse(sparse) => {
                sparse.expand(next)?;
                None
            }
            Store::Dense(dense) => {
                let job = match self.pending.take() {
                    Some(job) if job.target_size() == next => job,
                    _ => ExpansionJob::new(next),
                };
                let mut buf = job.finish(self.def_color)?;
                let band = old as usize;
                let stride = next as usize;
                for r in 0..band {
                    let dst = (band + r) * stride + band;
                    buf[dst..dst + band].copy_from_slice(dense.row(r as u32));
                }
                Some(DenseStore::from_buffer(next, buf))
            }
        };
        if let Some(dense) = replacement {
            self.store = Store::Dense(dense);
        }
        self.size = next;
        self.bounds.translate(i64::from(old));
        Ok(old)
    }

    /// Convert the dense representation to sparse. One-way; a no-op on an
    /// already-sparse grid. Any pending pre-allocation is discarded.
    pub fn make_sparse(&mut self) -> Result<(), GridError> {
        let Store::Dense(dense) = &self.store else {
            return Ok(());
        };
        self.pending = None;
        let mut sparse = SparseStore::new(self.size)?;
        let def = self.def_color.get();
        for r in 0..self.size {
            let row = dense.row(r);
            let occupied = row.iter().filter(|&&b| b != def).count();
            if occupied == 0 {
                continue;
            }
            sparse.reserve_row(r, occupied)?;
            for (col, &b) in row.iter().enumerate() {
                if b != def {
                    sparse.append_sorted(
                        r,
                        SparseCell {
                            column: col as u32,
                            color: ColorId::new(b).expect("store holds only valid color ids"),
                        },
                    );
                }
            }
        }
        self.store = Store::Sparse(sparse);
        Ok(())
    }

    /// Brute-force recount of non-background cells in the live store.
    ///
    /// `colored()` is maintained incrementally; this exists for
    /// verification and for validating persisted state.
    pub fn recount(&self) -> u64 {
        match &self.store {
            Store::Dense(dense) => dense
                .cells()
                .iter()
                .filter(|&&b| b != self.def_color.get())
                .count() as u64,
            Store::Sparse(sparse) => sparse.entry_count(),
        }
    }

    /// Reassemble a grid from persisted raw fields, validating structure.
    ///
    /// Rejects an initial size outside `[2, 7]`, a size that is not the
    /// initial size times a power of three, a store whose dimensions
    /// disagree with `size`, a bounding box outside the grid, and a
    /// `colored` count that disagrees with a recount of the store.
    pub fn from_parts(
        init_size: u32,
        size: u32,
        def_color: ColorId,
        colored: u64,
        bounds: BoundingBox,
        store: Store,
    ) -> Result<Self, GridError> {
        if !(MIN_INIT_SIZE..=MAX_INIT_SIZE).contains(&init_size) {
            return Err(GridError::InvalidInitSize { got: init_size });
        }
        let mut lineage = init_size;
        while lineage < size {
            lineage = lineage
                .checked_mul(GRID_MULT)
                .ok_or(GridError::SizeOverflow { size: lineage })?;
        }
        if lineage != size {
            return Err(GridError::InvalidState {
                reason: format!("size {size} is not {init_size} times a power of {GRID_MULT}"),
            });
        }
        let store_size = match &store {
            Store::Dense(dense) => dense.size(),
            Store::Sparse(sparse) => sparse.size(),
        };
        if store_size != size {
            return Err(GridError::InvalidState {
                reason: format!("store side {store_size} disagrees with size {size}"),
            });
        }
        let inside = |p: Position| {
            p.row >= 0 && p.row < i64::from(size) && p.col >= 0 && p.col < i64::from(size)
        };
        if !inside(bounds.min()) || !inside(bounds.max()) {
            return Err(GridError::InvalidState {
                reason: format!(
                    "bounding box {}..{} extends outside the {size}x{size} grid",
                    bounds.min(),
                    bounds.max()
                ),
            });
        }
        let grid = Self {
            init_size,
            size,
            def_color,
            colored,
            bounds,
            store,
            pending: None,
        };
        let recounted = grid.recount();
        if recounted != colored {
            return Err(GridError::InvalidState {
                reason: format!("colored count {colored} disagrees with recount {recounted}"),
            });
        }
        Ok(grid)
    }
}
