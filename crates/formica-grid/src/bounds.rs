//! Axis-aligned occupancy bounding box.

use formica_core::Position;

/// Smallest axis-aligned rectangle containing every cell ever painted a
/// non-background color.
///
/// The box only grows. It is a containment bound, not a tight one: a
/// fresh grid seeds it with the centre cell, and expansions translate it
/// wholesale along with the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    min: Position,
    max: Position,
}

impl BoundingBox {
    /// A box collapsed onto a single cell.
    pub fn at(pos: Position) -> Self {
        Self { min: pos, max: pos }
    }

    /// A box from explicit corners; `None` unless `min <= max` on both
    /// axes.
    pub fn from_corners(min: Position, max: Position) -> Option<Self> {
        (min.row <= max.row && min.col <= max.col).then_some(Self { min, max })
    }

    /// Top-left corner.
    pub fn min(&self) -> Position {
        self.min
    }

    /// Bottom-right corner.
    pub fn max(&self) -> Position {
        self.max
    }

    /// Grow the box to contain `pos`.
    pub fn extend(&mut self, pos: Position) {
        self.min.row = self.min.row.min(pos.row);
        self.min.col = self.min.col.min(pos.col);
        self.max.row = self.max.row.max(pos.row);
        self.max.col = self.max.col.max(pos.col);
    }

    /// Shift both corners by `offset` on both axes.
    pub fn translate(&mut self, offset: i64) {
        self.min = self.min.translated(offset);
        self.max = self.max.translated(offset);
    }

    /// Number of cells covered.
    pub fn area(&self) -> u64 {
        let rows = (self.max.row - self.min.row + 1) as u64;
        let cols = (self.max.col - self.min.col + 1) as u64;
        rows * cols
    }

    /// Whether `pos` lies inside the box.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= self.min.row
            && pos.row <= self.max.row
            && pos.col >= self.min.col
            && pos.col <= self.max.col
    }
}
