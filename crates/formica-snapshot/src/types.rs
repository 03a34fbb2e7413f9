//! Data types for captured simulation state.

use formica_core::{ColorId, Direction, Position, Turn};
use formica_grid::SparseCell;

/// Persisted form of the rule table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTableState {
    /// Background color id.
    pub default_color: ColorId,
    /// Active rules in chain order.
    pub rules: Vec<(ColorId, Turn)>,
    /// Remnant aliases as `(stale, live)` pairs.
    pub remnants: Vec<(ColorId, ColorId)>,
}

/// Persisted cell payload: exactly one representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellState {
    /// Row-major `size × size` color bytes.
    Dense {
        /// The full matrix buffer.
        cells: Vec<u8>,
    },
    /// Per-row `(column, color)` entries, column-ascending.
    Sparse {
        /// One entry list per row.
        rows: Vec<Vec<SparseCell>>,
    },
}

/// Persisted form of the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridState {
    /// Side length the grid was created with.
    pub init_size: u32,
    /// Current side length.
    pub size: u32,
    /// Background color id.
    pub def_color: ColorId,
    /// Count of non-background cells.
    pub colored: u64,
    /// Bounding-box top-left corner.
    pub bounds_min: Position,
    /// Bounding-box bottom-right corner.
    pub bounds_max: Position,
    /// The cell payload.
    pub cells: CellState,
}

/// Persisted form of the ant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AntState {
    /// Grid-local position.
    pub position: Position,
    /// Current heading.
    pub heading: Direction,
}

/// Persisted form of a whole simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationState {
    /// The rule table.
    pub rules: RuleTableState,
    /// The grid.
    pub grid: GridState,
    /// The ant.
    pub ant: AntState,
    /// Steps executed so far.
    pub steps: u64,
    /// Whether the simulation was running.
    pub running: bool,
}
