//! The ant: a lattice position, a heading, and the automaton move.

use formica_core::{Direction, Position, RuleTable};
use formica_grid::{Grid, GridError};

/// The simulated agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ant {
    pos: Position,
    heading: Direction,
}

impl Ant {
    /// Create an ant centred in `grid`, facing `heading`.
    pub fn new(grid: &Grid, heading: Direction) -> Self {
        Self {
            pos: grid.center(),
            heading,
        }
    }

    /// Rebuild an ant from persisted raw fields. Callers validate the
    /// position against the grid it will walk on.
    pub fn from_parts(pos: Position, heading: Direction) -> Self {
        Self { pos, heading }
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Current heading.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Whether the ant is inside `[0, size)` on both axes of `grid`.
    pub fn is_in_bounds(&self, grid: &Grid) -> bool {
        grid.in_bounds(self.pos)
    }

    /// Shift the ant by `offset` on both axes (post-expansion
    /// re-centring).
    pub fn translate(&mut self, offset: i64) {
        self.pos = self.pos.translated(offset);
    }

    /// Execute one automaton move.
    ///
    /// Reads the cell under the ant; a remnant color is relabeled in
    /// place first, so stale ids drain out of the lattice as they are
    /// revisited. The cell's rule then decides everything at once: the
    /// cell is repainted with the successor color, the heading turns, and
    /// the ant advances one cell in the *new* heading. A first visit that
    /// leaves a large dense grid under-occupied converts it to sparse
    /// before returning.
    ///
    /// Returns whether the new position is still inside the grid; `false`
    /// tells the caller an expansion must run before the next move.
    ///
    /// # Panics
    ///
    /// Panics if the ant is already out of bounds, or if the cell's color
    /// has no transition (neither background, rule, nor remnant) — both
    /// indicate a caller bug.
    pub fn step(&mut self, grid: &mut Grid, rules: &RuleTable) -> Result<bool, GridError> {
        let mut color = grid.color_at(self.pos);
        if let Some(live) = rules.remnant_target(color) {
            grid.set_color(self.pos, live);
            color = live;
        }
        let outcome = rules.visit(color).unwrap_or_else(|| {
            panic!("color {color} at {} has no transition", self.pos);
        });
        let write = grid.set_color(self.pos, outcome.write);
        if write.first_visit && !grid.is_sparse() && grid.is_large() && grid.is_usage_low() {
            grid.make_sparse()?;
        }
        self.heading = self.heading.turned(outcome.turn);
        self.pos = self.pos.stepped(self.heading);
        Ok(self.is_in_bounds(grid))
    }
}
