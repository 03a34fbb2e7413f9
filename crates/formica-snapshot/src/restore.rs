//! Validated reconstruction of a simulation from raw fields.

use crate::error::SnapshotError;
use crate::types::{CellState, SimulationState};
use formica_core::RuleTable;
use formica_engine::{Ant, Simulation};
use formica_grid::{BoundingBox, DenseStore, Grid, SparseStore, Store};

/// Rebuild a [`Simulation`] from captured state, revalidating everything.
///
/// Each component's raw-field constructor rejects its own structural
/// damage (chain duplicates, unsorted sparse rows, sizes off the tripling
/// lineage, occupancy mismatches); this function adds the cross-component
/// checks — the grid and rule table must agree on the background color,
/// and the ant must stand inside the grid.
pub fn restore(state: SimulationState) -> Result<Simulation, SnapshotError> {
    let rules = RuleTable::from_parts(
        state.rules.default_color,
        state.rules.rules,
        state.rules.remnants,
    )?;

    if state.grid.def_color != rules.default_color() {
        return Err(SnapshotError::InvalidState {
            reason: format!(
                "grid background {} disagrees with rule table background {}",
                state.grid.def_color,
                rules.default_color()
            ),
        });
    }

    let store = match state.grid.cells {
        CellState::Dense { cells } => {
            Store::Dense(DenseStore::from_cells(state.grid.size, cells)?)
        }
        CellState::Sparse { rows } => Store::Sparse(SparseStore::from_rows(
            state.grid.size,
            rows,
            state.grid.def_color,
        )?),
    };

    let bounds = BoundingBox::from_corners(state.grid.bounds_min, state.grid.bounds_max)
        .ok_or_else(|| SnapshotError::InvalidState {
            reason: format!(
                "bounding box corners {} and {} are inverted",
                state.grid.bounds_min, state.grid.bounds_max
            ),
        })?;

    let grid = Grid::from_parts(
        state.grid.init_size,
        state.grid.size,
        state.grid.def_color,
        state.grid.colored,
        bounds,
        store,
    )?;

    let ant = Ant::from_parts(state.ant.position, state.ant.heading);
    Ok(Simulation::from_parts(
        rules,
        grid,
        ant,
        state.steps,
        state.running,
    )?)
}
