//! Read-only extraction of a simulation's raw fields.

use crate::types::{AntState, CellState, GridState, RuleTableState, SimulationState};
use formica_engine::Simulation;
use formica_grid::Store;

/// Capture every persisted attribute of `sim` into a [`SimulationState`].
///
/// Purely read-only; the simulation is untouched and can keep stepping
/// afterwards.
pub fn capture(sim: &Simulation) -> SimulationState {
    let rules = sim.rules();
    let grid = sim.grid();
    let bounds = grid.bounding_box();

    let cells = match grid.store() {
        Store::Dense(dense) => CellState::Dense {
            cells: dense.cells().to_vec(),
        },
        Store::Sparse(sparse) => CellState::Sparse {
            rows: (0..grid.size())
                .map(|r| sparse.row_entries(r).to_vec())
                .collect(),
        },
    };

    SimulationState {
        rules: RuleTableState {
            default_color: rules.default_color(),
            rules: rules.iter().collect(),
            remnants: rules.remnants().collect(),
        },
        grid: GridState {
            init_size: grid.init_size(),
            size: grid.size(),
            def_color: grid.def_color(),
            colored: grid.colored(),
            bounds_min: bounds.min(),
            bounds_max: bounds.max(),
            cells,
        },
        ant: AntState {
            position: sim.ant().position(),
            heading: sim.ant().heading(),
        },
        steps: sim.steps(),
        running: sim.is_running(),
    }
}
