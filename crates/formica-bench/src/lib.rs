//! Benchmark profiles for the Formica workspace.
//!
//! Pre-built simulations at known storage phases:
//!
//! - [`classic_simulation`]: the two-color table advanced a given number
//!   of steps — a few hundred steps stays dense, tens of thousands ends
//!   up sparse on a large plane.
//! - [`scribbled_grid`]: a standalone dense grid with deterministic
//!   pseudo-random occupancy, for conversion and expansion benches.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use formica_core::Position;
use formica_engine::{Simulation, SimulationConfig};
use formica_grid::Grid;
use formica_test_utils::{classic_pair, color};

/// Build a classic two-color simulation advanced by `steps` steps.
pub fn classic_simulation(steps: u64) -> Simulation {
    let mut sim = Simulation::new(classic_pair(), &SimulationConfig::default())
        .expect("default configuration is valid");
    for _ in 0..steps {
        sim.step().expect("classic table steps cleanly");
    }
    sim
}

/// Build a dense grid of the given tripling generation with `writes`
/// deterministic pseudo-random cells colored.
///
/// `generations` counts expansions from the default initial size 4, so
/// `generations = 3` yields a 108×108 plane.
pub fn scribbled_grid(generations: u32, writes: u64) -> Grid {
    let rules = classic_pair();
    let mut grid = Grid::new(&rules, 4).expect("default initial size is valid");
    for _ in 0..generations {
        grid.expand().expect("expansion fits in memory");
    }
    let size = u64::from(grid.size());
    for i in 0..writes {
        // Deterministic pseudo-random coordinates within bounds.
        let r = (i.wrapping_mul(6364136223846793005) >> 11) % size;
        let c = (i.wrapping_mul(1442695040888963407) >> 11) % size;
        let col = 1 + (i % 2) as u8;
        grid.set_color(Position::new(r as i64, c as i64), color(col));
    }
    grid
}
