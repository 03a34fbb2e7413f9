//! Formica: a Langton's Ant simulation core built around a hybrid
//! dense/sparse grid storage engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Formica sub-crates. For most users, adding `formica` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use formica::prelude::*;
//!
//! // The canonical two-color table: background 0, turn right on the
//! // first rule color, left on the second.
//! let mut rules = RuleTable::new(ColorId::new(0).unwrap());
//! rules.push(ColorId::new(1).unwrap(), Turn::Right);
//! rules.push(ColorId::new(2).unwrap(), Turn::Left);
//!
//! let mut sim = Simulation::new(rules, &SimulationConfig::default()).unwrap();
//! sim.run();
//! for _ in 0..1_000 {
//!     sim.step().unwrap();
//! }
//!
//! assert_eq!(sim.steps(), 1_000);
//! // Occupancy bookkeeping is exact in either representation.
//! assert_eq!(sim.grid().colored(), sim.grid().recount());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `formica-core` | Color ids, turns, headings, positions, the rule table |
//! | [`grid`] | `formica-grid` | Hybrid cell storage, growth, and conversion policy |
//! | [`engine`] | `formica-engine` | The ant, the simulation loop, config, metrics |
//! | [`snapshot`] | `formica-snapshot` | Raw-field state capture and validated restore |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Color ids, turns, headings, positions, and the rule table
/// (`formica-core`).
pub use formica_core as types;

/// Hybrid dense/sparse cell storage with tripling growth (`formica-grid`).
pub use formica_grid as grid;

/// The ant, the simulation loop, configuration, and metrics
/// (`formica-engine`).
pub use formica_engine as engine;

/// Raw-field state capture and validated restore (`formica-snapshot`).
pub use formica_snapshot as snapshot;

/// Common imports for typical Formica usage.
///
/// ```rust
/// use formica::prelude::*;
/// ```
pub mod prelude {
    // Core vocabulary
    pub use formica_core::{ColorId, Direction, Position, RuleTable, Turn, VisitOutcome};

    // Grid storage
    pub use formica_grid::{BoundingBox, CellWrite, Grid, GridError, SparseCell, Store};

    // Engine
    pub use formica_engine::{
        Ant, ConfigError, SimMetrics, Simulation, SimulationConfig, StepError, StepReport,
    };

    // Snapshots
    pub use formica_snapshot::{capture, restore, SimulationState, SnapshotError};
}
