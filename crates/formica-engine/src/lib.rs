//! Simulation engine for Formica.
//!
//! [`Simulation`] composes a [`RuleTable`](formica_core::RuleTable), a
//! [`Grid`](formica_grid::Grid), and an [`Ant`] behind a synchronous,
//! single-owner `step()` loop: move the ant, advance the silent
//! pre-expansion, grow the grid when the ant walks off an edge, and tell
//! the caller whether an incremental redraw still suffices. There are no
//! background threads and no shared state — the host owns the simulation
//! value outright and decides how many steps to run per tick.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ant;
pub mod config;
pub mod metrics;
pub mod simulation;

pub use ant::Ant;
pub use config::{ConfigError, SimulationConfig};
pub use metrics::SimMetrics;
pub use simulation::{Simulation, StepError, StepReport};
