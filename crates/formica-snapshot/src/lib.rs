//! Raw-field state capture and validated restore.
//!
//! A [`SimulationState`] mirrors every attribute a persistence
//! collaborator needs, 1:1 with the live types: the rule chain with its
//! remnant aliases, the grid's size lineage and occupancy bookkeeping,
//! the cell payload in whichever representation is live, the ant, and the
//! simulation counters. This crate performs no I/O — serializing the
//! state to any concrete format (and reporting I/O failures distinctly)
//! belongs to the collaborator; [`restore`] guarantees that whatever
//! comes back is structurally sound before a simulation is rebuilt from
//! it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod capture;
pub mod error;
pub mod restore;
pub mod types;

pub use capture::capture;
pub use error::SnapshotError;
pub use restore::restore;
pub use types::{AntState, CellState, GridState, RuleTableState, SimulationState};
