//! Core types for the Formica simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! fundamental vocabulary shared by the rest of the workspace — color ids,
//! turns, headings, lattice positions — and the [`RuleTable`], the mutable
//! circular rule chain that encodes the automaton's transition function.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod color;
pub mod direction;
pub mod error;
pub mod position;
pub mod rules;

pub use color::ColorId;
pub use direction::{Direction, Turn};
pub use error::RuleError;
pub use position::Position;
pub use rules::{RuleTable, VisitOutcome, MAX_RULES};
