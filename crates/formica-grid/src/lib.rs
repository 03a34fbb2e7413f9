//! Hybrid lattice storage for the Formica simulation.
//!
//! The lattice is unbounded in principle but almost entirely background
//! colored in practice, so [`Grid`] keeps exactly one of two
//! representations live at a time:
//!
//! - [`DenseStore`]: a flat `size × size` byte matrix — compact while the
//!   visited region fills most of the plane.
//! - [`SparseStore`]: one column-sorted entry list per row, holding only
//!   non-background cells — compact once growth outpaces occupancy.
//!
//! Growth triples the side length and re-centres the old content in the
//! middle third of the new plane. Conversion from dense to sparse is
//! one-way and driven by two lazily evaluated heuristics: a memory
//! footprint comparison at growth time and an occupancy-ratio check on
//! large grids. [`ExpansionJob`] amortizes the cost of the next dense
//! buffer across the steps that precede an expansion.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod dense;
pub mod error;
pub mod expand;
pub mod grid;
pub mod sparse;

pub use bounds::BoundingBox;
pub use dense::DenseStore;
pub use error::GridError;
pub use expand::ExpansionJob;
pub use grid::{
    CellWrite, Grid, Store, DEF_INIT_SIZE, GRID_MULT, MAX_INIT_SIZE, MIN_INIT_SIZE,
    SIZE_THRESHOLD, USAGE_THRESHOLD,
};
pub use sparse::{SparseCell, SparseStore};
