//! Simulation configuration, validation, and error types.

use formica_core::{Direction, Position};
use formica_grid::{GridError, DEF_INIT_SIZE, MAX_INIT_SIZE, MIN_INIT_SIZE};
use std::error::Error;
use std::fmt;

/// Complete configuration for constructing a [`Simulation`](crate::Simulation).
///
/// A fresh grid and a freshly centred ant are built from this every time
/// settings change; the rule table is supplied separately because it
/// outlives reconstructions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Initial grid side length, in `[2, 7]`.
    pub init_size: u32,
    /// Heading the ant starts with.
    pub heading: Direction,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            init_size: DEF_INIT_SIZE,
            heading: Direction::Up,
        }
    }
}

impl SimulationConfig {
    /// Validate structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_INIT_SIZE..=MAX_INIT_SIZE).contains(&self.init_size) {
            return Err(ConfigError::InitSizeOutOfRange {
                got: self.init_size,
            });
        }
        Ok(())
    }
}

/// Errors detected while constructing a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Initial side length outside the supported `[2, 7]` range.
    InitSizeOutOfRange {
        /// The rejected value.
        got: u32,
    },
    /// Grid allocation or reconstruction failed.
    Grid(GridError),
    /// A persisted ant position lies outside its grid.
    AntOutOfBounds {
        /// The rejected position.
        pos: Position,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitSizeOutOfRange { got } => {
                write!(f, "initial size {got} outside the supported [2, 7] range")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::AntOutOfBounds { pos } => {
                write!(f, "ant position {pos} lies outside the grid")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
