//! Error types for state restoration.

use formica_core::RuleError;
use formica_engine::ConfigError;
use formica_grid::GridError;
use std::error::Error;
use std::fmt;

/// Errors from [`restore`](crate::restore).
///
/// All variants mean the supplied state is structurally invalid — a
/// distinct failure class from whatever I/O errors the persistence
/// collaborator reports on its own layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    /// Rule-table fields are inconsistent.
    Rules(RuleError),
    /// Grid fields are inconsistent.
    Grid(GridError),
    /// The reassembled pieces do not fit together.
    Engine(ConfigError),
    /// A cross-field inconsistency outside any one component.
    InvalidState {
        /// Description of the inconsistency.
        reason: String,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rules(e) => write!(f, "rules: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Engine(e) => write!(f, "engine: {e}"),
            Self::InvalidState { reason } => write!(f, "invalid state: {reason}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rules(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Engine(e) => Some(e),
            Self::InvalidState { .. } => None,
        }
    }
}

impl From<RuleError> for SnapshotError {
    fn from(e: RuleError) -> Self {
        Self::Rules(e)
    }
}

impl From<GridError> for SnapshotError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<ConfigError> for SnapshotError {
    fn from(e: ConfigError) -> Self {
        Self::Engine(e)
    }
}
