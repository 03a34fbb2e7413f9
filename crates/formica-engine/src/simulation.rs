//! Simulation orchestration: one logical step per call.

use crate::ant::Ant;
use crate::config::{ConfigError, SimulationConfig};
use crate::metrics::SimMetrics;
use formica_core::RuleTable;
use formica_grid::{Grid, GridError};
use std::error::Error;
use std::fmt;

/// Report from a successful [`Simulation::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// Whether the ant ended the move inside the grid.
    pub in_bounds: bool,
    /// Whether the grid changed representation during the step.
    pub representation_changed: bool,
    /// Whether a boundary expansion ran.
    pub expanded: bool,
}

impl StepReport {
    /// `true` when an incremental redraw suffices: the ant stayed in
    /// bounds and the representation did not flip. `false` means the
    /// whole view must be rebuilt.
    pub fn is_incremental(&self) -> bool {
        self.in_bounds && !self.representation_changed
    }
}

/// Errors from [`Simulation::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The rule table has fewer than the two rules the automaton needs.
    InsufficientRules {
        /// Rules currently in the table.
        have: usize,
    },
    /// Grid growth or conversion failed.
    Grid(GridError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientRules { have } => {
                write!(f, "rule table holds {have} rules; stepping needs at least 2")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::InsufficientRules { .. } => None,
        }
    }
}

impl From<GridError> for StepError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// A Langton's Ant simulation: rule table, hybrid grid, ant, and
/// counters, owned as one value by the host.
#[derive(Clone, Debug)]
pub struct Simulation {
    rules: RuleTable,
    grid: Grid,
    ant: Ant,
    steps: u64,
    running: bool,
    metrics: SimMetrics,
}

impl Simulation {
    /// Construct a fresh simulation: a new grid at the configured initial
    /// size with the ant centred in it.
    pub fn new(rules: RuleTable, config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(&rules, config.init_size)?;
        let ant = Ant::new(&grid, config.heading);
        let metrics = SimMetrics {
            peak_size: grid.size(),
            ..SimMetrics::default()
        };
        Ok(Self {
            rules,
            grid,
            ant,
            steps: 0,
            running: false,
            metrics,
        })
    }

    /// Reassemble a simulation from persisted raw parts.
    ///
    /// The grid and rule table arrive pre-validated by their own
    /// constructors; this checks the pieces fit together (the ant must
    /// stand inside the grid).
    pub fn from_parts(
        rules: RuleTable,
        grid: Grid,
        ant: Ant,
        steps: u64,
        running: bool,
    ) -> Result<Self, ConfigError> {
        if !ant.is_in_bounds(&grid) {
            return Err(ConfigError::AntOutOfBounds {
                pos: ant.position(),
            });
        }
        let metrics = SimMetrics {
            peak_size: grid.size(),
            ..SimMetrics::default()
        };
        Ok(Self {
            rules,
            grid,
            ant,
            steps,
            running,
            metrics,
        })
    }

    /// Execute one logical step.
    ///
    /// Moves the ant, advances the silent pre-expansion, and expands the
    /// grid if the ant walked off an edge (translating the ant back into
    /// the re-centred plane). The returned report tells the caller
    /// whether an incremental redraw still suffices.
    ///
    /// Fails with [`StepError::InsufficientRules`] until the table holds
    /// at least two rules, and with [`StepError::Grid`] when growth or
    /// conversion runs out of memory — the simulation stays consistent
    /// and the step is not counted.
    pub fn step(&mut self) -> Result<StepReport, StepError> {
        if !self.rules.has_enough_rules() {
            return Err(StepError::InsufficientRules {
                have: self.rules.len(),
            });
        }
        let was_sparse = self.grid.is_sparse();
        let in_bounds = self.ant.step(&mut self.grid, &self.rules)?;
        self.metrics.silent_rows += u64::from(self.grid.silent_expand());
        let mut expanded = false;
        if !in_bounds {
            let offset = self.grid.expand()?;
            self.ant.translate(i64::from(offset));
            expanded = true;
            self.metrics.expansions += 1;
        }
        let representation_changed = was_sparse != self.grid.is_sparse();
        if representation_changed {
            self.metrics.conversions += 1;
        }
        self.metrics.peak_size = self.metrics.peak_size.max(self.grid.size());
        self.steps += 1;
        Ok(StepReport {
            in_bounds,
            representation_changed,
            expanded,
        })
    }

    /// Allow stepping.
    pub fn run(&mut self) {
        self.running = true;
    }

    /// Pause stepping.
    pub fn halt(&mut self) {
        self.running = false;
    }

    /// Whether the simulation is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether at least one step has executed.
    pub fn has_started(&self) -> bool {
        self.steps > 0
    }

    /// Number of steps executed.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The rule table.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Mutable access to the rule table for control consumers.
    pub fn rules_mut(&mut self) -> &mut RuleTable {
        &mut self.rules
    }

    /// The grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The ant.
    pub fn ant(&self) -> &Ant {
        &self.ant
    }

    /// Cumulative storage-engine metrics.
    pub fn metrics(&self) -> &SimMetrics {
        &self.metrics
    }
}
