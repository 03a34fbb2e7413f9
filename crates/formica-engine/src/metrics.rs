//! Cumulative storage-engine metrics.

/// Counters describing storage-engine activity since construction.
///
/// Populated by [`Simulation::step`](crate::Simulation::step); read-only
/// for telemetry consumers. These are event counts rather than timings —
/// a single step is far too short to bracket with clock reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimMetrics {
    /// Boundary-triggered grid expansions.
    pub expansions: u64,
    /// Dense→sparse representation conversions.
    pub conversions: u64,
    /// Rows of the next dense buffer pre-allocated silently.
    pub silent_rows: u64,
    /// Largest side length reached.
    pub peak_size: u32,
}
