use std::fmt;
use std::time::Duration;

/// Search diagnostics. Purely informational: nothing in the solver branches
/// on these counters.
#[derive(Clone, Debug, Default)]
pub struct SearchStatistics {
    /// Propagation dead-ends encountered.
    pub conflicts: u64,
    /// Branching decisions taken.
    pub branches: u64,
    /// Solutions delivered to the observer.
    pub solutions_found: u64,
    /// Total time from entering `solve` to returning.
    pub wall_time: Duration,
}

impl SearchStatistics {
    #[inline]
    pub(crate) fn on_conflict(&mut self) {
        self.conflicts += 1;
    }

    #[inline]
    pub(crate) fn on_branch(&mut self) {
        self.branches += 1;
    }

    #[inline]
    pub(crate) fn on_solution(&mut self) {
        self.solutions_found += 1;
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "conflicts={} branches={} solutions={} wall_time={:?}",
            self.conflicts, self.branches, self.solutions_found, self.wall_time
        )
    }
}
