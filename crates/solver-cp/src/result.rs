use crate::model::BoolVar;
use crate::stats::SearchStatistics;
use std::fmt;

/// Complete assignment of every model variable, frozen at discovery time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    values: Vec<bool>,
    objective: i64,
}

impl Solution {
    pub(crate) fn new(values: Vec<bool>, objective: i64) -> Self {
        Self { values, objective }
    }

    pub fn value(&self, var: BoolVar) -> bool {
        debug_assert!(
            var.index() < self.values.len(),
            "called `Solution::value` with a variable out of bounds: the len is {} but the index is {}",
            self.values.len(),
            var.index()
        );
        self.values[var.index()]
    }

    /// Objective value under this assignment; `0` for satisfaction models.
    pub fn objective_value(&self) -> i64 {
        self.objective
    }

    pub fn num_vars(&self) -> usize {
        self.values.len()
    }
}

/// Final classification of a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalStatus {
    /// The objective was proven maximal; only produced for objective models.
    Optimal,
    /// At least one solution was delivered but optimality was not claimed,
    /// e.g. because the observer stopped the search or no objective exists.
    Feasible,
    /// Proven: no satisfying assignment exists.
    Infeasible,
    /// The search was cut short before any classification was possible.
    Unknown,
    /// The model failed validation; nothing was searched.
    ModelInvalid,
}

impl TerminalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TerminalStatus::Optimal => "optimal",
            TerminalStatus::Feasible => "feasible",
            TerminalStatus::Infeasible => "infeasible",
            TerminalStatus::Unknown => "unknown",
            TerminalStatus::ModelInvalid => "model_invalid",
        }
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a call to [`crate::CpSolver::solve`] hands back.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    pub status: TerminalStatus,
    pub stats: SearchStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_to_lower_snake() {
        assert_eq!(TerminalStatus::Optimal.as_str(), "optimal");
        assert_eq!(TerminalStatus::ModelInvalid.as_str(), "model_invalid");
        assert_eq!(TerminalStatus::Infeasible.to_string(), "infeasible");
    }

    #[test]
    fn solution_exposes_values_and_objective() {
        let mut model = crate::CpModel::new();
        let a = model.new_bool_var("a");
        let b = model.new_bool_var("b");
        let solution = Solution::new(vec![true, false], 7);
        assert!(solution.value(a));
        assert!(!solution.value(b));
        assert_eq!(solution.objective_value(), 7);
        assert_eq!(solution.num_vars(), 2);
    }
}
