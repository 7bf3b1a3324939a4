//! Roster generation pipeline: parameter validation, constraint model
//! construction, bounded solution enumeration, selection and response
//! encoding.

use std::time::Duration;

use anyhow::{anyhow, bail};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use solver_cp::{CpModel, CpSolver, TerminalStatus};
use tracing::{debug, info};
use types::{RosterRequest, RosterResponse};

pub mod constraints;
pub mod encode;
pub mod pool;
pub mod problem;
pub mod select;
pub mod variables;

pub use constraints::{add_coverage, add_days_off_rule, add_one_shift_per_day, apply_roster_rules};
pub use encode::{roster_infeasible, roster_invalid_params, roster_ok, stats_json};
pub use pool::SolutionPool;
pub use problem::{Problem, ValidationError, MAX_DAYS, MAX_DAYS_OFF, MAX_EMPLOYEES, MAX_SHIFTS};
pub use select::select;
pub use variables::VariableSpace;

/// Default cap on collected solutions per request.
pub const DEFAULT_SOLUTION_LIMIT: usize = 5;

/// Tunables for a single roster solve.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    solution_limit: usize,
    time_limit: Option<Duration>,
}

impl SolverConfig {
    /// The solution limit is clamped to at least one so a feasible solve
    /// always has a roster to report.
    pub fn new(solution_limit: usize, time_limit: Option<Duration>) -> Self {
        Self {
            solution_limit: solution_limit.max(1),
            time_limit,
        }
    }

    pub fn solution_limit(&self) -> usize {
        self.solution_limit
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOLUTION_LIMIT, None)
    }
}

/// Runs the whole pipeline for one request: validate, build the model,
/// search, select, encode.
///
/// Out-of-range parameters and infeasible instances are ordinary
/// responses; `Err` is reserved for internal failures.
pub fn generate_roster(
    request: &RosterRequest,
    config: &SolverConfig,
) -> anyhow::Result<RosterResponse> {
    let problem = match Problem::from_request(request) {
        Ok(problem) => problem,
        Err(error) => {
            info!(%error, "rejected roster request");
            return Ok(encode::roster_invalid_params(error.to_string()));
        }
    };

    let mut model = CpModel::new();
    let space = VariableSpace::build(&problem, &mut model);
    constraints::apply_roster_rules(&mut model, &space, &problem);
    debug!(
        employees = problem.employees(),
        days = problem.days(),
        shifts = problem.shifts(),
        vars = space.num_vars(),
        soft = problem.days_off_is_soft(),
        "roster model built"
    );

    let pool = SolutionPool::new(config.solution_limit());
    let mut solver = CpSolver::new();
    if let Some(limit) = config.time_limit() {
        solver = solver.with_time_limit(limit);
    }
    let outcome = solver.solve(&model, &pool);
    info!(status = %outcome.status, stats = %outcome.stats, "roster search finished");

    let stats = encode::stats_json(&outcome);
    match outcome.status {
        TerminalStatus::Optimal | TerminalStatus::Feasible => {
            let solutions = pool.into_solutions();
            let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
            let solution =
                select::select(&solutions, request.selection, &mut rng).ok_or_else(|| {
                    anyhow!(
                        "solver reported {} but no solutions were collected",
                        outcome.status
                    )
                })?;
            encode::roster_ok(&problem, &space, solution, stats)
        }
        TerminalStatus::Infeasible | TerminalStatus::Unknown => {
            Ok(encode::roster_infeasible(stats))
        }
        TerminalStatus::ModelInvalid => bail!("solver rejected the roster model as invalid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_the_solution_limit_to_one() {
        let config = SolverConfig::new(0, None);
        assert_eq!(config.solution_limit(), 1);
    }

    #[test]
    fn config_defaults_are_bounded_enumeration_without_deadline() {
        let config = SolverConfig::default();
        assert_eq!(config.solution_limit(), DEFAULT_SOLUTION_LIMIT);
        assert!(config.time_limit().is_none());
    }
}
