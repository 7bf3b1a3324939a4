use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use solver_cp::{SearchCommand, Solution, SolutionObserver};

/// Collects solver deliveries up to a fixed cap and then asks the search
/// to stop.
///
/// Deliveries arriving after the cap is reached are dropped, so the pool
/// never holds more than `limit` solutions even when the solver visits
/// another leaf before polling for a command.
pub struct SolutionPool {
    limit: usize,
    solutions: Mutex<Vec<Solution>>,
    stop: AtomicBool,
}

impl SolutionPool {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            solutions: Mutex::new(Vec::new()),
            stop: AtomicBool::new(false),
        }
    }

    pub fn len(&self) -> usize {
        self.solutions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions.into_inner()
    }
}

impl SolutionObserver for SolutionPool {
    fn on_solution(&self, solution: &Solution) {
        let mut solutions = self.solutions.lock();
        if solutions.len() < self.limit {
            solutions.push(solution.clone());
        }
        if solutions.len() >= self.limit {
            self.stop.store(true, Ordering::Relaxed);
        }
    }

    fn command(&self) -> SearchCommand {
        if self.stop.load(Ordering::Relaxed) {
            SearchCommand::Terminate("solution limit reached".into())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // obtains a solution instance by solving a trivial one-variable model
    fn sample() -> Solution {
        let mut model = solver_cp::CpModel::new();
        let a = model.new_bool_var("a");
        model.add_exactly_one([a]);
        let pool = SolutionPool::new(1);
        solver_cp::CpSolver::new().solve(&model, &pool);
        pool.into_solutions().pop().unwrap()
    }

    #[test]
    fn collects_up_to_the_limit() {
        let sample = sample();
        let pool = SolutionPool::new(2);
        pool.on_solution(&sample);
        assert_eq!(pool.command(), SearchCommand::Continue);
        pool.on_solution(&sample);
        assert!(matches!(pool.command(), SearchCommand::Terminate(_)));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn drops_deliveries_past_the_limit() {
        let sample = sample();
        let pool = SolutionPool::new(1);
        pool.on_solution(&sample);
        pool.on_solution(&sample);
        pool.on_solution(&sample);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn zero_limit_stops_immediately_and_keeps_nothing() {
        let sample = sample();
        let pool = SolutionPool::new(0);
        pool.on_solution(&sample);
        assert!(pool.is_empty());
        assert!(matches!(pool.command(), SearchCommand::Terminate(_)));
    }
}
