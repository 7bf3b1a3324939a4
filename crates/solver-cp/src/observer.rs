use crate::result::Solution;

/// Verdict polled by the solver at every search step and after every
/// delivered solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchCommand {
    Continue,
    /// Stop the search cooperatively; the reason ends up in the logs.
    Terminate(String),
}

/// Receives every feasible solution the solver discovers.
///
/// Callbacks take `&self` so an observer can be driven from whatever context
/// the solver runs in; implementations that accumulate state must therefore
/// guard it themselves (a mutex-held vector, an atomic flag). Requesting a
/// stop is cooperative: after [`SearchCommand::Terminate`] is observed the
/// solver may still deliver at most the solution already in flight.
pub trait SolutionObserver {
    fn on_solution(&self, solution: &Solution);

    fn command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
