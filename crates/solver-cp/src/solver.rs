use crate::model::{CpModel, LinearConstraint, LinearExpr};
use crate::observer::{SearchCommand, SolutionObserver};
use crate::result::{Solution, SolveOutcome, TerminalStatus};
use crate::search::{Conflict, SearchState};
use crate::stats::SearchStatistics;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Chronological backtracking solver over a [`CpModel`].
///
/// Satisfaction models are enumerated depth-first in a deterministic order
/// (lowest variable index first, `true` before `false`), delivering every
/// solution to the observer until the space is exhausted or the observer
/// asks to stop. Objective models run in two phases: prove the maximum by
/// iterated improvement, then enumerate the assignments attaining it
/// through the observer, so every delivered solution is optimal.
pub struct CpSolver {
    time_limit: Option<Duration>,
}

impl CpSolver {
    pub fn new() -> Self {
        Self { time_limit: None }
    }

    /// Wall-clock limit for the whole solve; expiry before any
    /// classification yields [`TerminalStatus::Unknown`].
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn solve<O: SolutionObserver>(&self, model: &CpModel, observer: &O) -> SolveOutcome {
        let started = Instant::now();
        let mut stats = SearchStatistics::default();

        if let Err(error) = model.validate() {
            warn!(%error, "model rejected before search");
            stats.wall_time = started.elapsed();
            return SolveOutcome {
                status: TerminalStatus::ModelInvalid,
                stats,
            };
        }

        let deadline = self.time_limit.map(|limit| started + limit);
        let status = match model.objective_expr() {
            Some(objective) => {
                self.run_optimization(model, objective, observer, &mut stats, deadline)
            }
            None => self.run_satisfaction(model, observer, &mut stats, deadline),
        };

        stats.wall_time = started.elapsed();
        debug!(%status, %stats, "search finished");
        SolveOutcome { status, stats }
    }

    fn run_satisfaction<O: SolutionObserver>(
        &self,
        model: &CpModel,
        observer: &O,
        stats: &mut SearchStatistics,
        deadline: Option<Instant>,
    ) -> TerminalStatus {
        let end = {
            let mut searcher = Searcher {
                state: SearchState::new(model, Vec::new()),
                observer,
                stats: &mut *stats,
                deadline,
                capture_first: false,
                first: None,
            };
            searcher.run()
        };
        match end {
            // Exhausted the whole space: either we saw solutions or there are none.
            Ok(()) => {
                if stats.solutions_found > 0 {
                    TerminalStatus::Feasible
                } else {
                    TerminalStatus::Infeasible
                }
            }
            Err(Halt::Stopped(reason)) => {
                debug!(%reason, "search stopped by observer");
                if stats.solutions_found > 0 {
                    TerminalStatus::Feasible
                } else {
                    TerminalStatus::Unknown
                }
            }
            Err(Halt::Deadline) | Err(Halt::FirstFound) => {
                if stats.solutions_found > 0 {
                    TerminalStatus::Feasible
                } else {
                    TerminalStatus::Unknown
                }
            }
        }
    }

    fn run_optimization<O: SolutionObserver>(
        &self,
        model: &CpModel,
        objective: &LinearExpr,
        observer: &O,
        stats: &mut SearchStatistics,
        deadline: Option<Instant>,
    ) -> TerminalStatus {
        // Phase 1: climb to the optimum. Each incumbent turns into a strict
        // improvement cut; when no better assignment exists the incumbent
        // value is proven maximal.
        let mut incumbent: Option<Solution> = None;
        loop {
            let cuts = match &incumbent {
                Some(best) => vec![LinearConstraint::at_least(
                    objective,
                    best.objective_value() + 1,
                )],
                None => Vec::new(),
            };
            match find_first(model, cuts, stats, deadline) {
                FirstSearch::Improved(solution) => {
                    debug!(objective = solution.objective_value(), "incumbent improved");
                    incumbent = Some(solution);
                }
                FirstSearch::Exhausted => break,
                FirstSearch::Aborted => {
                    return match incumbent {
                        Some(best) => {
                            deliver(observer, &best, stats);
                            TerminalStatus::Feasible
                        }
                        None => TerminalStatus::Unknown,
                    };
                }
            }
        }

        let Some(best) = incumbent else {
            return TerminalStatus::Infeasible;
        };

        // Phase 2: enumerate every assignment attaining the proven optimum.
        debug!(
            objective = best.objective_value(),
            "optimum proven, enumerating"
        );
        let cuts = vec![LinearConstraint::exactly(objective, best.objective_value())];
        let end = {
            let mut searcher = Searcher {
                state: SearchState::new(model, cuts),
                observer,
                stats: &mut *stats,
                deadline,
                capture_first: false,
                first: None,
            };
            searcher.run()
        };
        if let Err(Halt::Stopped(reason)) = &end {
            debug!(%reason, "enumeration stopped by observer");
        }
        // The proven optimum is always delivered, even when the deadline cut
        // the enumeration pass short.
        if stats.solutions_found == 0 {
            deliver(observer, &best, stats);
        }
        TerminalStatus::Optimal
    }
}

impl Default for CpSolver {
    fn default() -> Self {
        Self::new()
    }
}

fn deliver<O: SolutionObserver>(observer: &O, solution: &Solution, stats: &mut SearchStatistics) {
    stats.on_solution();
    observer.on_solution(solution);
}

enum Halt {
    /// The observer asked to terminate.
    Stopped(String),
    /// The wall-clock deadline expired.
    Deadline,
    /// First-only mode captured its solution.
    FirstFound,
}

enum FirstSearch {
    Improved(Solution),
    Exhausted,
    Aborted,
}

/// Runs a first-solution-only search, used by the optimization climb.
fn find_first(
    model: &CpModel,
    cuts: Vec<LinearConstraint>,
    stats: &mut SearchStatistics,
    deadline: Option<Instant>,
) -> FirstSearch {
    let mut searcher = Searcher {
        state: SearchState::new(model, cuts),
        observer: &SilentObserver,
        stats,
        deadline,
        capture_first: true,
        first: None,
    };
    let end = searcher.run();
    match (end, searcher.first) {
        (Err(Halt::FirstFound), Some(solution)) => FirstSearch::Improved(solution),
        (Ok(()), _) => FirstSearch::Exhausted,
        _ => FirstSearch::Aborted,
    }
}

/// Observer for internal passes that must not leak solutions.
struct SilentObserver;

impl SolutionObserver for SilentObserver {
    fn on_solution(&self, _solution: &Solution) {}
}

struct Searcher<'m, 's, O> {
    state: SearchState<'m>,
    observer: &'s O,
    stats: &'s mut SearchStatistics,
    deadline: Option<Instant>,
    capture_first: bool,
    first: Option<Solution>,
}

impl<O: SolutionObserver> Searcher<'_, '_, O> {
    fn run(&mut self) -> Result<(), Halt> {
        match self.state.propagate() {
            Ok(()) => self.explore(),
            Err(Conflict) => {
                self.stats.on_conflict();
                Ok(())
            }
        }
    }

    /// Depth-first enumeration; `Ok(())` means the subtree is exhausted.
    fn explore(&mut self) -> Result<(), Halt> {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(Halt::Deadline);
            }
        }
        if let SearchCommand::Terminate(reason) = self.observer.command() {
            return Err(Halt::Stopped(reason));
        }

        let Some(var) = self.state.next_unassigned() else {
            return self.emit();
        };

        for value in [true, false] {
            let mark = self.state.mark();
            self.stats.on_branch();
            self.state.decide(var, value);
            let outcome = match self.state.propagate() {
                Ok(()) => self.explore(),
                Err(Conflict) => {
                    self.stats.on_conflict();
                    Ok(())
                }
            };
            self.state.undo_to(mark);
            outcome?;
        }
        Ok(())
    }

    fn emit(&mut self) -> Result<(), Halt> {
        let solution = self.state.snapshot();
        if self.capture_first {
            self.first = Some(solution);
            return Err(Halt::FirstFound);
        }
        deliver(self.observer, &solution, self.stats);
        if let SearchCommand::Terminate(reason) = self.observer.command() {
            return Err(Halt::Stopped(reason));
        }
        Ok(())
    }
}
