//! Small constraint-programming engine over boolean variables.
//!
//! A [`CpModel`] collects exactly-one groups, bounded linear constraints and
//! an optional maximization objective; [`CpSolver`] searches it with
//! chronological backtracking plus unit and bounds-consistency propagation.
//! Every feasible assignment is handed to a caller-supplied
//! [`SolutionObserver`], which can stop the search cooperatively; bounded
//! solution enumeration is built on that hook.

pub mod model;
pub mod observer;
pub mod result;
mod search;
pub mod solver;
pub mod stats;

pub use model::{BoolVar, CpModel, LinearExpr, ModelError};
pub use observer::{SearchCommand, SolutionObserver};
pub use result::{Solution, SolveOutcome, TerminalStatus};
pub use solver::CpSolver;
pub use stats::SearchStatistics;
