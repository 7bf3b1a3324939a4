use rand::seq::SliceRandom;
use rand::Rng;
use solver_cp::Solution;
use types::SelectionMode;

/// Picks the roster to report out of the collected pool.
///
/// `First` is deterministic for a fixed request because the solver
/// enumerates in a fixed order; `Random` draws uniformly from the pool,
/// which only holds the first solutions found, not all of them.
pub fn select<'a, R: Rng>(
    solutions: &'a [Solution],
    mode: SelectionMode,
    rng: &mut R,
) -> Option<&'a Solution> {
    match mode {
        SelectionMode::First => solutions.first(),
        SelectionMode::Random => solutions.choose(rng),
    }
}
