use std::sync::Arc;
use std::time::Duration;

use roster_core::{SolverConfig, DEFAULT_SOLUTION_LIMIT};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SolverConfig>,
}

impl AppState {
    /// Builds the per-process solver configuration from
    /// `ROSTERA__SOLVER__SOLUTION_LIMIT` and `ROSTERA__SOLVER__TIME_LIMIT_MS`;
    /// unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let solution_limit =
            env_parse("ROSTERA__SOLVER__SOLUTION_LIMIT").unwrap_or(DEFAULT_SOLUTION_LIMIT);
        let time_limit =
            env_parse::<u64>("ROSTERA__SOLVER__TIME_LIMIT_MS").map(Duration::from_millis);
        Self {
            config: Arc::new(SolverConfig::new(solution_limit, time_limit)),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|value| value.parse().ok())
}
