use anyhow::anyhow;
use serde_json::json;
use solver_cp::{Solution, SolveOutcome};
use types::{employee_label, EmployeeRoster, RosterResponse, RosterStatus};

use crate::problem::Problem;
use crate::variables::VariableSpace;

/// Renders a found roster into the wire shape.
///
/// The one-shift-per-day rule guarantees exactly one true shift variable
/// per employee-day, so a miss here is an internal error rather than bad
/// user input.
pub fn roster_ok(
    problem: &Problem,
    space: &VariableSpace,
    solution: &Solution,
    stats: serde_json::Value,
) -> anyhow::Result<RosterResponse> {
    let mut data = Vec::with_capacity(problem.employees() as usize);
    for i in space.employees() {
        let mut shifts = Vec::with_capacity(problem.days() as usize);
        for j in space.days() {
            let mut assigned = space.shifts().filter(|&k| solution.value(space.var(i, j, k)));
            let shift = assigned
                .next()
                .ok_or_else(|| anyhow!("no shift assigned to employee {i} on day {j}"))?;
            debug_assert!(
                assigned.next().is_none(),
                "employee {} holds more than one shift on day {}",
                i,
                j
            );
            shifts.push(shift);
        }
        data.push(EmployeeRoster {
            employee_id: employee_label(i),
            shifts,
        });
    }
    Ok(RosterResponse {
        status: RosterStatus::Ok,
        week_length: problem.days() as i32,
        data,
        detail: None,
        stats,
    })
}

/// Proven infeasibility and an inconclusive search share one wire shape,
/// the sentinel week length with no assignments; `stats.terminal` tells
/// them apart.
pub fn roster_infeasible(stats: serde_json::Value) -> RosterResponse {
    RosterResponse {
        status: RosterStatus::Infeasible,
        week_length: -1,
        data: Vec::new(),
        detail: None,
        stats,
    }
}

pub fn roster_invalid_params(detail: String) -> RosterResponse {
    RosterResponse {
        status: RosterStatus::InvalidParams,
        week_length: -1,
        data: Vec::new(),
        detail: Some(detail),
        stats: serde_json::Value::Null,
    }
}

pub fn stats_json(outcome: &SolveOutcome) -> serde_json::Value {
    json!({
        "terminal": outcome.status.as_str(),
        "conflicts": outcome.stats.conflicts,
        "branches": outcome.stats.branches,
        "solutions_found": outcome.stats.solutions_found,
        "wall_time_ms": outcome.stats.wall_time.as_millis() as u64,
    })
}
