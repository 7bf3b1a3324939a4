use solver_cp::{CpModel, LinearExpr};
use types::OFF_SHIFT;

use crate::problem::Problem;
use crate::variables::VariableSpace;

/// Installs the full rule set: one assignment per employee-day, the
/// days-off rule in its hard or soft form, and minimum coverage of every
/// working shift.
pub fn apply_roster_rules(model: &mut CpModel, space: &VariableSpace, problem: &Problem) {
    add_one_shift_per_day(model, space);
    add_days_off_rule(model, space, problem);
    add_coverage(model, space);
}

/// Every employee takes exactly one assignment per day, counting the off
/// shift as an assignment.
pub fn add_one_shift_per_day(model: &mut CpModel, space: &VariableSpace) {
    for i in space.employees() {
        for j in space.days() {
            model.add_exactly_one(space.shifts().map(|k| space.var(i, j, k)));
        }
    }
}

/// Hard mode pins every employee's off-day count to the target. Soft mode
/// caps it per employee and maximizes the joint off-day total instead.
pub fn add_days_off_rule(model: &mut CpModel, space: &VariableSpace, problem: &Problem) {
    let target = i64::from(problem.days_off_target());
    if problem.days_off_is_soft() {
        let mut joint = LinearExpr::new();
        for i in space.employees() {
            let mut per_employee = LinearExpr::new();
            for j in space.days() {
                let var = space.var(i, j, OFF_SHIFT);
                per_employee.push(var, 1);
                joint.push(var, 1);
            }
            model.add_linear_le(per_employee, target);
        }
        model.maximize(joint);
    } else {
        for i in space.employees() {
            let off_days = LinearExpr::sum(space.days().map(|j| space.var(i, j, OFF_SHIFT)));
            model.add_linear_eq(off_days, target);
        }
    }
}

/// At least one employee staffs every working shift on every day.
pub fn add_coverage(model: &mut CpModel, space: &VariableSpace) {
    for j in space.days() {
        for k in space.working_shifts() {
            let staffed = LinearExpr::sum(space.employees().map(|i| space.var(i, j, k)));
            model.add_linear_ge(staffed, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use solver_cp::{CpSolver, Solution, TerminalStatus};

    use super::*;
    use crate::pool::SolutionPool;

    fn setup(
        employees: u32,
        days: u32,
        shifts: u32,
        days_off: u32,
        soft: bool,
    ) -> (Problem, CpModel, VariableSpace) {
        let problem = Problem::new(employees, days, shifts, days_off, soft).unwrap();
        let mut model = CpModel::new();
        let space = VariableSpace::build(&problem, &mut model);
        (problem, model, space)
    }

    fn solve_all(model: &CpModel) -> (TerminalStatus, Vec<Solution>) {
        let pool = SolutionPool::new(64);
        let outcome = CpSolver::new().solve(model, &pool);
        (outcome.status, pool.into_solutions())
    }

    fn off_days(space: &VariableSpace, solution: &Solution, employee: u32) -> i64 {
        space
            .days()
            .filter(|&j| solution.value(space.var(employee, j, OFF_SHIFT)))
            .count() as i64
    }

    #[test]
    fn one_shift_per_day_enumerates_all_assignments() {
        let (_problem, mut model, space) = setup(1, 2, 2, 0, false);
        add_one_shift_per_day(&mut model, &space);

        let (status, solutions) = solve_all(&model);
        assert_eq!(status, TerminalStatus::Feasible);
        // two choices per day over two days
        assert_eq!(solutions.len(), 4);
        for solution in &solutions {
            for j in space.days() {
                let assigned = space
                    .shifts()
                    .filter(|&k| solution.value(space.var(1, j, k)))
                    .count();
                assert_eq!(assigned, 1);
            }
        }
    }

    #[test]
    fn hard_days_off_rule_pins_the_count() {
        let (problem, mut model, space) = setup(1, 3, 2, 1, false);
        add_one_shift_per_day(&mut model, &space);
        add_days_off_rule(&mut model, &space, &problem);

        let (status, solutions) = solve_all(&model);
        assert_eq!(status, TerminalStatus::Feasible);
        // one free choice of which day is off
        assert_eq!(solutions.len(), 3);
        for solution in &solutions {
            assert_eq!(off_days(&space, solution, 1), 1);
        }
    }

    #[test]
    fn soft_days_off_rule_maximizes_the_joint_total() {
        let (problem, mut model, space) = setup(2, 2, 2, 1, true);
        apply_roster_rules(&mut model, &space, &problem);

        let (status, solutions) = solve_all(&model);
        assert_eq!(status, TerminalStatus::Optimal);
        assert!(!solutions.is_empty());
        for solution in &solutions {
            let total = off_days(&space, solution, 1) + off_days(&space, solution, 2);
            assert_eq!(total, 2);
            assert!(off_days(&space, solution, 1) <= 1);
            assert!(off_days(&space, solution, 2) <= 1);
        }
    }

    #[test]
    fn coverage_rejects_understaffed_rosters() {
        // one employee cannot staff two working shifts on the same day
        let (_problem, mut model, space) = setup(1, 1, 3, 0, false);
        add_one_shift_per_day(&mut model, &space);
        add_coverage(&mut model, &space);

        let (status, solutions) = solve_all(&model);
        assert_eq!(status, TerminalStatus::Infeasible);
        assert!(solutions.is_empty());
    }

    #[test]
    fn coverage_is_vacuous_without_working_shifts() {
        let (_problem, mut model, space) = setup(2, 2, 1, 0, false);
        add_one_shift_per_day(&mut model, &space);
        add_coverage(&mut model, &space);

        let (status, solutions) = solve_all(&model);
        assert_eq!(status, TerminalStatus::Feasible);
        // everyone is forced onto the off shift every day
        assert_eq!(solutions.len(), 1);
    }
}
