use std::ops::RangeInclusive;

use solver_cp::{BoolVar, CpModel};

use crate::problem::Problem;

/// Dense map from (employee, day, shift) triples to model variables.
///
/// Employees, days and shifts are all 1-based to match the wire format;
/// shift 1 is the day-off assignment.
pub struct VariableSpace {
    employees: u32,
    days: u32,
    shifts: u32,
    vars: Vec<BoolVar>,
}

impl VariableSpace {
    /// Creates one boolean variable per (employee, day, shift) triple.
    pub fn build(problem: &Problem, model: &mut CpModel) -> Self {
        let employees = problem.employees();
        let days = problem.days();
        let shifts = problem.shifts();

        let mut vars = Vec::with_capacity((employees * days * shifts) as usize);
        for i in 1..=employees {
            for j in 1..=days {
                for k in 1..=shifts {
                    vars.push(model.new_bool_var(format!("i={i}_j={j}_k={k}")));
                }
            }
        }

        Self {
            employees,
            days,
            shifts,
            vars,
        }
    }

    /// Variable that is true when `employee` works `shift` on `day`.
    /// All three coordinates are 1-based.
    pub fn var(&self, employee: u32, day: u32, shift: u32) -> BoolVar {
        debug_assert!(
            (1..=self.employees).contains(&employee),
            "employee {} out of 1..={}",
            employee,
            self.employees
        );
        debug_assert!(
            (1..=self.days).contains(&day),
            "day {} out of 1..={}",
            day,
            self.days
        );
        debug_assert!(
            (1..=self.shifts).contains(&shift),
            "shift {} out of 1..={}",
            shift,
            self.shifts
        );
        let index = ((employee - 1) * self.days + (day - 1)) * self.shifts + (shift - 1);
        self.vars[index as usize]
    }

    pub fn employees(&self) -> RangeInclusive<u32> {
        1..=self.employees
    }

    pub fn days(&self) -> RangeInclusive<u32> {
        1..=self.days
    }

    pub fn shifts(&self) -> RangeInclusive<u32> {
        1..=self.shifts
    }

    /// Shifts that count as work, i.e. everything except the off shift.
    /// Empty when the problem only has the off shift.
    pub fn working_shifts(&self) -> RangeInclusive<u32> {
        2..=self.shifts
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }
}
