//! Trail-based search state and constraint propagation.

use crate::model::{BoolVar, CpModel, LinearConstraint};
use crate::result::Solution;

/// Marker for a propagation dead-end at the current partial assignment.
pub(crate) struct Conflict;

/// Partial assignment plus the trail needed to undo it chronologically.
pub(crate) struct AssignmentState {
    values: Vec<Option<bool>>,
    trail: Vec<BoolVar>,
}

impl AssignmentState {
    fn new(num_vars: usize) -> Self {
        Self {
            values: vec![None; num_vars],
            trail: Vec::with_capacity(num_vars),
        }
    }

    #[inline]
    fn value(&self, var: BoolVar) -> Option<bool> {
        self.values[var.index()]
    }

    /// Records `var = value`, failing on contradiction with an earlier
    /// assignment. Returns whether anything changed.
    fn set(&mut self, var: BoolVar, value: bool) -> Result<bool, Conflict> {
        match self.values[var.index()] {
            Some(existing) if existing == value => Ok(false),
            Some(_) => Err(Conflict),
            None => {
                self.values[var.index()] = Some(value);
                self.trail.push(var);
                Ok(true)
            }
        }
    }
}

/// Unit propagation for one exactly-one group.
fn propagate_exactly_one(
    group: &[BoolVar],
    assignment: &mut AssignmentState,
) -> Result<bool, Conflict> {
    let mut true_count = 0usize;
    let mut unassigned = 0usize;
    for &var in group {
        match assignment.value(var) {
            Some(true) => true_count += 1,
            Some(false) => {}
            None => unassigned += 1,
        }
    }
    if true_count > 1 {
        return Err(Conflict);
    }

    let mut changed = false;
    if true_count == 1 {
        for &var in group {
            if assignment.value(var).is_none() {
                changed |= assignment.set(var, false)?;
            }
        }
    } else {
        match unassigned {
            0 => return Err(Conflict),
            1 => {
                for &var in group {
                    if assignment.value(var).is_none() {
                        changed |= assignment.set(var, true)?;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(changed)
}

/// Bounds-consistency propagation for one linear constraint: computes the
/// attainable sum interval given the partial assignment, fails when the
/// interval misses `[lb, ub]`, and fixes any variable whose remaining value
/// would always miss it.
fn propagate_linear(
    constraint: &LinearConstraint,
    assignment: &mut AssignmentState,
) -> Result<bool, Conflict> {
    let mut min_sum = 0i64;
    let mut max_sum = 0i64;
    for &(var, coeff) in &constraint.terms {
        match assignment.value(var) {
            Some(true) => {
                min_sum += coeff;
                max_sum += coeff;
            }
            Some(false) => {}
            None => {
                if coeff > 0 {
                    max_sum += coeff;
                } else {
                    min_sum += coeff;
                }
            }
        }
    }
    if min_sum > constraint.ub || max_sum < constraint.lb {
        return Err(Conflict);
    }

    let mut changed = false;
    for &(var, coeff) in &constraint.terms {
        if assignment.value(var).is_some() {
            continue;
        }
        let (min_if_true, max_if_true) = (min_sum + coeff.max(0), max_sum + coeff.min(0));
        let (min_if_false, max_if_false) = (min_sum - coeff.min(0), max_sum - coeff.max(0));
        if min_if_true > constraint.ub || max_if_true < constraint.lb {
            changed |= assignment.set(var, false)?;
        } else if min_if_false > constraint.ub || max_if_false < constraint.lb {
            changed |= assignment.set(var, true)?;
        }
    }
    Ok(changed)
}

/// Variables constrained by the cuts come first, the rest follow in index
/// order. A cut mentions only those variables, so once they are all
/// assigned the cut is decided; refuting an unreachable bound never has to
/// branch past them.
fn decision_order(model: &CpModel, cuts: &[LinearConstraint]) -> Vec<BoolVar> {
    let num_vars = model.num_vars();
    let mut in_cuts = vec![false; num_vars];
    for cut in cuts {
        for &(var, _) in &cut.terms {
            in_cuts[var.index()] = true;
        }
    }
    let mut order = Vec::with_capacity(num_vars);
    order.extend((0..num_vars).filter(|&i| in_cuts[i]).map(BoolVar::from_index));
    order.extend((0..num_vars).filter(|&i| !in_cuts[i]).map(BoolVar::from_index));
    order
}

/// One search's working state: the model, any extra objective cuts for the
/// current pass, and the mutable assignment.
pub(crate) struct SearchState<'m> {
    model: &'m CpModel,
    cuts: Vec<LinearConstraint>,
    decision_order: Vec<BoolVar>,
    assignment: AssignmentState,
}

impl<'m> SearchState<'m> {
    pub(crate) fn new(model: &'m CpModel, cuts: Vec<LinearConstraint>) -> Self {
        Self {
            decision_order: decision_order(model, &cuts),
            model,
            cuts,
            assignment: AssignmentState::new(model.num_vars()),
        }
    }

    /// First unassigned variable in decision order; the order is fixed per
    /// pass, so enumeration stays deterministic for a given model.
    pub(crate) fn next_unassigned(&self) -> Option<BoolVar> {
        self.decision_order
            .iter()
            .copied()
            .find(|&var| self.assignment.value(var).is_none())
    }

    pub(crate) fn mark(&self) -> usize {
        self.assignment.trail.len()
    }

    pub(crate) fn undo_to(&mut self, mark: usize) {
        while self.assignment.trail.len() > mark {
            if let Some(var) = self.assignment.trail.pop() {
                self.assignment.values[var.index()] = None;
            }
        }
    }

    /// Takes a branching decision on an unassigned variable.
    pub(crate) fn decide(&mut self, var: BoolVar, value: bool) {
        debug_assert!(
            self.assignment.value(var).is_none(),
            "called `decide` on an assigned variable"
        );
        self.assignment.values[var.index()] = Some(value);
        self.assignment.trail.push(var);
    }

    /// Runs all propagators to fixpoint.
    pub(crate) fn propagate(&mut self) -> Result<(), Conflict> {
        loop {
            let mut changed = false;
            for group in self.model.exactly_one_groups() {
                changed |= propagate_exactly_one(group, &mut self.assignment)?;
            }
            for constraint in self.model.linear_constraints() {
                changed |= propagate_linear(constraint, &mut self.assignment)?;
            }
            for constraint in &self.cuts {
                changed |= propagate_linear(constraint, &mut self.assignment)?;
            }
            if !changed {
                return Ok(());
            }
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.assignment.trail.len() == self.model.num_vars()
    }

    /// Freezes the current (complete) assignment into a [`Solution`].
    pub(crate) fn snapshot(&self) -> Solution {
        debug_assert!(self.is_complete(), "snapshot of an incomplete assignment");
        let values: Vec<bool> = self
            .assignment
            .values
            .iter()
            .map(|value| value.unwrap_or(false))
            .collect();
        let objective = self
            .model
            .objective_expr()
            .map(|expr| expr.evaluate(&values))
            .unwrap_or(0);
        Solution::new(values, objective)
    }
}
