use std::fmt;
use thiserror::Error;

/// Handle to a boolean decision variable owned by a [`CpModel`].
///
/// Handles are plain indices and are only meaningful for the model that
/// created them; [`CpModel::validate`] catches handles smuggled in from a
/// different model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoolVar(u32);

impl BoolVar {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize);
        BoolVar(index as u32)
    }
}

impl fmt::Display for BoolVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Integer-weighted sum of boolean variables plus a constant.
#[derive(Clone, Debug, Default)]
pub struct LinearExpr {
    terms: Vec<(BoolVar, i64)>,
    constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit-coefficient sum over `vars`.
    pub fn sum(vars: impl IntoIterator<Item = BoolVar>) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1)).collect(),
            constant: 0,
        }
    }

    pub fn push(&mut self, var: BoolVar, coeff: i64) {
        self.terms.push((var, coeff));
    }

    pub fn term(mut self, var: BoolVar, coeff: i64) -> Self {
        self.push(var, coeff);
        self
    }

    pub fn offset(mut self, constant: i64) -> Self {
        self.constant += constant;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn terms(&self) -> &[(BoolVar, i64)] {
        &self.terms
    }

    /// Value of the expression under a complete assignment.
    pub(crate) fn evaluate(&self, values: &[bool]) -> i64 {
        let mut total = self.constant;
        for &(var, coeff) in &self.terms {
            if values[var.index()] {
                total += coeff;
            }
        }
        total
    }
}

impl From<BoolVar> for LinearExpr {
    fn from(var: BoolVar) -> Self {
        LinearExpr::new().term(var, 1)
    }
}

/// `lb <= sum(terms) <= ub`, with the expression constant already folded
/// into the bounds.
#[derive(Clone, Debug)]
pub(crate) struct LinearConstraint {
    pub(crate) terms: Vec<(BoolVar, i64)>,
    pub(crate) lb: i64,
    pub(crate) ub: i64,
}

impl LinearConstraint {
    fn from_expr(expr: LinearExpr, lb: i64, ub: i64) -> Self {
        let constant = expr.constant;
        Self {
            terms: expr.terms,
            lb: lb.saturating_sub(constant),
            ub: ub.saturating_sub(constant),
        }
    }

    /// `sum(expr) >= bound`, used for objective cuts during optimization.
    pub(crate) fn at_least(expr: &LinearExpr, bound: i64) -> Self {
        Self::from_expr(expr.clone(), bound, i64::MAX)
    }

    /// `sum(expr) == value`, used to pin the objective while enumerating.
    pub(crate) fn exactly(expr: &LinearExpr, value: i64) -> Self {
        Self::from_expr(expr.clone(), value, value)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("variable x{index} is out of range: the model has {num_vars} variables")]
    VarOutOfRange { index: usize, num_vars: usize },
    #[error("exactly-one constraint #{index} has no variables")]
    EmptyExactlyOne { index: usize },
}

/// Declarative constraint model over boolean variables.
///
/// Supports exactly-one groups, bounded linear (pseudo-boolean) constraints
/// and at most one maximization objective. The model is inert data; solving
/// happens in [`crate::CpSolver`].
#[derive(Clone, Debug, Default)]
pub struct CpModel {
    names: Vec<String>,
    exactly_ones: Vec<Vec<BoolVar>>,
    linears: Vec<LinearConstraint>,
    objective: Option<LinearExpr>,
}

impl CpModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar {
        let index = u32::try_from(self.names.len()).unwrap_or(u32::MAX);
        debug_assert!(index < u32::MAX, "variable count exceeds u32 range");
        self.names.push(name.into());
        BoolVar(index)
    }

    pub fn num_vars(&self) -> usize {
        self.names.len()
    }

    pub fn var_name(&self, var: BoolVar) -> &str {
        &self.names[var.index()]
    }

    /// Exactly one of `vars` must be true in every solution.
    pub fn add_exactly_one(&mut self, vars: impl IntoIterator<Item = BoolVar>) {
        self.exactly_ones.push(vars.into_iter().collect());
    }

    pub fn add_linear_eq(&mut self, expr: LinearExpr, value: i64) {
        self.linears
            .push(LinearConstraint::from_expr(expr, value, value));
    }

    pub fn add_linear_le(&mut self, expr: LinearExpr, bound: i64) {
        self.linears
            .push(LinearConstraint::from_expr(expr, i64::MIN, bound));
    }

    pub fn add_linear_ge(&mut self, expr: LinearExpr, bound: i64) {
        self.linears
            .push(LinearConstraint::from_expr(expr, bound, i64::MAX));
    }

    /// Sets the objective to maximize, replacing any previous one.
    pub fn maximize(&mut self, expr: LinearExpr) {
        self.objective = Some(expr);
    }

    /// Structural sanity check run by the solver before any search.
    pub fn validate(&self) -> Result<(), ModelError> {
        let num_vars = self.num_vars();
        let check = |var: BoolVar| -> Result<(), ModelError> {
            if var.index() >= num_vars {
                return Err(ModelError::VarOutOfRange {
                    index: var.index(),
                    num_vars,
                });
            }
            Ok(())
        };
        for (index, group) in self.exactly_ones.iter().enumerate() {
            if group.is_empty() {
                return Err(ModelError::EmptyExactlyOne { index });
            }
            for &var in group {
                check(var)?;
            }
        }
        for constraint in &self.linears {
            for &(var, _) in &constraint.terms {
                check(var)?;
            }
        }
        if let Some(objective) = &self.objective {
            for &(var, _) in objective.terms() {
                check(var)?;
            }
        }
        Ok(())
    }

    pub(crate) fn exactly_one_groups(&self) -> &[Vec<BoolVar>] {
        &self.exactly_ones
    }

    pub(crate) fn linear_constraints(&self) -> &[LinearConstraint] {
        &self.linears
    }

    pub(crate) fn objective_expr(&self) -> Option<&LinearExpr> {
        self.objective.as_ref()
    }
}
