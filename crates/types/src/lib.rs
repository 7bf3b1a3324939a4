use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shift code reserved for "not working"; working shift-types are
/// `2..=num_shifts`.
pub const OFF_SHIFT: u32 = 1;

pub fn default_days_off() -> u32 {
    2
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct RosterRequest {
    pub num_employees: u32,
    pub num_days: u32,
    pub num_shifts: u32,
    #[serde(default = "default_days_off")]
    pub num_days_off: u32,
    pub soft_days_off: bool,
    #[serde(default)]
    pub selection: SelectionMode,
    #[serde(default)]
    pub seed: u64,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// The first solution the solver discovered.
    #[default]
    First,
    /// Uniform draw over the discovered solutions, driven by `seed`. The
    /// draw is uniform only over the enumerated prefix of the feasible
    /// space, so it inherits the solver's discovery-order bias.
    Random,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RosterStatus {
    Ok,
    Infeasible,
    InvalidParams,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq)]
pub struct EmployeeRoster {
    pub employee_id: String,
    /// One shift code per day, day ascending, values in `1..=num_shifts`.
    pub shifts: Vec<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct RosterResponse {
    pub status: RosterStatus,
    /// Number of days covered, or `-1` when no roster exists.
    pub week_length: i32,
    pub data: Vec<EmployeeRoster>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub stats: serde_json::Value,
}

/// Display label for the 1-based employee index, e.g. `"Employee 3"`.
pub fn employee_label(employee: u32) -> String {
    format!("Employee {employee}")
}
