use thiserror::Error;
use types::RosterRequest;

pub const MAX_EMPLOYEES: u32 = 30;
pub const MAX_DAYS: u32 = 7;
pub const MAX_SHIFTS: u32 = 10;
pub const MAX_DAYS_OFF: u32 = 4;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid roster parameters: {0}")]
    Msg(String),
}

/// Validated roster dimensions. A value of this type can only be obtained
/// through [`Problem::new`], so downstream code may rely on every field
/// being inside the documented ranges.
#[derive(Clone, Copy, Debug)]
pub struct Problem {
    employees: u32,
    days: u32,
    shifts: u32,
    days_off_target: u32,
    days_off_is_soft: bool,
}

impl Problem {
    pub fn new(
        employees: u32,
        days: u32,
        shifts: u32,
        days_off_target: u32,
        days_off_is_soft: bool,
    ) -> Result<Self, ValidationError> {
        let mut errors: Vec<String> = Vec::new();

        if employees == 0 || employees > MAX_EMPLOYEES {
            errors.push(format!(
                "num_employees must be in 1..={MAX_EMPLOYEES}, got {employees}"
            ));
        }
        if days == 0 || days > MAX_DAYS {
            errors.push(format!("num_days must be in 1..={MAX_DAYS}, got {days}"));
        }
        if shifts == 0 || shifts > MAX_SHIFTS {
            errors.push(format!(
                "num_shifts must be in 1..={MAX_SHIFTS}, got {shifts}"
            ));
        }
        if days_off_target > MAX_DAYS_OFF {
            errors.push(format!(
                "num_days_off must be in 0..={MAX_DAYS_OFF}, got {days_off_target}"
            ));
        }
        if days_off_target > days {
            errors.push(format!(
                "num_days_off ({days_off_target}) exceeds num_days ({days})"
            ));
        }

        if errors.is_empty() {
            Ok(Self {
                employees,
                days,
                shifts,
                days_off_target,
                days_off_is_soft,
            })
        } else {
            Err(ValidationError::Msg(errors.join("; ")))
        }
    }

    pub fn from_request(request: &RosterRequest) -> Result<Self, ValidationError> {
        Self::new(
            request.num_employees,
            request.num_days,
            request.num_shifts,
            request.num_days_off,
            request.soft_days_off,
        )
    }

    pub fn employees(&self) -> u32 {
        self.employees
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn shifts(&self) -> u32 {
        self.shifts
    }

    pub fn days_off_target(&self) -> u32 {
        self.days_off_target
    }

    pub fn days_off_is_soft(&self) -> bool {
        self.days_off_is_soft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_in_range_parameters() {
        let problem = Problem::new(2, 7, 3, 2, false).unwrap();
        assert_eq!(problem.employees(), 2);
        assert_eq!(problem.days(), 7);
        assert_eq!(problem.shifts(), 3);
        assert_eq!(problem.days_off_target(), 2);
        assert!(!problem.days_off_is_soft());
    }

    #[test]
    fn zero_days_off_is_valid() {
        assert!(Problem::new(1, 3, 2, 0, false).is_ok());
    }

    #[test]
    fn rejects_zero_employees() {
        let ValidationError::Msg(msg) = Problem::new(0, 7, 3, 2, false).unwrap_err();
        assert!(msg.contains("num_employees"));
    }

    #[test]
    fn rejects_out_of_range_counts() {
        assert!(Problem::new(31, 7, 3, 2, false).is_err());
        assert!(Problem::new(2, 8, 3, 2, false).is_err());
        assert!(Problem::new(2, 7, 11, 2, false).is_err());
    }

    #[test]
    fn rejects_days_off_target_beyond_cap_and_days() {
        // 5 breaks both the 0..=4 range and the per-week bound; every
        // violation is reported, not just the first.
        let ValidationError::Msg(msg) = Problem::new(2, 3, 3, 5, false).unwrap_err();
        assert!(msg.contains("num_days_off must be in 0..=4"));
        assert!(msg.contains("exceeds num_days"));
    }

    #[test]
    fn rejects_days_off_target_exceeding_days() {
        let ValidationError::Msg(msg) = Problem::new(2, 2, 3, 3, false).unwrap_err();
        assert!(msg.contains("exceeds num_days"));
    }

    #[test]
    fn from_request_carries_every_field() {
        let request = RosterRequest {
            num_employees: 4,
            num_days: 5,
            num_shifts: 3,
            num_days_off: 1,
            soft_days_off: true,
            selection: types::SelectionMode::First,
            seed: 0,
        };
        let problem = Problem::from_request(&request).unwrap();
        assert_eq!(problem.employees(), 4);
        assert_eq!(problem.days(), 5);
        assert!(problem.days_off_is_soft());
    }
}
