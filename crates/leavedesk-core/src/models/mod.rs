//! Leave-management resources served by the API.

mod employee;
mod leave;
mod leave_type;

pub use employee::{NewEmployee, Profile, Role, User};
pub use leave::{LeaveApplication, LeaveStatus, NewLeaveApplication, ReviewOutcome};
pub use leave_type::{LeaveType, LeaveTypeInput};

use crate::Result;
use crate::error::InvalidInputError;

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InvalidInputError::field(field, "must not be empty").into());
    }
    Ok(())
}
