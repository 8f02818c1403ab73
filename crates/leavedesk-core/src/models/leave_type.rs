//! Leave type configuration.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::InvalidInputError;

use super::require;

/// A configured kind of leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveType {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub max_days: u32,
}

/// Body for creating or updating a leave type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTypeInput {
    pub name: String,
    pub description: String,
    pub max_days: u32,
}

impl LeaveTypeInput {
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        if self.max_days == 0 {
            return Err(InvalidInputError::field("max_days", "must be at least 1").into());
        }
        Ok(())
    }
}

impl From<&LeaveType> for LeaveTypeInput {
    fn from(leave_type: &LeaveType) -> Self {
        Self {
            name: leave_type.name.clone(),
            description: leave_type.description.clone(),
            max_days: leave_type.max_days,
        }
    }
}
