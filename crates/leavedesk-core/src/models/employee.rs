//! Employees and user profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::InvalidInputError;

use super::require;

/// Role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Account identity as embedded in a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// The logged-in user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user: User,
    pub role: Role,
}

/// Body for provisioning a new employee account.
#[derive(Clone, Serialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

impl NewEmployee {
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("password", &self.password)?;
        if !self.email.contains('@') {
            return Err(InvalidInputError::field("email", "must contain '@'").into());
        }
        Ok(())
    }
}

impl fmt::Debug for NewEmployee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewEmployee")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
