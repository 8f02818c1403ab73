//! Resource paths served by the LeaveDesk API.

/// GET the current user's profile.
pub const PROFILE: &str = "/api/profile/";

/// GET to list, POST to submit leave applications.
pub const LEAVE_APPLICATIONS: &str = "/api/leave/";

/// GET to list, POST to create leave types.
pub const LEAVE_TYPES: &str = "/api/leave-types/";

/// POST to provision an employee account.
pub const EMPLOYEES: &str = "/api/employees/";

/// Review action on a single leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Review {
    Approve,
    Reject,
}

impl Review {
    fn as_str(&self) -> &'static str {
        match self {
            Review::Approve => "approve",
            Review::Reject => "reject",
        }
    }
}

pub fn leave_review(id: u64, review: Review) -> String {
    format!("{}{}/{}/", LEAVE_APPLICATIONS, id, review.as_str())
}

pub fn leave_type(id: u64) -> String {
    format!("{}{}/", LEAVE_TYPES, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_paths_keep_trailing_slash() {
        assert_eq!(leave_review(5, Review::Approve), "/api/leave/5/approve/");
        assert_eq!(leave_review(5, Review::Reject), "/api/leave/5/reject/");
        assert_eq!(leave_type(9), "/api/leave-types/9/");
    }
}
