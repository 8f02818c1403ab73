//! Leave applications.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Result;
use crate::error::InvalidInputError;

use super::require;

/// Review state of a leave application.
///
/// The server stores status as free text. Values outside the three it
/// writes itself are kept verbatim in [`LeaveStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Other(String),
}

impl LeaveStatus {
    pub fn as_str(&self) -> &str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Other(raw) => raw,
        }
    }

    /// True once the application has been approved or rejected.
    pub fn is_final(&self) -> bool {
        matches!(self, LeaveStatus::Approved | LeaveStatus::Rejected)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// The server writes "pending" on create but "Approved"/"Rejected" on review.
impl FromStr for LeaveStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "pending" => LeaveStatus::Pending,
            "approved" => LeaveStatus::Approved,
            "rejected" => LeaveStatus::Rejected,
            _ => LeaveStatus::Other(s.to_string()),
        })
    }
}

impl Serialize for LeaveStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LeaveStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A leave application as listed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    pub id: u64,
    pub username: String,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    #[serde(default)]
    pub status: LeaveStatus,
}

impl LeaveApplication {
    /// Number of calendar days covered, both ends inclusive.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Body for submitting a leave application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLeaveApplication {
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

impl NewLeaveApplication {
    pub fn validate(&self) -> Result<()> {
        require("leave_type", &self.leave_type)?;
        require("reason", &self.reason)?;
        if self.end_date < self.start_date {
            return Err(InvalidInputError::field(
                "end_date",
                format!("{} is before start date {}", self.end_date, self.start_date),
            )
            .into());
        }
        Ok(())
    }
}

/// Body returned by the approve and reject actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub status: LeaveStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn status_parses_any_case() {
        assert_eq!("Approved".parse::<LeaveStatus>().unwrap(), LeaveStatus::Approved);
        assert_eq!("REJECTED".parse::<LeaveStatus>().unwrap(), LeaveStatus::Rejected);
        assert_eq!(
            "Cancelled".parse::<LeaveStatus>().unwrap(),
            LeaveStatus::Other("Cancelled".into())
        );
    }

    #[test]
    fn listing_with_unknown_status_still_decodes() {
        let raw = json!([
            {
                "id": 1, "username": "ann", "leave_type": "Annual",
                "start_date": "2024-01-02", "end_date": "2024-01-02",
                "reason": "errand", "status": "pending"
            },
            {
                "id": 2, "username": "ben", "leave_type": "Annual",
                "start_date": "2024-01-03", "end_date": "2024-01-04",
                "reason": "move", "status": "cancelled"
            }
        ]);
        let leaves: Vec<LeaveApplication> = serde_json::from_value(raw).unwrap();

        assert_eq!(leaves[0].status, LeaveStatus::Pending);
        assert_eq!(leaves[1].status, LeaveStatus::Other("cancelled".into()));
        assert!(!leaves[1].status.is_final());
        assert_eq!(serde_json::to_value(&leaves[1].status).unwrap(), "cancelled");
    }

    #[test]
    fn decodes_server_listing() {
        let raw = json!({
            "id": 7,
            "username": "bob",
            "leave_type": "Sick",
            "start_date": "2024-03-04",
            "end_date": "2024-03-06",
            "reason": "flu",
            "status": "Approved"
        });
        let leave: LeaveApplication = serde_json::from_value(raw).unwrap();
        assert_eq!(leave.status, LeaveStatus::Approved);
        assert!(leave.status.is_final());
        assert_eq!(leave.days(), 3);
    }

    #[test]
    fn new_application_rejects_inverted_dates() {
        let app = NewLeaveApplication {
            leave_type: "Annual".into(),
            start_date: date("2024-05-10"),
            end_date: date("2024-05-09"),
            reason: "trip".into(),
        };
        let err = app.validate().unwrap_err();
        assert!(err.to_string().contains("end_date"));
    }

    #[test]
    fn new_application_rejects_blank_reason() {
        let app = NewLeaveApplication {
            leave_type: "Annual".into(),
            start_date: date("2024-05-10"),
            end_date: date("2024-05-10"),
            reason: "  ".into(),
        };
        assert!(app.validate().is_err());
    }

    #[test]
    fn new_application_serializes_iso_dates() {
        let app = NewLeaveApplication {
            leave_type: "Annual".into(),
            start_date: date("2024-05-10"),
            end_date: date("2024-05-12"),
            reason: "trip".into(),
        };
        app.validate().unwrap();
        let body = serde_json::to_value(&app).unwrap();
        assert_eq!(body["start_date"], "2024-05-10");
    }
}
