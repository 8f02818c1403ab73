//! Typed leave-management endpoints.
//!
//! Thin wrappers over [`SessionClient::fetch_with_auth`]; each inherits the
//! refresh-and-retry behavior. Form inputs are validated before anything is
//! sent.

use tracing::instrument;

use leavedesk_core::models::{
    LeaveApplication, LeaveType, LeaveTypeInput, NewEmployee, NewLeaveApplication, Profile,
    ReviewOutcome,
};
use leavedesk_core::{ApiRequest, AuthApi, Result, SessionStore};

use crate::api::endpoints::{self, Review};
use crate::session::SessionClient;

impl<A: AuthApi, S: SessionStore> SessionClient<A, S> {
    /// The logged-in user's profile, including their role.
    pub async fn profile(&self) -> Result<Profile> {
        self.fetch_with_auth(&ApiRequest::get(endpoints::PROFILE))
            .await
    }

    /// Leave applications visible to the current user.
    ///
    /// Staff accounts see every application; others see their own.
    pub async fn leave_applications(&self) -> Result<Vec<LeaveApplication>> {
        self.fetch_with_auth(&ApiRequest::get(endpoints::LEAVE_APPLICATIONS))
            .await
    }

    #[instrument(skip(self, application), fields(leave_type = %application.leave_type))]
    pub async fn apply_for_leave(
        &self,
        application: &NewLeaveApplication,
    ) -> Result<LeaveApplication> {
        application.validate()?;
        let request = ApiRequest::post(endpoints::LEAVE_APPLICATIONS).with_json(application)?;
        self.fetch_with_auth(&request).await
    }

    #[instrument(skip(self))]
    pub async fn approve_leave(&self, id: u64) -> Result<ReviewOutcome> {
        self.review_leave(id, Review::Approve).await
    }

    #[instrument(skip(self))]
    pub async fn reject_leave(&self, id: u64) -> Result<ReviewOutcome> {
        self.review_leave(id, Review::Reject).await
    }

    async fn review_leave(&self, id: u64, review: Review) -> Result<ReviewOutcome> {
        let request = ApiRequest::post(endpoints::leave_review(id, review));
        self.fetch_with_auth(&request).await
    }

    pub async fn leave_types(&self) -> Result<Vec<LeaveType>> {
        self.fetch_with_auth(&ApiRequest::get(endpoints::LEAVE_TYPES))
            .await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_leave_type(&self, input: &LeaveTypeInput) -> Result<LeaveType> {
        input.validate()?;
        let request = ApiRequest::post(endpoints::LEAVE_TYPES).with_json(input)?;
        self.fetch_with_auth(&request).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update_leave_type(&self, id: u64, input: &LeaveTypeInput) -> Result<LeaveType> {
        input.validate()?;
        let request = ApiRequest::put(endpoints::leave_type(id)).with_json(input)?;
        self.fetch_with_auth(&request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_leave_type(&self, id: u64) -> Result<()> {
        self.fetch_with_auth(&ApiRequest::delete(endpoints::leave_type(id)))
            .await
    }

    /// Provision an employee account. Returns the server's reply as-is.
    #[instrument(skip(self, employee), fields(email = %employee.email))]
    pub async fn add_employee(&self, employee: &NewEmployee) -> Result<serde_json::Value> {
        employee.validate()?;
        let request = ApiRequest::post(endpoints::EMPLOYEES).with_json(employee)?;
        self.fetch_with_auth(&request).await
    }
}
