//! Collaborators the toggle talks to.
//!
//! # Design
//! - Transports implement [`ApplicationClient`]; the toggle never sees HTTP.
//! - Re-authentication is an injected capability so the controller stays free of
//!   navigation and process concerns.
//! - Futures are `?Send`: the toggle runs on a single logical thread (browser event
//!   loop or a current-thread runtime).

use async_trait::async_trait;
use jobtrack_api_models::{ApplicationId, ApplicationRecord, JobId};

use crate::error::RemoteResult;

/// Remote create/delete contract for job applications.
#[async_trait(?Send)]
pub trait ApplicationClient {
    /// Create an application for `job_id` on behalf of the current user.
    async fn create(&self, job_id: JobId) -> RemoteResult<ApplicationRecord>;
    /// Delete the application identified by `application_id`.
    async fn delete(&self, application_id: ApplicationId) -> RemoteResult<()>;
}

/// Reacts to an authorization failure, typically by sending the user to log in.
pub trait AuthFailureHandler {
    /// Invoked once per settled authorization failure. Not awaited.
    fn on_auth_failure(&self);
}
