//! HTTP client helpers (REST).

use async_trait::async_trait;
use gloo::storage::{LocalStorage, Storage};
use gloo_net::http::{Request, Response};
use jobtrack_api_models::{
    ApplicationId, ApplicationRecord, CreateApplicationRequest, JobApplication, JobId,
    problem_detail,
};
use jobtrack_core::{ApplicationClient, RemoteError, RemoteOperation, RemoteResult};

use crate::core::auth::{AuthState, TOKEN_STORAGE_KEY};

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_state() -> AuthState {
        AuthState::from_stored(LocalStorage::raw().get_item(TOKEN_STORAGE_KEY).ok().flatten())
    }

    fn authorize(req: Request) -> Request {
        match Self::auth_state().authorization_header() {
            Some(value) => req.header("Authorization", &value),
            None => req,
        }
    }

    async fn reject(operation: RemoteOperation, response: Response) -> RemoteError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        RemoteError::from_status(operation, status, problem_detail(&body, status))
    }
}

#[async_trait(?Send)]
impl ApplicationClient for ApiClient {
    async fn create(&self, job_id: JobId) -> RemoteResult<ApplicationRecord> {
        let operation = RemoteOperation::Create;
        let request = Self::authorize(Request::post(&self.url("/api/applications")))
            .json(&CreateApplicationRequest { job_id })
            .map_err(|err| RemoteError::transport(operation, err.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|err| RemoteError::transport(operation, err.to_string()))?;
        if !response.ok() {
            return Err(Self::reject(operation, response).await);
        }
        let created = response
            .json::<JobApplication>()
            .await
            .map_err(|err| RemoteError::transport(operation, format!("invalid response: {err}")))?;
        Ok(ApplicationRecord::from(created))
    }

    async fn delete(&self, application_id: ApplicationId) -> RemoteResult<()> {
        let operation = RemoteOperation::Delete;
        let response = Self::authorize(Request::delete(
            &self.url(&format!("/api/applications/{application_id}")),
        ))
        .send()
        .await
        .map_err(|err| RemoteError::transport(operation, err.to_string()))?;
        if response.ok() {
            Ok(())
        } else {
            Err(Self::reject(operation, response).await)
        }
    }
}
