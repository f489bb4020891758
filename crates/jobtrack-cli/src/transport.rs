//! HTTP implementation of the application client.

use async_trait::async_trait;
use jobtrack_api_models::{
    ApplicationId, ApplicationRecord, CreateApplicationRequest, JobApplication, JobId,
};
use jobtrack_core::{ApplicationClient, RemoteError, RemoteOperation, RemoteResult};
use tracing::debug;

use crate::client::{AppContext, problem_message};

const APPLICATIONS_PATH: &str = "api/applications";

/// `reqwest`-backed client for the applications endpoints.
#[derive(Clone, Debug)]
pub(crate) struct HttpApplicationClient {
    ctx: AppContext,
}

impl HttpApplicationClient {
    pub(crate) const fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    async fn reject(operation: RemoteOperation, response: reqwest::Response) -> RemoteError {
        let status = response.status().as_u16();
        let detail = problem_message(response).await;
        RemoteError::from_status(operation, status, detail)
    }
}

#[async_trait(?Send)]
impl ApplicationClient for HttpApplicationClient {
    async fn create(&self, job_id: JobId) -> RemoteResult<ApplicationRecord> {
        let operation = RemoteOperation::Create;
        let url = self
            .ctx
            .endpoint(APPLICATIONS_PATH)
            .map_err(|err| RemoteError::transport(operation, err.display_message()))?;
        debug!(%job_id, %url, "creating application");

        let response = self
            .ctx
            .authorize(self.ctx.client.post(url))
            .json(&CreateApplicationRequest { job_id })
            .send()
            .await
            .map_err(|err| RemoteError::transport(operation, err.to_string()))?;

        if !response.status().is_success() {
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
        let url = self
            .ctx
            .endpoint(&format!("{APPLICATIONS_PATH}/{application_id}"))
            .map_err(|err| RemoteError::transport(operation, err.display_message()))?;
        debug!(%application_id, %url, "deleting application");

        let response = self
            .ctx
            .authorize(self.ctx.client.delete(url))
            .send()
            .await
            .map_err(|err| RemoteError::transport(operation, err.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::reject(operation, response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::context_with;
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use jobtrack_test_support::fixtures::job_application_json;
    use serde_json::json;

    #[tokio::test]
    async fn create_posts_job_id_with_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/applications")
                .header("authorization", "Bearer secret")
                .header("x-request-id", "trace-test")
                .json_body(json!({"job_id": 7}));
            then.status(201).json_body(job_application_json(42, 7));
        });

        let client = HttpApplicationClient::new(context_with(&server, Some("secret")));
        let record = client.create(JobId(7)).await.expect("create should succeed");

        mock.assert();
        assert_eq!(record.id, ApplicationId(42));
        assert_eq!(record.job_id, JobId(7));
    }

    #[tokio::test]
    async fn create_maps_unauthorized_to_authorization_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/applications");
            then.status(401).json_body(json!({"detail": "Unauthorized"}));
        });

        let client = HttpApplicationClient::new(context_with(&server, None));
        let err = client.create(JobId(7)).await.expect_err("401 should fail");
        assert_eq!(
            err,
            RemoteError::Unauthorized {
                operation: RemoteOperation::Create
            }
        );
    }

    #[tokio::test]
    async fn create_maps_server_error_to_transport_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/applications");
            then.status(500).json_body(json!({"message": "database unavailable"}));
        });

        let client = HttpApplicationClient::new(context_with(&server, Some("t")));
        let err = client.create(JobId(7)).await.expect_err("500 should fail");
        assert_eq!(
            err,
            RemoteError::Transport {
                operation: RemoteOperation::Create,
                status: Some(500),
                detail: "database unavailable".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn create_rejects_malformed_body() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/applications");
            then.status(201).body("not json");
        });

        let client = HttpApplicationClient::new(context_with(&server, Some("t")));
        let err = client.create(JobId(7)).await.expect_err("bad body should fail");
        assert!(!err.is_authorization());
        assert!(err.detail().contains("invalid response"));
    }

    #[tokio::test]
    async fn requests_keep_api_url_path_prefix() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST).path("/jobtrack/api/applications");
            then.status(201).json_body(job_application_json(42, 7));
        });
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/jobtrack/api/applications/42");
            then.status(204);
        });

        let ctx = AppContext::new(
            server.url("/jobtrack").parse().expect("mock server URL"),
            Some("t".to_string()),
            "/login",
            std::time::Duration::from_secs(5),
            "trace-test",
        )
        .expect("context should build");
        let client = HttpApplicationClient::new(ctx);
        let record = client.create(JobId(7)).await.expect("create should succeed");
        client.delete(record.id).await.expect("delete should succeed");

        create.assert();
        delete.assert();
    }

    #[tokio::test]
    async fn delete_targets_application_id() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE)
                .path("/api/applications/42")
                .header("authorization", "Bearer t");
            then.status(204);
        });

        let client = HttpApplicationClient::new(context_with(&server, Some("t")));
        client
            .delete(ApplicationId(42))
            .await
            .expect("delete should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn delete_maps_unauthorized_and_not_found() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/api/applications/1");
            then.status(401);
        });
        server.mock(|when, then| {
            when.method(DELETE).path("/api/applications/2");
            then.status(404).json_body(json!({"message": "no such application"}));
        });

        let client = HttpApplicationClient::new(context_with(&server, Some("t")));
        assert!(
            client
                .delete(ApplicationId(1))
                .await
                .expect_err("401")
                .is_authorization()
        );
        let missing = client.delete(ApplicationId(2)).await.expect_err("404");
        assert!(!missing.is_authorization());
        assert_eq!(missing.operation(), RemoteOperation::Delete);
    }
}
