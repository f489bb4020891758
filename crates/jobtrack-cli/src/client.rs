//! Shared HTTP context and error types for the CLI.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use jobtrack_api_models::problem_detail;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

/// CLI-level error type mapping failures onto exit codes.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
    Reauth { login_url: Url },
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
            Self::Reauth { .. } => 4,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
            Self::Reauth { login_url } => {
                format!("session expired or missing; sign in at {login_url} and retry")
            }
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Application context passed to command handlers.
#[derive(Clone, Debug)]
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) token: Option<String>,
    pub(crate) login_url: Url,
}

impl AppContext {
    /// Build the HTTP client and resolve endpoints from CLI settings.
    pub(crate) fn new(
        mut base_url: Url,
        token: Option<String>,
        login_path: &str,
        timeout: Duration,
        trace_id: &str,
    ) -> CliResult<Self> {
        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(trace_id).map_err(|_| {
            CliError::failure(anyhow!("trace identifier contains invalid characters"))
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;

        if !base_url.path().ends_with('/') {
            let prefixed = format!("{}/", base_url.path());
            base_url.set_path(&prefixed);
        }

        let login_url = base_url
            .join(login_path)
            .map_err(|err| CliError::validation(format!("invalid login path '{login_path}': {err}")))?;

        Ok(Self {
            client,
            base_url,
            token: parse_token(token)?,
            login_url,
        })
    }

    /// Resolve a relative API path (`api/...`) against the base URL, keeping any path prefix.
    pub(crate) fn endpoint(&self, path: &str) -> CliResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| CliError::failure(anyhow!("invalid base URL: {err}")))
    }

    /// Attach the bearer token when one is configured.
    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Parse the API URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Normalise the bearer token provided to the CLI.
pub(crate) fn parse_token(input: Option<String>) -> CliResult<Option<String>> {
    let Some(raw) = input else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::validation("token cannot be an empty string"));
    }
    Ok(Some(trimmed.to_string()))
}

/// Extract a readable message from an error response body.
pub(crate) async fn problem_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    problem_detail(&body, status.as_u16())
}

/// Classify a failed non-toggle request (e.g. reading a job) into a CLI error.
pub(crate) async fn classify_problem(ctx: &AppContext, response: Response) -> CliError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return CliError::Reauth {
            login_url: ctx.login_url.clone(),
        };
    }
    let message = problem_message(response).await;
    if matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY
    ) {
        CliError::validation(message)
    } else {
        CliError::failure(anyhow!("{message} (status {status})"))
    }
}
