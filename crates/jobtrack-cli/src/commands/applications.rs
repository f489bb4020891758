//! Handlers for the `status`, `toggle`, `apply` and `withdraw` commands.
//!
//! # Design
//! - The job listing is the authoritative input; the toggle is seeded from it.
//! - `apply` and `withdraw` skip the remote call when the job is already in the requested state.

use std::rc::Rc;

use anyhow::anyhow;
use jobtrack_api_models::{JobId, JobSummary};
use jobtrack_core::{Activation, ApplyToggle, Settlement, ToggleState};
use tracing::{debug, info};

use crate::auth::ReauthNotice;
use crate::cli::OutputFormat;
use crate::client::{AppContext, CliError, CliResult, classify_problem};
use crate::output::{Action, StatusReport, render_status};
use crate::transport::HttpApplicationClient;

type CliToggle = ApplyToggle<HttpApplicationClient, ReauthNotice>;

/// Desired effect of a toggle command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Intent {
    Toggle,
    Apply,
    Withdraw,
}

impl Intent {
    /// Whether activating the toggle moves towards this intent from `state`.
    const fn wants_activation(self, state: &ToggleState) -> bool {
        match self {
            Self::Toggle => true,
            Self::Apply => !state.is_present(),
            Self::Withdraw => state.is_present(),
        }
    }
}

pub(crate) async fn handle_status(
    ctx: &AppContext,
    job_id: i64,
    format: OutputFormat,
) -> CliResult<()> {
    let (toggle, _) = load_toggle(ctx, JobId(job_id)).await?;
    let report = StatusReport::from_snapshot(&toggle.snapshot(), Action::Inspected);
    render_status(&report, format)
}

pub(crate) async fn handle_toggle(
    ctx: &AppContext,
    job_id: i64,
    intent: Intent,
    format: OutputFormat,
) -> CliResult<()> {
    let report = run_toggle(ctx, JobId(job_id), intent).await?;
    render_status(&report, format)
}

async fn run_toggle(ctx: &AppContext, job_id: JobId, intent: Intent) -> CliResult<StatusReport> {
    let (toggle, notice) = load_toggle(ctx, job_id).await?;
    let before = toggle.snapshot();
    if !intent.wants_activation(&before.state) {
        debug!(%job_id, ?intent, "application already in requested state");
        return Ok(StatusReport::from_snapshot(&before, Action::Unchanged));
    }

    let pending = toggle
        .activate()
        .ok_or_else(|| CliError::failure(anyhow!("toggle for job {job_id} is busy")))?;

    match pending.await {
        Activation::Settled(Settlement::Applied(state)) => {
            let action = if state.is_present() {
                Action::Applied
            } else {
                Action::Withdrew
            };
            info!(%job_id, action = ?action, "toggle applied");
            Ok(StatusReport::from_snapshot(&toggle.snapshot(), action))
        }
        Activation::Settled(settlement) if notice.was_requested() => {
            debug!(%job_id, ?settlement, "toggle requires re-authentication");
            Err(CliError::Reauth {
                login_url: notice.login_url().clone(),
            })
        }
        Activation::Settled(Settlement::Failed(err)) => Err(CliError::failure(anyhow!(
            "{}; application state unchanged",
            err.detail()
        ))),
        Activation::Settled(settlement) => Err(CliError::failure(anyhow!(
            "toggle for job {job_id} did not settle: {settlement:?}"
        ))),
        Activation::Detached => Err(CliError::failure(anyhow!(
            "toggle for job {job_id} was torn down before completing"
        ))),
    }
}

async fn load_toggle(ctx: &AppContext, job_id: JobId) -> CliResult<(CliToggle, Rc<ReauthNotice>)> {
    let job = fetch_job(ctx, job_id).await?;
    let notice = Rc::new(ReauthNotice::new(ctx.login_url.clone()));
    let toggle = ApplyToggle::new(
        job.id,
        job.application(),
        Rc::new(HttpApplicationClient::new(ctx.clone())),
        Rc::clone(&notice),
    );
    Ok((toggle, notice))
}

async fn fetch_job(ctx: &AppContext, job_id: JobId) -> CliResult<JobSummary> {
    let url = ctx.endpoint(&format!("api/jobs/{job_id}"))?;
    let response = ctx
        .authorize(ctx.client.get(url))
        .send()
        .await
        .map_err(|err| CliError::failure(anyhow!("request to api/jobs failed: {err}")))?;

    if !response.status().is_success() {
        return Err(classify_problem(ctx, response).await);
    }

    response
        .json::<JobSummary>()
        .await
        .map_err(|err| CliError::failure(anyhow!("failed to parse job response: {err}")))
}
