//! Output rendering helpers for CLI commands.

use anyhow::anyhow;
use jobtrack_api_models::{ApplicationId, JobId};
use jobtrack_core::ToggleSnapshot;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// What a command did to the application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Action {
    Inspected,
    Applied,
    Withdrew,
    Unchanged,
}

impl Action {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Inspected => "inspected",
            Self::Applied => "applied",
            Self::Withdrew => "withdrew",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Result of a command, rendered as text or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct StatusReport {
    pub(crate) job_id: JobId,
    pub(crate) applied: bool,
    pub(crate) application_id: Option<ApplicationId>,
    pub(crate) action: Action,
}

impl StatusReport {
    pub(crate) fn from_snapshot(snapshot: &ToggleSnapshot, action: Action) -> Self {
        Self {
            job_id: snapshot.job_id,
            applied: snapshot.state.is_present(),
            application_id: snapshot.state.application().map(|record| record.id),
            action,
        }
    }
}

pub(crate) fn render_status(report: &StatusReport, format: OutputFormat) -> CliResult<()> {
    println!("{}", format_status(report, format)?);
    Ok(())
}

fn format_status(report: &StatusReport, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}"))),
        OutputFormat::Text => {
            let state = match report.application_id {
                Some(id) if report.applied => format!("applied (application {id})"),
                _ => "not applied".to_string(),
            };
            Ok(format!(
                "job {}: {state} [{}]",
                report.job_id,
                report.action.as_str()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobtrack_core::ToggleState;
    use jobtrack_test_support::fixtures::bare_application;
    use serde_json::{Value, json};

    fn snapshot(application: Option<i64>) -> ToggleSnapshot {
        ToggleSnapshot {
            job_id: JobId(9),
            state: ToggleState::from_option(application.map(|id| bare_application(id, 9))),
            busy: false,
        }
    }

    #[test]
    fn text_output_describes_state_and_action() {
        let applied = StatusReport::from_snapshot(&snapshot(Some(3)), Action::Applied);
        assert_eq!(
            format_status(&applied, OutputFormat::Text).expect("text"),
            "job 9: applied (application 3) [applied]"
        );
        let absent = StatusReport::from_snapshot(&snapshot(None), Action::Unchanged);
        assert_eq!(
            format_status(&absent, OutputFormat::Text).expect("text"),
            "job 9: not applied [unchanged]"
        );
    }

    #[test]
    fn json_output_is_machine_readable() {
        let report = StatusReport::from_snapshot(&snapshot(Some(3)), Action::Inspected);
        let text = format_status(&report, OutputFormat::Json).expect("json");
        let value: Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(
            value,
            json!({"job_id": 9, "applied": true, "application_id": 3, "action": "inspected"})
        );
    }
}
