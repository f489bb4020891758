#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Jobtrack job-application API.
//!
//! These types are used by both the browser client and the CLI so the wire
//! contract for `/api/applications` and `/api/jobs` lives in one place.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-assigned identifier of a job posting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct JobId(pub i64);

impl Display for JobId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Server-assigned identifier of a job application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ApplicationId(pub i64);

impl Display for ApplicationId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Error body returned by the API on rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorMessage {
    /// Human-readable failure description.
    pub message: String,
}

/// Extract a readable failure description from an error response body.
///
/// Prefers the API's `message` field, then a `detail` field, then the raw text.
#[must_use]
pub fn problem_detail(body: &str, status: u16) -> String {
    if let Ok(error) = serde_json::from_str::<ErrorMessage>(body) {
        return error.message;
    }
    if let Some(detail) = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").and_then(Value::as_str).map(str::to_string))
    {
        return detail;
    }
    let text = body.trim();
    if text.is_empty() {
        format!("request failed with status {status}")
    } else {
        text.to_string()
    }
}

/// Request body for `POST /api/applications`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateApplicationRequest {
    /// Job the current user is applying to.
    pub job_id: JobId,
}

/// Job listing entry as served by `/api/jobs`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobSummary {
    /// Job identifier.
    pub id: JobId,
    /// Posting title.
    pub title: String,
    /// Hiring company, when scraped.
    #[serde(default)]
    pub company: Option<String>,
    /// Location label.
    #[serde(default)]
    pub location: Option<String>,
    /// Remote / hybrid / office.
    #[serde(default)]
    pub operating_mode: Option<String>,
    /// Raw salary text.
    #[serde(default)]
    pub salary: Option<String>,
    /// Seniority label.
    #[serde(default)]
    pub experience: Option<String>,
    /// Skill name to level mapping.
    #[serde(default)]
    pub skills: BTreeMap<String, Value>,
    /// Link to the original posting.
    pub url: String,
    /// When the posting was scraped.
    pub scraped_date: DateTime<Utc>,
    /// Generated summary text.
    #[serde(default)]
    pub summary: Option<String>,
    /// Source board.
    #[serde(default)]
    pub source: Option<String>,
    /// Whether the current user has an application for this job.
    #[serde(default)]
    pub has_applied: bool,
    /// Identifier of that application, if any.
    #[serde(default)]
    pub application_id: Option<ApplicationId>,
}

impl JobSummary {
    /// Authoritative application state carried by this listing entry.
    ///
    /// Returns a record only when the server reports both `has_applied` and an
    /// `application_id`; any other combination reads as "not applied".
    #[must_use]
    pub const fn application(&self) -> Option<ApplicationRecord> {
        match (self.has_applied, self.application_id) {
            (true, Some(id)) => Some(ApplicationRecord {
                id,
                job_id: self.id,
                applied_date: None,
                status: None,
            }),
            _ => None,
        }
    }
}

/// Free-form note attached to an application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplicationNote {
    /// Note identifier, absent before the note is stored.
    #[serde(default)]
    pub id: Option<i64>,
    /// Note body.
    pub content: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last edit timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Full application payload returned when an application is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobApplication {
    /// Application identifier.
    pub id: ApplicationId,
    /// Job the application concerns.
    pub job: JobSummary,
    /// When the application was recorded.
    pub applied_date: DateTime<Utc>,
    /// Workflow status label.
    pub status: String,
    /// Notes attached to the application.
    #[serde(default)]
    pub notes: Vec<ApplicationNote>,
}

/// Existence of an application for a job, as held by UI controls.
///
/// `applied_date` and `status` are server metadata carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplicationRecord {
    /// Application identifier.
    pub id: ApplicationId,
    /// Job the application concerns.
    pub job_id: JobId,
    /// When the application was recorded, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<DateTime<Utc>>,
    /// Workflow status label, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ApplicationRecord {
    /// Record carrying only the identifiers.
    #[must_use]
    pub const fn new(id: ApplicationId, job_id: JobId) -> Self {
        Self {
            id,
            job_id,
            applied_date: None,
            status: None,
        }
    }
}

impl From<JobApplication> for ApplicationRecord {
    fn from(value: JobApplication) -> Self {
        Self {
            id: value.id,
            job_id: value.job.id,
            applied_date: Some(value.applied_date),
            status: Some(value.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn problem_detail_prefers_message_then_detail_then_text() {
        assert_eq!(problem_detail(r#"{"message":"closed"}"#, 400), "closed");
        assert_eq!(
            problem_detail(r#"{"detail":"Unauthorized"}"#, 401),
            "Unauthorized"
        );
        assert_eq!(problem_detail(" gateway down ", 502), "gateway down");
        assert_eq!(problem_detail("", 503), "request failed with status 503");
    }

    fn job_json(has_applied: bool, application_id: Option<i64>) -> Value {
        json!({
            "id": 42,
            "title": "Rust Engineer",
            "company": "Acme",
            "location": "Warszawa",
            "operating_mode": "remote",
            "salary": null,
            "experience": "mid",
            "skills": {"rust": 4, "sql": 2},
            "url": "https://jobs.example/42",
            "scraped_date": "2025-03-01T08:30:00Z",
            "summary": null,
            "source": "nofluff",
            "has_applied": has_applied,
            "application_id": application_id
        })
    }

    #[test]
    fn job_summary_reports_application_when_applied() -> Result<(), serde_json::Error> {
        let job: JobSummary = serde_json::from_value(job_json(true, Some(7)))?;
        assert_eq!(
            job.application(),
            Some(ApplicationRecord::new(ApplicationId(7), JobId(42)))
        );
        Ok(())
    }

    #[test]
    fn job_summary_without_application_id_reads_as_absent() -> Result<(), serde_json::Error> {
        let dangling: JobSummary = serde_json::from_value(job_json(true, None))?;
        assert_eq!(dangling.application(), None);
        let not_applied: JobSummary = serde_json::from_value(job_json(false, Some(7)))?;
        assert_eq!(not_applied.application(), None);
        Ok(())
    }

    #[test]
    fn job_summary_defaults_missing_application_fields() -> Result<(), serde_json::Error> {
        let mut value = job_json(false, None);
        if let Some(map) = value.as_object_mut() {
            map.remove("has_applied");
            map.remove("application_id");
        }
        let job: JobSummary = serde_json::from_value(value)?;
        assert!(!job.has_applied);
        assert!(job.application_id.is_none());
        Ok(())
    }

    #[test]
    fn job_application_converts_into_record_with_metadata() -> Result<(), serde_json::Error> {
        let payload = json!({
            "id": 9,
            "job": job_json(true, Some(9)),
            "applied_date": "2025-03-02T10:00:00Z",
            "status": "applied",
            "notes": [{"content": "sent CV"}]
        });
        let application: JobApplication = serde_json::from_value(payload)?;
        assert_eq!(application.notes.len(), 1);
        let record = ApplicationRecord::from(application);
        assert_eq!(record.id, ApplicationId(9));
        assert_eq!(record.job_id, JobId(42));
        assert_eq!(record.status.as_deref(), Some("applied"));
        assert!(record.applied_date.is_some());
        Ok(())
    }

    #[test]
    fn create_request_serializes_job_id_as_integer() -> Result<(), serde_json::Error> {
        let body = serde_json::to_value(CreateApplicationRequest { job_id: JobId(42) })?;
        assert_eq!(body, json!({"job_id": 42}));
        Ok(())
    }
}
