//! Record builders and canned API payloads.

use chrono::{TimeZone, Utc};
use jobtrack_api_models::{ApplicationId, ApplicationRecord, JobId};
use serde_json::{Value, json};

/// Application record with server metadata, as returned by a create call.
#[must_use]
pub fn application(id: i64, job_id: i64) -> ApplicationRecord {
    ApplicationRecord {
        id: ApplicationId(id),
        job_id: JobId(job_id),
        applied_date: Utc.with_ymd_and_hms(2025, 3, 2, 10, 0, 0).single(),
        status: Some("applied".to_string()),
    }
}

/// Application record carrying identifiers only, as derived from a job listing.
#[must_use]
pub fn bare_application(id: i64, job_id: i64) -> ApplicationRecord {
    ApplicationRecord::new(ApplicationId(id), JobId(job_id))
}

/// `JobSummary` JSON for `job_id`, optionally reporting an application.
#[must_use]
pub fn job_json(job_id: i64, application_id: Option<i64>) -> Value {
    json!({
        "id": job_id,
        "title": "Rust Engineer",
        "company": "Acme",
        "location": "Kraków",
        "operating_mode": "hybrid",
        "salary": "25 000 PLN",
        "experience": "senior",
        "skills": {"rust": 5},
        "url": format!("https://jobs.example/{job_id}"),
        "scraped_date": "2025-03-01T08:30:00Z",
        "summary": null,
        "source": "justjoin",
        "has_applied": application_id.is_some(),
        "application_id": application_id
    })
}

/// `JobApplication` JSON as returned by `POST /api/applications`.
#[must_use]
pub fn job_application_json(application_id: i64, job_id: i64) -> Value {
    json!({
        "id": application_id,
        "job": job_json(job_id, Some(application_id)),
        "applied_date": "2025-03-02T10:00:00Z",
        "status": "applied",
        "notes": []
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_fixture_carries_metadata() {
        let record = application(1, 42);
        assert!(record.applied_date.is_some());
        assert_eq!(record.status.as_deref(), Some("applied"));
        assert_eq!(bare_application(1, 42).status, None);
    }

    #[test]
    fn job_json_flags_application() {
        assert_eq!(job_json(42, Some(3))["has_applied"], json!(true));
        assert_eq!(job_json(42, None)["has_applied"], json!(false));
    }
}
