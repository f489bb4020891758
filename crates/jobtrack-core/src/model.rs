//! Toggle state and the values exchanged with hosts.

use jobtrack_api_models::{ApplicationRecord, JobId};
use serde::Serialize;

/// Remote operation issued by the toggle.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RemoteOperation {
    /// Create an application for the target job.
    Create,
    /// Delete an existing application.
    Delete,
}

impl RemoteOperation {
    /// Stable lowercase label for logs and output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }
}

/// Whether an application is believed to exist for the target job.
///
/// Transitions always replace the whole value; a record is never edited in place.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(tag = "state", content = "application", rename_all = "snake_case")]
pub enum ToggleState {
    /// No application is known to exist.
    #[default]
    Absent,
    /// The remote service stored this application.
    Present(ApplicationRecord),
}

impl ToggleState {
    /// Map an optional record onto the toggle state.
    #[must_use]
    pub fn from_option(application: Option<ApplicationRecord>) -> Self {
        application.map_or(Self::Absent, Self::Present)
    }

    /// Record held while present.
    #[must_use]
    pub const fn application(&self) -> Option<&ApplicationRecord> {
        match self {
            Self::Present(record) => Some(record),
            Self::Absent => None,
        }
    }

    /// Whether an application is held.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Coarse phase of the toggle state machine.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Idle with no application.
    IdleAbsent,
    /// Idle holding an application.
    IdlePresent,
    /// A remote operation is in flight.
    Busy,
}

/// Host-supplied authoritative snapshot for a job.
///
/// `revision` stands in for the identity of the host's value: hosts bump it on
/// every authoritative read so that a re-read reconciles even when the
/// application value is unchanged. A changed application value reconciles
/// regardless of the revision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthoritativeInput {
    /// Monotonic tag of the authoritative read.
    pub revision: u64,
    /// Application reported by the host, if any.
    pub application: Option<ApplicationRecord>,
}

impl AuthoritativeInput {
    /// Wrap an authoritative read.
    #[must_use]
    pub const fn new(revision: u64, application: Option<ApplicationRecord>) -> Self {
        Self {
            revision,
            application,
        }
    }
}

/// Everything a host needs to render the control.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ToggleSnapshot {
    /// Target job.
    pub job_id: JobId,
    /// Current toggle state.
    pub state: ToggleState,
    /// Whether interaction must be disabled.
    pub busy: bool,
}

impl ToggleSnapshot {
    /// Phase derived from the snapshot.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.busy {
            Phase::Busy
        } else if self.state.is_present() {
            Phase::IdlePresent
        } else {
            Phase::IdleAbsent
        }
    }
}
