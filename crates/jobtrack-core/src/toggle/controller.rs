//! Synchronous toggle state machine.

use jobtrack_api_models::{ApplicationId, ApplicationRecord, JobId};
use tracing::{debug, warn};

use crate::error::RemoteError;
use crate::model::{AuthoritativeInput, Phase, RemoteOperation, ToggleSnapshot, ToggleState};

/// Identifies one dispatched remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    sequence: u64,
    generation: u64,
    operation: RemoteOperation,
}

impl Ticket {
    /// Operation this ticket was issued for.
    #[must_use]
    pub const fn operation(self) -> RemoteOperation {
        self.operation
    }
}

/// Remote call the host must perform for a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteRequest {
    /// Create an application for the job.
    Create {
        /// Target job.
        job_id: JobId,
    },
    /// Delete the held application.
    Delete {
        /// Application to delete.
        application_id: ApplicationId,
    },
}

/// Work handed out by [`ToggleController::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Ticket to present when settling.
    pub ticket: Ticket,
    /// Remote call to perform.
    pub request: RemoteRequest,
}

/// Result of a remote call, fed back through [`ToggleController::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The application was created.
    Created(ApplicationRecord),
    /// The application was deleted.
    Deleted,
    /// The call failed.
    Failed(RemoteError),
}

/// How a settled dispatch affected the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The outcome was applied; carries the new state.
    Applied(ToggleState),
    /// The call failed and state was left untouched.
    Failed(RemoteError),
    /// A reconciliation happened while the call was in flight; the result was discarded.
    Stale {
        /// Failure reported by the discarded call, if it failed.
        error: Option<RemoteError>,
    },
    /// The ticket was not the one in flight; nothing changed.
    Unmatched,
}

impl Settlement {
    /// Whether the settled call reported an authorization failure.
    #[must_use]
    pub const fn requires_reauth(&self) -> bool {
        match self {
            Self::Failed(err)
            | Self::Stale {
                error: Some(err), ..
            } => err.is_authorization(),
            Self::Applied(_) | Self::Stale { error: None } | Self::Unmatched => false,
        }
    }
}

/// Local view of whether the current user applied to one job.
///
/// State changes only through [`reconcile`](Self::reconcile) /
/// [`observe`](Self::observe) or a successful [`settle`](Self::settle); at most
/// one dispatch is outstanding at any time.
#[derive(Debug, Clone)]
pub struct ToggleController {
    job_id: JobId,
    state: ToggleState,
    in_flight: Option<Ticket>,
    generation: u64,
    sequence: u64,
    last_observed: Option<AuthoritativeInput>,
}

impl ToggleController {
    /// Controller for `job_id` seeded with an initial application value.
    #[must_use]
    pub fn new(job_id: JobId, initial: Option<ApplicationRecord>) -> Self {
        Self {
            job_id,
            state: ToggleState::from_option(initial),
            in_flight: None,
            generation: 0,
            sequence: 0,
            last_observed: None,
        }
    }

    /// Target job, fixed for the controller's lifetime.
    #[must_use]
    pub const fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Current toggle state.
    #[must_use]
    pub const fn state(&self) -> &ToggleState {
        &self.state
    }

    /// Whether a remote call is outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.in_flight.is_some() {
            Phase::Busy
        } else if self.state.is_present() {
            Phase::IdlePresent
        } else {
            Phase::IdleAbsent
        }
    }

    /// Render-ready copy of the state.
    #[must_use]
    pub fn snapshot(&self) -> ToggleSnapshot {
        ToggleSnapshot {
            job_id: self.job_id,
            state: self.state.clone(),
            busy: self.is_busy(),
        }
    }

    /// Overwrite local state with the host's authoritative value.
    ///
    /// Not blocked by `busy`. Any outstanding dispatch becomes stale.
    pub fn reconcile(&mut self, application: Option<ApplicationRecord>) {
        self.state = ToggleState::from_option(application);
        self.generation += 1;
        debug!(
            job_id = %self.job_id,
            present = self.state.is_present(),
            in_flight = self.in_flight.is_some(),
            "toggle reconciled"
        );
    }

    /// Reconcile when the input differs from the last one observed, either by
    /// revision or by application value.
    ///
    /// Returns `true` when reconciliation happened.
    pub fn observe(&mut self, input: &AuthoritativeInput) -> bool {
        if self.last_observed.as_ref() == Some(input) {
            return false;
        }
        self.last_observed = Some(input.clone());
        self.reconcile(input.application.clone());
        true
    }

    /// Start the user-triggered toggle.
    ///
    /// Returns `None` without side effects while a dispatch is outstanding.
    pub fn begin(&mut self) -> Option<Dispatch> {
        if self.in_flight.is_some() {
            debug!(job_id = %self.job_id, "toggle busy; ignoring activation");
            return None;
        }

        let (operation, request) = match &self.state {
            ToggleState::Absent => (
                RemoteOperation::Create,
                RemoteRequest::Create {
                    job_id: self.job_id,
                },
            ),
            ToggleState::Present(record) => (
                RemoteOperation::Delete,
                RemoteRequest::Delete {
                    application_id: record.id,
                },
            ),
        };

        self.sequence += 1;
        let ticket = Ticket {
            sequence: self.sequence,
            generation: self.generation,
            operation,
        };
        self.in_flight = Some(ticket);
        debug!(job_id = %self.job_id, operation = operation.as_str(), "toggle dispatched");
        Some(Dispatch { ticket, request })
    }

    /// Feed back the result of a dispatch.
    ///
    /// Clears `busy` for the matching ticket whatever the outcome. State changes
    /// only on success and only if no reconciliation happened in between.
    pub fn settle(&mut self, ticket: Ticket, outcome: Outcome) -> Settlement {
        if self.in_flight != Some(ticket) {
            warn!(job_id = %self.job_id, "settlement for unknown dispatch ignored");
            return Settlement::Unmatched;
        }
        self.in_flight = None;

        let outcome = self.check_target(outcome);

        if ticket.generation != self.generation {
            let error = match outcome {
                Outcome::Failed(err) => Some(err),
                Outcome::Created(_) | Outcome::Deleted => None,
            };
            warn!(
                job_id = %self.job_id,
                operation = ticket.operation.as_str(),
                "toggle result discarded after reconciliation"
            );
            return Settlement::Stale { error };
        }

        match (ticket.operation, outcome) {
            (RemoteOperation::Create, Outcome::Created(record)) => {
                debug!(job_id = %self.job_id, application_id = %record.id, "application created");
                self.state = ToggleState::Present(record);
                Settlement::Applied(self.state.clone())
            }
            (RemoteOperation::Delete, Outcome::Deleted) => {
                debug!(job_id = %self.job_id, "application deleted");
                self.state = ToggleState::Absent;
                Settlement::Applied(self.state.clone())
            }
            (_, Outcome::Failed(err)) => {
                warn!(
                    job_id = %self.job_id,
                    operation = ticket.operation.as_str(),
                    authorization = err.is_authorization(),
                    detail = %err.detail(),
                    "toggle operation failed"
                );
                Settlement::Failed(err)
            }
            (operation, _) => {
                let err = RemoteError::transport(operation, "outcome does not match operation");
                warn!(job_id = %self.job_id, operation = operation.as_str(), "mismatched outcome");
                Settlement::Failed(err)
            }
        }
    }

    /// Release the busy guard for a dispatch that will never settle.
    ///
    /// Returns `true` if the ticket was the one in flight.
    pub fn abandon(&mut self, ticket: Ticket) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        debug!(job_id = %self.job_id, operation = ticket.operation.as_str(), "dispatch abandoned");
        true
    }

    fn check_target(&self, outcome: Outcome) -> Outcome {
        match outcome {
            Outcome::Created(record) if record.job_id != self.job_id => {
                Outcome::Failed(RemoteError::transport(
                    RemoteOperation::Create,
                    format!(
                        "created application {} concerns job {}, expected job {}",
                        record.id, record.job_id, self.job_id
                    ),
                ))
            }
            other => other,
        }
    }
}
