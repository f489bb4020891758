//! Fake collaborators for exercising the toggle without a network.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use jobtrack_api_models::{ApplicationId, ApplicationRecord, JobId};
use jobtrack_core::{
    ApplicationClient, AuthFailureHandler, RemoteError, RemoteOperation, RemoteResult,
};
use tokio::sync::Notify;

/// Remote call observed by a [`ScriptedClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedCall {
    /// `create(job_id)` was invoked.
    Create(JobId),
    /// `delete(application_id)` was invoked.
    Delete(ApplicationId),
}

/// Client answering from queued outcomes and recording every call.
///
/// Calls without a queued outcome fail with a transport error. With a gate
/// installed, each call is recorded immediately but waits for a
/// [`Notify::notify_one`] before answering.
#[derive(Default)]
pub struct ScriptedClient {
    creates: RefCell<VecDeque<RemoteResult<ApplicationRecord>>>,
    deletes: RefCell<VecDeque<RemoteResult<()>>>,
    calls: RefCell<Vec<RecordedCall>>,
    gate: Option<Rc<Notify>>,
}

impl ScriptedClient {
    /// Client with no queued outcomes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Client whose calls block until `gate` is notified.
    #[must_use]
    pub fn gated(gate: Rc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Queue the outcome of the next `create`.
    pub fn push_create(&self, outcome: RemoteResult<ApplicationRecord>) {
        self.creates.borrow_mut().push_back(outcome);
    }

    /// Queue the outcome of the next `delete`.
    pub fn push_delete(&self, outcome: RemoteResult<()>) {
        self.deletes.borrow_mut().push_back(outcome);
    }

    /// Calls observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Number of calls observed so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = self.gate.clone() {
            gate.notified().await;
        }
    }
}

#[async_trait(?Send)]
impl ApplicationClient for ScriptedClient {
    async fn create(&self, job_id: JobId) -> RemoteResult<ApplicationRecord> {
        self.calls.borrow_mut().push(RecordedCall::Create(job_id));
        self.wait_for_gate().await;
        let next = self.creates.borrow_mut().pop_front();
        next.unwrap_or_else(|| {
            Err(RemoteError::transport(
                RemoteOperation::Create,
                "no scripted create outcome",
            ))
        })
    }

    async fn delete(&self, application_id: ApplicationId) -> RemoteResult<()> {
        self.calls
            .borrow_mut()
            .push(RecordedCall::Delete(application_id));
        self.wait_for_gate().await;
        let next = self.deletes.borrow_mut().pop_front();
        next.unwrap_or_else(|| {
            Err(RemoteError::transport(
                RemoteOperation::Delete,
                "no scripted delete outcome",
            ))
        })
    }
}

/// Auth handler counting invocations.
#[derive(Debug, Default)]
pub struct RecordingAuthHandler {
    invocations: Cell<usize>,
}

impl RecordingAuthHandler {
    /// Handler with a zero count.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times re-authentication was requested.
    #[must_use]
    pub fn invocations(&self) -> usize {
        self.invocations.get()
    }
}

impl AuthFailureHandler for RecordingAuthHandler {
    fn on_auth_failure(&self) {
        self.invocations.set(self.invocations.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unscripted_calls_fail_with_transport_error() {
        let client = ScriptedClient::new();
        let result = client.create(JobId(1)).await;
        assert!(matches!(result, Err(RemoteError::Transport { .. })));
        assert_eq!(client.calls(), vec![RecordedCall::Create(JobId(1))]);
    }

    #[tokio::test]
    async fn scripted_outcomes_are_returned_in_order() {
        let client = ScriptedClient::new();
        client.push_delete(Ok(()));
        client.push_delete(Err(RemoteError::from_status(
            RemoteOperation::Delete,
            401,
            "",
        )));
        assert!(client.delete(ApplicationId(1)).await.is_ok());
        assert!(
            client
                .delete(ApplicationId(1))
                .await
                .is_err_and(|err| err.is_authorization())
        );
        assert_eq!(client.call_count(), 2);
    }

    #[test]
    fn auth_handler_counts_invocations() {
        let handler = RecordingAuthHandler::new();
        handler.on_auth_failure();
        handler.on_auth_failure();
        assert_eq!(handler.invocations(), 2);
    }
}
