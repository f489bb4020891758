//! Async driver binding the controller to its collaborators.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use jobtrack_api_models::{ApplicationRecord, JobId};
use tracing::warn;

use crate::model::{AuthoritativeInput, ToggleSnapshot};
use crate::service::{ApplicationClient, AuthFailureHandler};
use crate::toggle::controller::{Outcome, RemoteRequest, Settlement, Ticket, ToggleController};

/// How an activation future resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The result reached a live controller.
    Settled(Settlement),
    /// The toggle was torn down before the call completed; nothing changed.
    Detached,
}

/// Apply/withdraw toggle for one job.
///
/// Dropping the toggle tears it down: pending activations keep only a weak
/// reference and resolve to [`Activation::Detached`].
pub struct ApplyToggle<C, A> {
    controller: Rc<RefCell<ToggleController>>,
    client: Rc<C>,
    auth: Rc<A>,
}

impl<C, A> ApplyToggle<C, A>
where
    C: ApplicationClient + 'static,
    A: AuthFailureHandler + 'static,
{
    /// Toggle for `job_id` seeded with `initial`.
    #[must_use]
    pub fn new(
        job_id: JobId,
        initial: Option<ApplicationRecord>,
        client: Rc<C>,
        auth: Rc<A>,
    ) -> Self {
        Self {
            controller: Rc::new(RefCell::new(ToggleController::new(job_id, initial))),
            client,
            auth,
        }
    }

    /// Target job.
    #[must_use]
    pub fn job_id(&self) -> JobId {
        self.controller.borrow().job_id()
    }

    /// Render-ready copy of the state.
    #[must_use]
    pub fn snapshot(&self) -> ToggleSnapshot {
        self.controller.borrow().snapshot()
    }

    /// Unconditionally adopt the host's authoritative value.
    pub fn reconcile(&self, application: Option<ApplicationRecord>) {
        self.controller.borrow_mut().reconcile(application);
    }

    /// Adopt the host's value if its revision changed. Returns `true` on change.
    pub fn observe(&self, input: &AuthoritativeInput) -> bool {
        self.controller.borrow_mut().observe(input)
    }

    /// Handle a user activation.
    ///
    /// The busy check happens synchronously: `None` means the call was ignored
    /// because another operation is outstanding. Otherwise the returned future
    /// performs the remote call and settles it; the host only has to drive it.
    #[must_use]
    pub fn activate(&self) -> Option<LocalBoxFuture<'static, Activation>> {
        let dispatch = self.controller.borrow_mut().begin()?;
        let mut guard = BusyGuard {
            controller: Rc::downgrade(&self.controller),
            ticket: dispatch.ticket,
            armed: true,
        };
        let client = Rc::clone(&self.client);
        let auth = Rc::clone(&self.auth);

        Some(
            async move {
                let outcome = match dispatch.request {
                    RemoteRequest::Create { job_id } => client
                        .create(job_id)
                        .await
                        .map_or_else(Outcome::Failed, Outcome::Created),
                    RemoteRequest::Delete { application_id } => client
                        .delete(application_id)
                        .await
                        .map_or_else(Outcome::Failed, |()| Outcome::Deleted),
                };
                guard.armed = false;

                let Some(controller) = guard.controller.upgrade() else {
                    warn!(
                        operation = dispatch.ticket.operation().as_str(),
                        "toggle torn down before completion; result dropped"
                    );
                    return Activation::Detached;
                };
                let settlement = controller.borrow_mut().settle(dispatch.ticket, outcome);
                if settlement.requires_reauth() {
                    auth.on_auth_failure();
                }
                Activation::Settled(settlement)
            }
            .boxed_local(),
        )
    }
}

/// Clears `busy` if an activation future is dropped before it settles.
struct BusyGuard {
    controller: Weak<RefCell<ToggleController>>,
    ticket: Ticket,
    armed: bool,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(controller) = self.controller.upgrade()
            && let Ok(mut controller) = controller.try_borrow_mut()
        {
            controller.abandon(self.ticket);
        }
    }
}
