//! Apply/withdraw toggle: a synchronous controller plus an async driver.
//!
//! # Design
//! - `ToggleController` owns all state transitions and never awaits; hosts with
//!   their own message loop can drive it directly.
//! - `ApplyToggle` wires the controller to an [`ApplicationClient`](crate::ApplicationClient)
//!   and an [`AuthFailureHandler`](crate::AuthFailureHandler).
//! - Every dispatch is tagged with the reconciliation generation it started under;
//!   results from an older generation clear `busy` but never touch state.

mod controller;
mod driver;

pub use controller::{Dispatch, Outcome, RemoteRequest, Settlement, Ticket, ToggleController};
pub use driver::{Activation, ApplyToggle};
