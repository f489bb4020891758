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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Host-agnostic apply/withdraw toggle for job applications.
//!
//! Layout:
//! - `error.rs`: remote failure taxonomy
//! - `model.rs`: toggle state, phases, and authoritative input
//! - `service.rs`: collaborator traits implemented by transports and hosts
//! - `toggle/`: the synchronous controller and its async driver

pub mod error;
pub mod model;
pub mod service;
pub mod toggle;

pub use error::{RemoteError, RemoteResult};
pub use model::{AuthoritativeInput, Phase, RemoteOperation, ToggleSnapshot, ToggleState};
pub use service::{ApplicationClient, AuthFailureHandler};
pub use toggle::{
    Activation, ApplyToggle, Dispatch, Outcome, RemoteRequest, Settlement, Ticket,
    ToggleController,
};
