//! Apply/withdraw toggle feature wiring.
//!
//! # Design
//! - State transitions live in `jobtrack-core`; this slice only renders them.
//! - Restrict API calls to the injected `ApiCtx` collaborators.

pub mod logic;
#[cfg(target_arch = "wasm32")]
pub mod view;
