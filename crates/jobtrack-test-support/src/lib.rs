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
#![allow(clippy::future_not_send)]

//! Shared test helpers used across integration suites.
//! Layout: fixtures.rs (records and JSON payloads), mocks.rs (scripted clients and auth handlers).

pub mod fixtures;
pub mod mocks;
