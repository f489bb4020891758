//! Application-level contexts for hosts embedding UI components.

pub(crate) mod api;
