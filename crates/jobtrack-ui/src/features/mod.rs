//! Feature slices of the UI.

pub mod apply;
