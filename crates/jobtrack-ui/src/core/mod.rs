//! DOM-free building blocks shared by UI features.

pub mod auth;
