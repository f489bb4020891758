//! Browser collaborators for the toggle: REST client and login redirect.

pub(crate) mod api;
pub(crate) mod redirect;
