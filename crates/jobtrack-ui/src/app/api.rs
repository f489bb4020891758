//! API context shared by toggle components.
//!
//! # Design
//! - Create exactly one API client per app boot.
//! - The session token is read per request, so logging in does not require rebuilding the context.

use std::rc::Rc;

use crate::core::auth::DEFAULT_LOGIN_PATH;
use crate::services::api::ApiClient;
use crate::services::redirect::LoginRedirect;

/// Shared collaborators for [`ApplyButton`](crate::ApplyButton) instances.
#[derive(Clone)]
pub struct ApiCtx {
    pub(crate) client: Rc<ApiClient>,
    pub(crate) redirect: Rc<LoginRedirect>,
}

impl ApiCtx {
    /// Create a context targeting `base_url` that sends rejected sessions to `login_path`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, login_path: impl Into<String>) -> Self {
        Self {
            client: Rc::new(ApiClient::new(base_url)),
            redirect: Rc::new(LoginRedirect::new(login_path)),
        }
    }
}

impl Default for ApiCtx {
    fn default() -> Self {
        Self::new("", DEFAULT_LOGIN_PATH)
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client) && Rc::ptr_eq(&self.redirect, &other.redirect)
    }
}
