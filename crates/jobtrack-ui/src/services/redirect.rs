//! Login redirect used when the API rejects the session.

use gloo::console;
use jobtrack_core::AuthFailureHandler;

#[derive(Clone, Debug)]
pub(crate) struct LoginRedirect {
    login_path: String,
}

impl LoginRedirect {
    pub(crate) fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }
}

impl AuthFailureHandler for LoginRedirect {
    fn on_auth_failure(&self) {
        let Some(window) = web_sys::window() else {
            console::error!("login redirect skipped: no window");
            return;
        };
        if let Err(err) = window.location().set_href(&self.login_path) {
            console::error!("login redirect failed", err);
        }
    }
}
