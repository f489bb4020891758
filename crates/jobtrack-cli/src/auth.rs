//! Re-authentication signalling for the CLI host.

use std::cell::Cell;

use jobtrack_core::AuthFailureHandler;
use reqwest::Url;
use tracing::warn;

/// Records that the toggle asked for the login flow so the command can exit accordingly.
#[derive(Debug)]
pub(crate) struct ReauthNotice {
    login_url: Url,
    requested: Cell<bool>,
}

impl ReauthNotice {
    pub(crate) const fn new(login_url: Url) -> Self {
        Self {
            login_url,
            requested: Cell::new(false),
        }
    }

    pub(crate) fn was_requested(&self) -> bool {
        self.requested.get()
    }

    pub(crate) const fn login_url(&self) -> &Url {
        &self.login_url
    }
}

impl AuthFailureHandler for ReauthNotice {
    fn on_auth_failure(&self) {
        warn!(login_url = %self.login_url, "server rejected credentials; sign-in required");
        self.requested.set(true);
    }
}
