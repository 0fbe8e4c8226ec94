//! Admin Session
//!
//! The bearer token lives in `localStorage`; an unauthorized response ends
//! the session and sends the browser to the login page.

use tracing::{info, warn};

pub const TOKEN_KEY: &str = "admin_token";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn load_token() -> Option<String> {
    storage()?
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.trim().is_empty())
}

pub fn has_token() -> bool {
    load_token().is_some()
}

/// Drop the stored token and navigate to `login_path`.
pub fn expire(login_path: &str) {
    if let Some(storage) = storage() {
        if let Err(error) = storage.remove_item(TOKEN_KEY) {
            warn!(?error, "could not clear admin token");
        }
    }
    info!(login_path, "session expired, redirecting to login");

    let Some(win) = web_sys::window() else {
        return;
    };
    if let Err(error) = win.location().set_href(login_path) {
        warn!(?error, "redirect to login failed");
    }
}
