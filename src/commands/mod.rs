//! Backend Command Wrappers
//!
//! Frontend bindings to the admin REST backend, organized by domain.

mod catalog;
mod notification;

use admin_api::{AdminApiClient, AdminApiConfig, ApiError};
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::session;

/// Client for one request: current base URL plus the stored token
pub fn api_client(config: &ConsoleConfig) -> Result<AdminApiClient, ApiError> {
    let client = AdminApiClient::new(
        AdminApiConfig::new(config.absolute_api_base()).with_bearer_token(session::load_token()),
    )?;
    if !client.has_credentials() {
        debug!(base_url = client.base_url(), "no admin token, sending request without credentials");
    }
    Ok(client)
}

// Re-export all public items
pub use catalog::*;
pub use notification::*;
