//! Client Configuration

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminApiConfig {
    /// Absolute URL of the backend, without a trailing slash
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when present
    pub bearer_token: Option<String>,
}

impl AdminApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

impl Default for AdminApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
