//! Console Configuration
//!
//! Values baked in at build time from the environment, with defaults for a
//! console served next to its API.

use optimistic_sync::ReorderPolicy;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 15_000;

/// Polling faster than this hammers the backend for no visible gain
const MIN_POLL_INTERVAL_MS: u32 = 1_000;

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Absolute (`https://host/api`) or origin-relative (`/api`)
    pub api_base_url: String,
    pub login_path: String,
    pub poll_interval_ms: u32,
    pub reorder_policy: ReorderPolicy,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            reorder_policy: ReorderPolicy::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("ADMIN_API_BASE_URL"),
            option_env!("ADMIN_LOGIN_PATH"),
            option_env!("ADMIN_POLL_INTERVAL_MS"),
            option_env!("ADMIN_REORDER_POLICY"),
        )
    }

    /// Unset, blank or unparseable values fall back to the defaults.
    pub fn from_values(
        api_base_url: Option<&str>,
        login_path: Option<&str>,
        poll_interval_ms: Option<&str>,
        reorder_policy: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: non_blank(api_base_url).unwrap_or(defaults.api_base_url),
            login_path: non_blank(login_path).unwrap_or(defaults.login_path),
            poll_interval_ms: poll_interval_ms
                .and_then(|value| value.trim().parse::<u32>().ok())
                .map(|ms| ms.max(MIN_POLL_INTERVAL_MS))
                .unwrap_or(defaults.poll_interval_ms),
            reorder_policy: reorder_policy
                .and_then(ReorderPolicy::parse)
                .unwrap_or(defaults.reorder_policy),
        }
    }

    /// API base as an absolute URL, resolving a relative base against
    /// the page origin.
    pub fn resolve_api_base(&self, origin: Option<&str>) -> String {
        let base = self.api_base_url.trim();
        if base.starts_with("http://") || base.starts_with("https://") {
            return base.to_string();
        }
        match origin {
            Some(origin) => {
                let origin = origin.trim_end_matches('/');
                let path = base.trim_start_matches('/');
                format!("{origin}/{path}")
            }
            None => base.to_string(),
        }
    }

    pub fn absolute_api_base(&self) -> String {
        let origin = web_sys::window().and_then(|win| win.location().origin().ok());
        self.resolve_api_base(origin.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = ConsoleConfig::from_values(None, None, None, None);
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.reorder_policy, ReorderPolicy::Chain);
    }

    #[test]
    fn test_values_override_defaults() {
        let config = ConsoleConfig::from_values(
            Some("https://admin.example.com/api"),
            Some("/auth/login"),
            Some("30000"),
            Some("serialized"),
        );
        assert_eq!(config.api_base_url, "https://admin.example.com/api");
        assert_eq!(config.login_path, "/auth/login");
        assert_eq!(config.poll_interval_ms, 30_000);
        assert_eq!(config.reorder_policy, ReorderPolicy::Serialized);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = ConsoleConfig::from_values(Some("  "), Some(""), Some("soon"), Some("yolo"));
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_poll_interval_is_clamped() {
        let config = ConsoleConfig::from_values(None, None, Some("50"), None);
        assert_eq!(config.poll_interval_ms, MIN_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_relative_base_joins_origin() {
        let config = ConsoleConfig::default();
        assert_eq!(
            config.resolve_api_base(Some("https://console.example.com/")),
            "https://console.example.com/api"
        );
        assert_eq!(config.resolve_api_base(None), "/api");
    }

    #[test]
    fn test_absolute_base_ignores_origin() {
        let config = ConsoleConfig {
            api_base_url: "http://localhost:8080/api".to_string(),
            ..ConsoleConfig::default()
        };
        assert_eq!(
            config.resolve_api_base(Some("https://console.example.com")),
            "http://localhost:8080/api"
        );
    }
}
