use std::str::FromStr;

use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Name of the optional global a host page can set to override defaults.
pub const CONFIG_GLOBAL: &str = "__VISAFLOW_CONFIG__";

/// Browser storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Browser storage key holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Prefix for every API path. Empty means same origin.
    pub api_base_url: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("VISAFLOW_API_BASE").unwrap_or("").to_string(),
            log_level: "info".to_string(),
        }
        .normalized()
    }
}

impl AppConfig {
    /// Build-time defaults, overridden by `window.__VISAFLOW_CONFIG__` when present.
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };

        let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
            .unwrap_or(JsValue::UNDEFINED);
        if raw.is_undefined() || raw.is_null() {
            return Self::default();
        }

        // The logger isn't up yet; a bad override silently keeps the defaults.
        serde_wasm_bindgen::from_value::<AppConfig>(raw)
            .map(AppConfig::normalized)
            .unwrap_or_default()
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api_base_url.trim().trim_end_matches('/').to_string();
        self.api_base_url = trimmed;
        self
    }

    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(self.log_level.trim()).unwrap_or(log::Level::Info)
    }
}

/// Join an API path (`/api/...`) onto a base URL. An empty base keeps the
/// path relative, so requests go to the page's own origin.
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str, level: &str) -> AppConfig {
        AppConfig {
            api_base_url: base.to_string(),
            log_level: level.to_string(),
        }
        .normalized()
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let c = config("https://api.example.com/", "info");
        assert_eq!(c.api_base_url, "https://api.example.com");
        assert_eq!(
            join_url(&c.api_base_url, "/api/auth/login"),
            "https://api.example.com/api/auth/login"
        );
    }

    #[test]
    fn test_same_origin_endpoint() {
        let c = config("", "info");
        assert_eq!(join_url(&c.api_base_url, "/api/applications"), "/api/applications");
    }

    #[test]
    fn test_relative_path_gets_separator() {
        assert_eq!(join_url("http://localhost:8000", "api/x"), "http://localhost:8000/api/x");
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(config("", "debug").log_level(), log::Level::Debug);
        assert_eq!(config("", "WARN").log_level(), log::Level::Warn);
        assert_eq!(config("", "verbose").log_level(), log::Level::Info);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{"apiBaseUrl": "http://localhost:8000/"}"#).unwrap();
        let parsed = parsed.normalized();
        assert_eq!(parsed.api_base_url, "http://localhost:8000");
        assert_eq!(parsed.log_level, "info");
    }
}
