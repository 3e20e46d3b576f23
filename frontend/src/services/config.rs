//! Build-time configuration of the front end.
//!
//! Values are baked in at compile time through environment variables so the
//! same bundle can be served as static files:
//!
//! - `TT_BOOKING_API_URL`: REST base URL, defaults to `http://localhost:5008/api`
//! - `TT_BOOKING_DEBUG`: any value enables debug logging in the console

use shared::CalendarConfig;

pub const DEFAULT_API_URL: &str = "http://localhost:5008/api";

/// localStorage key holding the signed-in session
pub const SESSION_STORAGE_KEY: &str = "tt_booking.session";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub debug_logging: bool,
    pub calendar: CalendarConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            debug_logging: false,
            calendar: CalendarConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("TT_BOOKING_API_URL"), option_env!("TT_BOOKING_DEBUG"))
    }

    fn from_values(api_url: Option<&str>, debug: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_base_url,
            debug_logging: debug.map(|value| !value.is_empty() && value != "0").unwrap_or(false),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = AppConfig::from_values(None, None);
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert!(!config.debug_logging);
        assert_eq!(config.calendar.slot_minutes, 30);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_values(Some("https://club.example/api/"), Some("1"));
        assert_eq!(config.api_base_url, "https://club.example/api");
        assert!(config.debug_logging);

        let config = AppConfig::from_values(Some("  "), Some("0"));
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert!(!config.debug_logging);
    }
}
