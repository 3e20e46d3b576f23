use std::fmt;

use gloo::console;

use crate::services::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Console logger with a component tag on every line.
///
/// Debug lines are dropped unless the bundle was built with `TT_BOOKING_DEBUG`.
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, component, message);
    }

    /// Warn about a browser call whose result nobody else inspects.
    /// Returns `true` when it succeeded.
    pub fn warn_on_failure<E: fmt::Debug>(component: &str, action: &str, result: Result<(), E>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                Self::warn_with_component(component, &failure_message(action, &err));
                false
            }
        }
    }

    fn enabled(level: LogLevel) -> bool {
        level > LogLevel::Debug || AppConfig::from_build_env().debug_logging
    }

    fn log(level: LogLevel, component: &str, message: &str) {
        if !Self::enabled(level) {
            return;
        }
        let line = format_line(level, component, message);
        match level {
            LogLevel::Debug => console::debug!(line),
            LogLevel::Info => console::info!(line),
            LogLevel::Warn => console::warn!(line),
            LogLevel::Error => console::error!(line),
        }
    }
}

fn failure_message(action: &str, err: &dyn fmt::Debug) -> String {
    format!("{} failed: {:?}", action, err)
}

fn format_line(level: LogLevel, component: &str, message: &str) -> String {
    format!("[{}] {}: {}", level.as_str(), component, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line(LogLevel::Warn, "calendar", "skipped booking 4"),
            "[WARN] calendar: skipped booking 4"
        );
    }

    #[test]
    fn test_failed_browser_call_is_described() {
        assert_eq!(
            failure_message("updating address bar", &"SecurityError"),
            "updating address bar failed: \"SecurityError\""
        );
        assert!(Logger::warn_on_failure::<String>("router", "updating address bar", Ok(())));
    }

    #[test]
    fn test_levels_above_debug_always_enabled() {
        assert!(Logger::enabled(LogLevel::Info));
        assert!(Logger::enabled(LogLevel::Error));
    }
}
