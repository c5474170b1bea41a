//! CLI configuration.

use crate::replay::InvalidEventPolicy;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TAXIRIDE_LOG";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log filter directive (e.g. "info", "taxiride=debug").
    pub log_level: String,

    /// What `replay` does with an event the current status does not allow.
    pub on_invalid: InvalidEventPolicy,

    /// Emit JSON instead of text on stdout.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            on_invalid: InvalidEventPolicy::Drop,
            json: false,
        }
    }
}

impl Config {
    /// Defaults, overridden by the environment.
    pub fn from_env() -> Self {
        Self::default().with_log_level(std::env::var(LOG_ENV).ok())
    }

    /// Override the log level when one is given.
    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.log_level = level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.on_invalid, InvalidEventPolicy::Drop);
        assert!(!config.json);
    }

    #[test]
    fn test_log_level_override() {
        let config = Config::default().with_log_level(Some("debug".into()));
        assert_eq!(config.log_level, "debug");

        let config = Config::default().with_log_level(Some("  ".into()));
        assert_eq!(config.log_level, "info");

        let config = Config::default().with_log_level(None);
        assert_eq!(config.log_level, "info");
    }
}
