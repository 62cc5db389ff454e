//! Semantic validation beyond what serde can express.

use crate::schema::Config;

/// Largest roster the bot renders in a single message.
pub const MAX_CAPACITY: usize = 25;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Returns every problem found in `config`; empty when valid.
    #[must_use]
    pub fn issues(config: &Config) -> Vec<String> {
        let mut issues = Vec::new();
        let registration = &config.registration;

        if config.discord.token.trim().is_empty() {
            issues.push("Discord token cannot be empty".to_string());
        }

        if registration.close_minute > 60 {
            issues.push(format!(
                "close_minute must be at most 60, got {}",
                registration.close_minute
            ));
        }

        if registration.open_minute >= registration.close_minute {
            issues.push(format!(
                "open_minute ({}) must be before close_minute ({})",
                registration.open_minute, registration.close_minute
            ));
        }

        if registration.capacity == 0 || registration.capacity > MAX_CAPACITY {
            issues.push(format!(
                "capacity must be between 1 and {MAX_CAPACITY}, got {}",
                registration.capacity
            ));
        }

        if !(-12..=14).contains(&registration.utc_offset_hours) {
            issues.push(format!(
                "utc_offset_hours must be between -12 and 14, got {}",
                registration.utc_offset_hours
            ));
        }

        if registration.notice_ttl_seconds == 0 {
            issues.push("notice_ttl_seconds must be positive".to_string());
        }

        if registration.startup_notice_ttl_seconds == 0 {
            issues.push("startup_notice_ttl_seconds must be positive".to_string());
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        let mut config = Config::default();
        config.discord.token = "token".to_string();
        config
    }

    #[test]
    fn test_default_with_token_is_valid() {
        assert!(ConfigValidator::issues(&valid()).is_empty());
    }

    #[test]
    fn test_full_hour_window_is_valid() {
        let mut config = valid();
        config.registration.open_minute = 0;
        config.registration.close_minute = 60;
        assert!(ConfigValidator::issues(&config).is_empty());
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let mut config = valid();
        config.registration.open_minute = 45;
        config.registration.close_minute = 30;
        let issues = ConfigValidator::issues(&config);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("open_minute"));
    }

    #[test]
    fn test_every_problem_is_reported() {
        let mut config = Config::default();
        config.registration.capacity = 0;
        config.registration.close_minute = 61;
        config.registration.notice_ttl_seconds = 0;
        assert_eq!(ConfigValidator::issues(&config).len(), 4);
    }
}
