//! Configuration schema definitions using serde.

use chrono::FixedOffset;
use informal_common::{fixed_offset, ChannelId, GuildId, InformalError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::validator::ConfigValidator;

/// Main configuration structure for the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Registration window configuration.
    pub registration: RegistrationConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Guild to register slash commands in; global registration when unset.
    pub guild_id: Option<GuildId>,
    /// Channel receiving the one-time startup message.
    pub test_channel_id: Option<ChannelId>,
    /// Channels monitored from startup without an explicit `/registration start`.
    pub channels: Vec<ChannelId>,
}

/// Registration window configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Minute of the hour the window opens.
    pub open_minute: u32,
    /// Minute of the hour the window closes (exclusive, up to 60).
    pub close_minute: u32,
    /// Maximum number of registered users per window.
    pub capacity: usize,
    /// Fixed offset, in hours east of UTC, for all window math.
    pub utc_offset_hours: i32,
    /// Lifetime of transient notices in seconds.
    pub notice_ttl_seconds: u64,
    /// Lifetime of the startup message in seconds.
    pub startup_notice_ttl_seconds: u64,
}

impl RegistrationConfig {
    /// Fixed offset used for window math and display.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        fixed_offset(self.utc_offset_hours)
    }

    /// Lifetime of transient notices.
    #[must_use]
    pub const fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_seconds)
    }

    /// Lifetime of the startup message.
    #[must_use]
    pub const fn startup_notice_ttl(&self) -> Duration {
        Duration::from_secs(self.startup_notice_ttl_seconds)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human readable output.
    pub json: bool,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), InformalError> {
        let issues = ConfigValidator::issues(self);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(InformalError::Config(issues.join("; ")))
        }
    }
}
