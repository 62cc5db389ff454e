//! Default values.

use crate::schema::*;
use informal_common::DEFAULT_UTC_OFFSET_HOURS;

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            registration: RegistrationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            guild_id: None,
            test_channel_id: None,
            channels: Vec::new(),
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            open_minute: 30,
            close_minute: 45,
            capacity: 10,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            notice_ttl_seconds: 120,
            startup_notice_ttl_seconds: 600,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "informal_bot=info,informal_registry=info,informal_commands=info".to_string(),
            json: false,
        }
    }
}
