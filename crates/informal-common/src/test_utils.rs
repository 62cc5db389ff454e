//! Test utilities and shared fixtures for the informal registration bot.
//!
//! Available to other crates through the `testing` feature.

use crate::clock::{fixed_offset, ManualClock, DEFAULT_UTC_OFFSET_HOURS};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Once};

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt().with_test_writer().with_env_filter(filter).init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Test fixture for creating a UTC timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// UTC instant for a wall-clock time given in the default +6 zone.
pub fn local_timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    fixed_offset(DEFAULT_UTC_OFFSET_HOURS)
        .with_ymd_and_hms(year, month, day, hour, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// Shared manual clock frozen at a +6 wall-clock time.
pub fn manual_clock_at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> Arc<ManualClock> {
    Arc::new(ManualClock::new(local_timestamp(year, month, day, hour, min)))
}

/// Discord-related test utilities.
pub mod discord_fixtures {
    use crate::{ChannelId, GuildId, MessageId, UserId};
    use std::sync::atomic::{AtomicU64, Ordering};

    static NEXT_MESSAGE: AtomicU64 = AtomicU64::new(500_000_000_000_000_000);

    /// Create a test channel ID.
    pub fn test_channel_id() -> ChannelId {
        ChannelId(123456789012345678)
    }

    /// Create a second, distinct test channel ID.
    pub fn other_channel_id() -> ChannelId {
        ChannelId(223456789012345678)
    }

    /// Create a test guild ID.
    pub fn test_guild_id() -> GuildId {
        GuildId(345678901234567890)
    }

    /// Create a test user ID.
    pub fn test_user_id() -> UserId {
        UserId(987654321098765432)
    }

    /// Create multiple test user IDs.
    pub fn test_user_ids(count: usize) -> Vec<UserId> {
        (0..count)
            .map(|i| UserId(100000000000000000 + i as u64))
            .collect()
    }

    /// Hand out a fresh, never repeated message ID.
    pub fn next_message_id() -> MessageId {
        MessageId(NEXT_MESSAGE.fetch_add(1, Ordering::Relaxed))
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
discord:
  token: "test_token"
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "discord:\n",
            "  token: \"test_token_full\"\n",
            "  guild_id: 345678901234567890\n",
            "  test_channel_id: 123456789012345678\n",
            "  channels:\n",
            "    - 123456789012345678\n",
            "    - 223456789012345678\n",
            "\n",
            "registration:\n",
            "  open_minute: 0\n",
            "  close_minute: 60\n",
            "  capacity: 8\n",
            "  utc_offset_hours: 5\n",
            "  notice_ttl_seconds: 90\n",
            "  startup_notice_ttl_seconds: 300\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  json: true\n"
        )
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for valid `(open_minute, close_minute)` pairs.
    pub fn window_marks_strategy() -> impl Strategy<Value = (u32, u32)> {
        (0u32..60).prop_flat_map(|open| (Just(open), (open + 1)..=60))
    }
}
