//! Integration tests for informal-config crate.

use informal_common::test_utils::config_fixtures;
use informal_common::{ChannelId, GuildId};
use informal_config::{Config, ConfigLoader};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();

    // Default config should fail validation due to the empty token
    assert!(config.validate().is_err());

    config.discord.token = "test_token".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_minimal_yaml() {
    let config = ConfigLoader::from_yaml_str(config_fixtures::minimal_config_yaml()).unwrap();

    assert_eq!(config.discord.token, "test_token");
    assert!(config.discord.channels.is_empty());
    assert_eq!(config.registration.notice_ttl(), Duration::from_secs(120));
    assert_eq!(config.registration.offset().local_minus_utc(), 6 * 3600);
    assert!(config.validate().is_ok());
}

#[test]
fn test_full_yaml() {
    let config = ConfigLoader::from_yaml_str(config_fixtures::full_config_yaml()).unwrap();

    assert_eq!(config.discord.guild_id, Some(GuildId(345678901234567890)));
    assert_eq!(
        config.discord.test_channel_id,
        Some(ChannelId(123456789012345678))
    );
    assert_eq!(config.discord.channels.len(), 2);
    assert_eq!(config.registration.open_minute, 0);
    assert_eq!(config.registration.close_minute, 60);
    assert_eq!(config.registration.capacity, 8);
    assert_eq!(config.registration.startup_notice_ttl(), Duration::from_secs(300));
    assert!(config.logging.json);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "discord:\n  token: from_file\nregistration:\n  open_minute: 10\n  close_minute: 20\n"
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(file.path()).unwrap();
    // DISCORD_TOKEN may be set in the environment running the tests.
    assert!(!config.discord.token.is_empty());
    assert_eq!(config.registration.open_minute, 10);
    assert_eq!(config.registration.close_minute, 20);
}

#[test]
fn test_invalid_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "discord:\n  token: t\nregistration:\n  open_minute: 50\n  close_minute: 40\n"
    )
    .unwrap();

    assert!(ConfigLoader::load_from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = ConfigLoader::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read configuration file"));
}
