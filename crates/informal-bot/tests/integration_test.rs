//! Integration tests for informal-bot crate.
//!
//! These verify start-up wiring that does not need a gateway connection:
//! configuration into engine, and the tick against a recording transport.

use informal_bot::{build_engine, ticker, BotError};
use informal_common::test_utils::discord_fixtures::test_channel_id;
use informal_common::test_utils::{config_fixtures, init_test_logging, manual_clock_at};
use informal_config::{ConfigLoader, ConfigError};
use informal_registry::testing::{RecordingTransport, TransportCall};
use informal_registry::{DeferredTasks, Dispatcher};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_configured_channels_get_ticked() {
    init_test_logging();

    let mut config = ConfigLoader::from_yaml_str(config_fixtures::minimal_config_yaml()).unwrap();
    config.discord.channels = vec![test_channel_id()];

    let clock = manual_clock_at(2026, 10, 18, 16, 44);
    let engine = Mutex::new(build_engine(&config, clock.clone()).unwrap());

    let transport = Arc::new(RecordingTransport::new());
    let dispatcher = Dispatcher::new(transport.clone(), DeferredTasks::new(), Duration::from_secs(120));

    // Lazily created window at the 16:30 boundary; 16:45 closes it.
    ticker::run_tick(&engine, &dispatcher).await;
    clock.advance(chrono::Duration::minutes(1));
    ticker::run_tick(&engine, &dispatcher).await;

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], TransportCall::Send { message, .. } if message.channel_id == test_channel_id()));

    // Announcements are permanent.
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(transport.deleted().is_empty());
}

#[test]
fn test_invalid_yaml_is_a_config_error() {
    let error: BotError = ConfigLoader::from_yaml_str("registration: [").unwrap_err().into();
    assert!(matches!(error, BotError::Config(ConfigError::Parse(_))));
}
