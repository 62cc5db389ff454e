//! Integration tests for informal-registry.
//!
//! These drive the engine from a loaded configuration and push its actions
//! through a dispatcher, the same path the bot uses.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use informal_common::test_utils::discord_fixtures::{
    next_message_id, other_channel_id, test_channel_id, test_guild_id, test_user_ids,
};
use informal_common::test_utils::{config_fixtures, init_test_logging, manual_clock_at};
use informal_common::{ChannelId, MessageId, MessageRef, UserId};
use informal_config::ConfigLoader;
use informal_registry::{
    Action, DeferredTasks, Dispatcher, IncomingMessage, MessageOutcome, RegistrationEngine,
    SentMessage, Transport, TransportError,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct Outbox {
    sent: Mutex<Vec<(ChannelId, String)>>,
    deleted: Mutex<Vec<MessageRef>>,
}

#[async_trait]
impl Transport for Outbox {
    async fn send(&self, channel: ChannelId, content: &str) -> Result<SentMessage, TransportError> {
        self.sent.lock().push((channel, content.to_string()));
        Ok(SentMessage {
            message: MessageRef::new(channel, next_message_id()),
            created_at: Utc::now(),
        })
    }

    async fn reply(&self, to: MessageRef, content: &str) -> Result<SentMessage, TransportError> {
        self.send(to.channel_id, content).await
    }

    async fn edit(&self, _message: MessageRef, _content: &str) -> Result<(), TransportError> {
        Ok(())
    }

    async fn delete(&self, message: MessageRef) -> Result<(), TransportError> {
        self.deleted.lock().push(message);
        Ok(())
    }
}

fn plus(channel: ChannelId, author: UserId) -> IncomingMessage {
    IncomingMessage {
        message: MessageRef::new(channel, next_message_id()),
        guild_id: Some(test_guild_id()),
        author,
        author_is_bot: false,
        author_name: format!("player-{}", author.0 % 100),
        content: "+".to_string(),
        created_at: Utc::now(),
    }
}

#[test]
fn test_engine_from_full_config() {
    init_test_logging();

    let config = ConfigLoader::from_yaml_str(config_fixtures::full_config_yaml()).unwrap();
    // 12:10 at +6 is 11:10 at the configured +5.
    let clock = manual_clock_at(2026, 10, 18, 12, 10);
    let mut engine = RegistrationEngine::from_config(&config.registration, clock).unwrap();
    for channel in &config.discord.channels {
        engine.watch(*channel);
    }

    assert_eq!(engine.capacity(), 8);
    assert_eq!(engine.now().format("%H:%M").to_string(), "11:10");

    let users = test_user_ids(9);
    for user in &users[..8] {
        engine.handle_message(&plus(test_channel_id(), *user));
    }
    let ninth = engine.handle_message(&plus(test_channel_id(), users[8]));
    assert_eq!(ninth.outcome, MessageOutcome::Full);

    // Channels keep separate rosters.
    let other = engine.handle_message(&plus(other_channel_id(), users[8]));
    assert_eq!(other.outcome, MessageOutcome::Registered(1));
}

#[tokio::test(start_paused = true)]
async fn test_message_to_discord_round_trip() {
    init_test_logging();

    let config = ConfigLoader::from_yaml_str(config_fixtures::minimal_config_yaml()).unwrap();
    let clock = manual_clock_at(2026, 10, 18, 14, 50);
    let mut engine = RegistrationEngine::from_config(&config.registration, clock.clone()).unwrap();
    engine.start(test_channel_id());

    let outbox = Arc::new(Outbox::default());
    let deferred = DeferredTasks::new();
    let dispatcher = Dispatcher::new(
        outbox.clone(),
        deferred.clone(),
        config.registration.notice_ttl(),
    );

    // Closed: the token is removed and a hint posted, which later expires.
    let early = plus(test_channel_id(), test_user_ids(1)[0]);
    let processed = engine.handle_message(&early);
    assert_eq!(processed.outcome, MessageOutcome::Closed);
    dispatcher.execute(processed.actions).await;
    assert_eq!(outbox.deleted.lock().as_slice(), &[early.message]);
    assert_eq!(outbox.sent.lock().len(), 1);

    tokio::time::sleep(config.registration.notice_ttl() + Duration::from_secs(1)).await;
    assert_eq!(outbox.deleted.lock().len(), 2);

    // The next opening boundary is announced by the tick.
    clock.advance(ChronoDuration::minutes(40));
    let actions = engine.tick();
    assert!(matches!(actions.as_slice(), [Action::Send { .. }]));
    dispatcher.execute(actions).await;

    let processed = engine.handle_message(&plus(test_channel_id(), test_user_ids(1)[0]));
    assert_eq!(processed.outcome, MessageOutcome::Registered(1));

    deferred.shutdown();
}

#[test]
fn test_ids_render_as_discord_snowflakes() {
    let message = MessageRef::new(ChannelId(1), MessageId(2));
    assert_eq!(message.to_string(), "1/2");
}

#[test]
fn test_announcement_on_blocking_runtime() {
    let outbox = Arc::new(Outbox::default());
    let dispatcher = Dispatcher::new(outbox.clone(), DeferredTasks::new(), Duration::from_secs(1));

    tokio_test::block_on(dispatcher.execute(vec![Action::announce(test_channel_id(), "roster")]));

    let sent = outbox.sent.lock();
    assert_eq!(sent.as_slice(), &[(test_channel_id(), "roster".to_string())]);
}
