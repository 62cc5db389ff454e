//! Executes [`Action`]s against a [`Transport`].
//!
//! Actions of one event run in order. Failures are logged and dropped;
//! transient messages are handed to [`DeferredTasks`] for deletion.

use crate::action::{Action, Lifetime};
use crate::deferred::{DeferredHandle, DeferredTasks};
use crate::notice;
use crate::transport::{SentMessage, Transport};
use informal_common::MessageRef;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Performs actions and schedules the expiry of transient messages.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    deferred: DeferredTasks,
    notice_ttl: Duration,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("deferred", &self.deferred)
            .field("notice_ttl", &self.notice_ttl)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a dispatcher deleting transient messages after `notice_ttl`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, deferred: DeferredTasks, notice_ttl: Duration) -> Self {
        Self {
            transport,
            deferred,
            notice_ttl,
        }
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Runs `actions` one after another.
    pub async fn execute(&self, actions: Vec<Action>) {
        for action in actions {
            self.execute_one(action).await;
        }
    }

    async fn execute_one(&self, action: Action) {
        match action {
            Action::Send {
                channel_id,
                content,
                lifetime,
            } => match self.transport.send(channel_id, &content).await {
                Ok(sent) => self.keep_for(sent, lifetime),
                Err(e) => warn!(channel = %channel_id, "Failed to send message: {}", e),
            },
            Action::Reply {
                to,
                content,
                lifetime,
            } => match self.transport.reply(to, &content).await {
                Ok(sent) => self.keep_for(sent, lifetime),
                Err(e) => warn!(message = %to, "Failed to reply: {}", e),
            },
            Action::Delete { message } => {
                if let Err(e) = self.transport.delete(message).await {
                    warn!(%message, "Failed to delete message: {}", e);
                }
            }
            Action::Pong { to, sent_at } => {
                let sent = match self.transport.reply(to, notice::PINGING).await {
                    Ok(sent) => sent,
                    Err(e) => {
                        warn!(message = %to, "Failed to answer ping: {}", e);
                        return;
                    }
                };

                let latency = (sent.created_at - sent_at).num_milliseconds().max(0);
                if let Err(e) = self.transport.edit(sent.message, &notice::pong(latency)).await {
                    warn!(message = %sent.message, "Failed to edit ping reply: {}", e);
                }
                self.keep_for(sent, Lifetime::Transient);
            }
        }
    }

    fn keep_for(&self, sent: SentMessage, lifetime: Lifetime) {
        if lifetime == Lifetime::Transient {
            self.delete_after(sent.message, self.notice_ttl);
        }
    }

    /// Deletes `message` after `delay`; failures are logged and ignored.
    pub fn delete_after(&self, message: MessageRef, delay: Duration) -> DeferredHandle {
        let transport = Arc::clone(&self.transport);
        self.deferred.schedule("delete-message", delay, async move {
            match transport.delete(message).await {
                Ok(()) => debug!(%message, "Expired message deleted"),
                Err(e) => warn!(%message, "Failed to delete expired message: {}", e),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingTransport, TransportCall};
    use chrono::Utc;
    use informal_common::test_utils::discord_fixtures::{next_message_id, test_channel_id};

    const TTL: Duration = Duration::from_secs(120);

    fn dispatcher() -> (Dispatcher, Arc<RecordingTransport>, DeferredTasks) {
        let transport = Arc::new(RecordingTransport::new());
        let deferred = DeferredTasks::new();
        let dispatcher = Dispatcher::new(transport.clone(), deferred.clone(), TTL);
        (dispatcher, transport, deferred)
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_notices_expire() {
        let (dispatcher, transport, _deferred) = dispatcher();
        dispatcher
            .execute(vec![Action::notice(test_channel_id(), "hint")])
            .await;

        let sent = transport.created();
        assert_eq!(sent.len(), 1);

        tokio::time::sleep(TTL - Duration::from_secs(1)).await;
        assert!(transport.deleted().is_empty());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(transport.deleted(), sent);
    }

    #[tokio::test(start_paused = true)]
    async fn test_announcements_are_kept() {
        let (dispatcher, transport, _deferred) = dispatcher();
        dispatcher
            .execute(vec![Action::announce(test_channel_id(), "roster")])
            .await;

        tokio::time::sleep(TTL * 3).await;
        assert!(transport.deleted().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_actions_run_in_order() {
        let (dispatcher, transport, _deferred) = dispatcher();
        let offending = MessageRef::new(test_channel_id(), next_message_id());

        dispatcher
            .execute(vec![
                Action::delete(offending),
                Action::notice(test_channel_id(), "closed"),
            ])
            .await;

        let calls = transport.calls();
        assert_eq!(calls[0], TransportCall::Delete { message: offending });
        assert!(matches!(&calls[1], TransportCall::Send { content, .. } if content == "closed"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_delete_does_not_stop_batch() {
        let (dispatcher, transport, _deferred) = dispatcher();
        transport.fail_deletes(true);
        let offending = MessageRef::new(test_channel_id(), next_message_id());

        dispatcher
            .execute(vec![
                Action::delete(offending),
                Action::notice(test_channel_id(), "still sent"),
            ])
            .await;

        assert_eq!(transport.created().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pong_edits_in_latency() {
        let (dispatcher, transport, _deferred) = dispatcher();
        let ping = MessageRef::new(test_channel_id(), next_message_id());

        dispatcher
            .execute(vec![Action::Pong {
                to: ping,
                sent_at: Utc::now(),
            }])
            .await;

        let calls = transport.calls();
        assert!(matches!(&calls[0], TransportCall::Reply { to, content, .. } if *to == ping && content == notice::PINGING));
        assert!(matches!(&calls[1], TransportCall::Edit { content, .. } if content.contains("ms")));

        tokio::time::sleep(TTL + Duration::from_secs(1)).await;
        assert_eq!(transport.deleted().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_expiry() {
        let (dispatcher, transport, deferred) = dispatcher();
        dispatcher
            .execute(vec![Action::notice(test_channel_id(), "hint")])
            .await;

        deferred.shutdown();
        tokio::time::sleep(TTL * 2).await;
        assert!(transport.deleted().is_empty());
    }
}
