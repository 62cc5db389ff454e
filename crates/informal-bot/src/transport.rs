//! [`Transport`] over Serenity's HTTP client.

use async_trait::async_trait;
use informal_commands::convert::{message_ref, to_channel, to_message};
use informal_common::{ChannelId, MessageRef};
use informal_registry::{SentMessage, Transport, TransportError};
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Sends, edits and deletes messages through the Discord REST API.
#[derive(Clone)]
pub struct SerenityTransport {
    http: Arc<serenity::Http>,
}

impl std::fmt::Debug for SerenityTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerenityTransport").finish_non_exhaustive()
    }
}

impl SerenityTransport {
    /// Wraps the client's HTTP handle.
    #[must_use]
    pub const fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

fn channel(id: ChannelId) -> Result<serenity::ChannelId, TransportError> {
    to_channel(id).ok_or_else(|| TransportError::NotFound(format!("channel {id}")))
}

fn message(id: MessageRef) -> Result<(serenity::ChannelId, serenity::MessageId), TransportError> {
    to_message(id).ok_or_else(|| TransportError::NotFound(format!("message {id}")))
}

fn sent(msg: &serenity::Message) -> SentMessage {
    SentMessage {
        message: message_ref(msg.channel_id, msg.id),
        created_at: *msg.timestamp,
    }
}

/// Classifies a Serenity error by the HTTP status Discord answered with.
#[must_use]
pub fn classify(target: String, error: &serenity::Error) -> TransportError {
    let status = match error {
        serenity::Error::Http(http) => http.status_code().map(|code| code.as_u16()),
        _ => None,
    };

    match status {
        Some(403) => TransportError::Forbidden(target),
        Some(404) => TransportError::NotFound(target),
        _ => TransportError::Request(format!("{target}: {error}")),
    }
}

#[async_trait]
impl Transport for SerenityTransport {
    async fn send(&self, channel_id: ChannelId, content: &str) -> Result<SentMessage, TransportError> {
        let target = channel(channel_id)?;
        target
            .say(&*self.http, content)
            .await
            .map(|msg| sent(&msg))
            .map_err(|e| classify(format!("send to {channel_id}"), &e))
    }

    async fn reply(&self, to: MessageRef, content: &str) -> Result<SentMessage, TransportError> {
        let (target, reference) = message(to)?;
        let builder = serenity::CreateMessage::new()
            .content(content)
            .reference_message((target, reference));

        target
            .send_message(&*self.http, builder)
            .await
            .map(|msg| sent(&msg))
            .map_err(|e| classify(format!("reply to {to}"), &e))
    }

    async fn edit(&self, id: MessageRef, content: &str) -> Result<(), TransportError> {
        let (target, message_id) = message(id)?;
        target
            .edit_message(&*self.http, message_id, serenity::EditMessage::new().content(content))
            .await
            .map(|_| ())
            .map_err(|e| classify(format!("edit {id}"), &e))
    }

    async fn delete(&self, id: MessageRef) -> Result<(), TransportError> {
        let (target, message_id) = message(id)?;
        target
            .delete_message(&*self.http, message_id)
            .await
            .map_err(|e| classify(format!("delete {id}"), &e))
    }
}
