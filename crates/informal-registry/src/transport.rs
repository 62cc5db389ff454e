//! Outbound seam to the chat service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use informal_common::{ChannelId, MessageRef};
use thiserror::Error;

/// A message the bot posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentMessage {
    /// Where it was posted.
    pub message: MessageRef,
    /// When the service created it.
    pub created_at: DateTime<Utc>,
}

/// Failure of a single outbound call. Never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The bot lacks a permission for the call.
    #[error("missing permission for {0}")]
    Forbidden(String),

    /// The target message or channel does not exist (anymore).
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other failure.
    #[error("request failed: {0}")]
    Request(String),
}

/// Send / reply / edit / delete against the chat service.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Posts `content` in `channel`.
    async fn send(&self, channel: ChannelId, content: &str) -> Result<SentMessage, TransportError>;

    /// Replies to `to` with `content`.
    async fn reply(&self, to: MessageRef, content: &str) -> Result<SentMessage, TransportError>;

    /// Replaces the text of `message`.
    async fn edit(&self, message: MessageRef, content: &str) -> Result<(), TransportError>;

    /// Deletes `message`.
    async fn delete(&self, message: MessageRef) -> Result<(), TransportError>;
}
