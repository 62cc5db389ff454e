//! Inbound message events and the outbound actions they produce.

use chrono::{DateTime, Utc};
use informal_common::{ChannelId, GuildId, MessageRef, UserId};

/// How long a bot message stays in the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Deleted automatically after the notice TTL.
    Transient,
    /// Left in place.
    Permanent,
}

/// A message posted in a channel, as seen by the registration core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Where the message lives.
    pub message: MessageRef,
    /// Guild the channel belongs to; `None` for direct messages.
    pub guild_id: Option<GuildId>,
    /// Author of the message.
    pub author: UserId,
    /// Whether the author is a bot account.
    pub author_is_bot: bool,
    /// Resolved display name of the author.
    pub author_name: String,
    /// Raw message text.
    pub content: String,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

impl IncomingMessage {
    /// Channel the message was posted in.
    #[must_use]
    pub const fn channel_id(&self) -> ChannelId {
        self.message.channel_id
    }
}

/// Something the bot must do in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Post a new message in a channel.
    Send {
        /// Target channel.
        channel_id: ChannelId,
        /// Message text.
        content: String,
        /// Whether the message expires.
        lifetime: Lifetime,
    },
    /// Reply to an existing message.
    Reply {
        /// Message replied to.
        to: MessageRef,
        /// Message text.
        content: String,
        /// Whether the reply expires.
        lifetime: Lifetime,
    },
    /// Delete a message.
    Delete {
        /// Message to delete.
        message: MessageRef,
    },
    /// Reply with a placeholder, then edit in the round-trip latency.
    Pong {
        /// Message that asked for the ping.
        to: MessageRef,
        /// Creation time of that message.
        sent_at: DateTime<Utc>,
    },
}

impl Action {
    /// A transient notice in `channel_id`.
    #[must_use]
    pub fn notice(channel_id: ChannelId, content: impl Into<String>) -> Self {
        Self::Send {
            channel_id,
            content: content.into(),
            lifetime: Lifetime::Transient,
        }
    }

    /// A permanent announcement in `channel_id`.
    #[must_use]
    pub fn announce(channel_id: ChannelId, content: impl Into<String>) -> Self {
        Self::Send {
            channel_id,
            content: content.into(),
            lifetime: Lifetime::Permanent,
        }
    }

    /// A transient reply to `to`.
    #[must_use]
    pub fn reply(to: MessageRef, content: impl Into<String>) -> Self {
        Self::Reply {
            to,
            content: content.into(),
            lifetime: Lifetime::Transient,
        }
    }

    /// Deletion of `message`.
    #[must_use]
    pub const fn delete(message: MessageRef) -> Self {
        Self::Delete { message }
    }

    /// Text carried by the action, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Send { content, .. } | Self::Reply { content, .. } => Some(content),
            Self::Delete { .. } | Self::Pong { .. } => None,
        }
    }
}
