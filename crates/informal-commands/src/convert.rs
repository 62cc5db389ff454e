//! Conversions between Serenity models and the registry's own types.

use informal_common::{ChannelId, GuildId, MessageId, MessageRef, UserId};
use informal_registry::IncomingMessage;
use poise::serenity_prelude as serenity;
use std::num::NonZeroU64;

/// Serenity channel id as a registry channel id.
#[must_use]
pub fn channel_id(id: serenity::ChannelId) -> ChannelId {
    ChannelId(id.get())
}

/// Serenity user id as a registry user id.
#[must_use]
pub fn user_id(id: serenity::UserId) -> UserId {
    UserId(id.get())
}

/// Registry channel id as a Serenity channel id; `None` for the invalid id 0.
#[must_use]
pub fn to_channel(id: ChannelId) -> Option<serenity::ChannelId> {
    NonZeroU64::new(id.0).map(serenity::ChannelId::from)
}

/// Registry guild id as a Serenity guild id; `None` for the invalid id 0.
#[must_use]
pub fn to_guild(id: GuildId) -> Option<serenity::GuildId> {
    NonZeroU64::new(id.0).map(serenity::GuildId::from)
}

/// Registry message reference as Serenity ids.
#[must_use]
pub fn to_message(message: MessageRef) -> Option<(serenity::ChannelId, serenity::MessageId)> {
    let channel = to_channel(message.channel_id)?;
    let id = NonZeroU64::new(message.message_id.0).map(serenity::MessageId::from)?;
    Some((channel, id))
}

/// Reference to a Serenity message.
#[must_use]
pub fn message_ref(channel: serenity::ChannelId, message: serenity::MessageId) -> MessageRef {
    MessageRef::new(ChannelId(channel.get()), MessageId(message.get()))
}

/// Builds the engine's view of `msg`.
#[must_use]
pub fn incoming(msg: &serenity::Message, author_name: String) -> IncomingMessage {
    IncomingMessage {
        message: message_ref(msg.channel_id, msg.id),
        guild_id: msg.guild_id.map(|guild| GuildId(guild.get())),
        author: user_id(msg.author.id),
        author_is_bot: msg.author.bot,
        author_name,
        content: msg.content.clone(),
        created_at: *msg.timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use informal_common::test_utils::discord_fixtures::{test_channel_id, test_guild_id};

    #[test]
    fn test_channel_round_trip() {
        let channel = test_channel_id();
        let serenity_channel = to_channel(channel).unwrap();
        assert_eq!(channel_id(serenity_channel), channel);
    }

    #[test]
    fn test_zero_ids_are_rejected() {
        assert!(to_channel(ChannelId(0)).is_none());
        assert!(to_guild(GuildId(0)).is_none());
        assert!(to_message(MessageRef::new(test_channel_id(), MessageId(0))).is_none());
        assert_eq!(to_guild(test_guild_id()).map(serenity::GuildId::get), Some(test_guild_id().0));
    }

    #[test]
    fn test_message_ref() {
        let (channel, message) = to_message(MessageRef::new(ChannelId(7), MessageId(9))).unwrap();
        assert_eq!(message_ref(channel, message), MessageRef::new(ChannelId(7), MessageId(9)));
    }
}
