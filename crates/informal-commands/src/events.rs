//! Gateway events: channel messages go to the registration engine.

use crate::convert::{channel_id, incoming};
use crate::framework::{Data, Error};
use informal_common::{display_name, ChannelId};
use informal_registry::{IncomingMessage, Processed, RegistrationEngine, REGISTER_TOKEN};
use parking_lot::Mutex;
use poise::serenity_prelude as serenity;
use tracing::info;

/// Central event handler for Discord events.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            on_message(new_message, data).await?;
        }
        serenity::FullEvent::GuildCreate { guild, is_new } => {
            info!(
                "Guild available: {} (ID: {}, new: {:?})",
                guild.name, guild.id, is_new
            );
        }
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("Bot ready event received for: {}", data_about_bot.user.name);
        }
        _ => {}
    }
    Ok(())
}

/// Whether `channel` is monitored.
pub fn is_watched(engine: &Mutex<RegistrationEngine>, channel: ChannelId) -> bool {
    engine.lock().store().is_active(channel)
}

/// Runs one message through the engine.
pub fn process(engine: &Mutex<RegistrationEngine>, message: &IncomingMessage) -> Processed {
    engine.lock().handle_message(message)
}

async fn on_message(msg: &serenity::Message, data: &Data) -> Result<(), Error> {
    if msg.author.bot || !is_watched(&data.engine, channel_id(msg.channel_id)) {
        return Ok(());
    }

    // Only a registration stores the name.
    let author_name = if msg.content.trim() == REGISTER_TOKEN {
        author_display_name(
            &msg.author.name,
            msg.member.as_ref().map(|member| member.nick.as_deref()),
        )
    } else {
        msg.author.name.clone()
    };

    let processed = process(&data.engine, &incoming(msg, author_name));
    data.dispatcher.execute(processed.actions).await;
    Ok(())
}

/// `username (nickname)` when the message carries the author's guild
/// nickname, otherwise the bare username.
///
/// `member` is the partial member attached to the gateway message. Nothing is
/// fetched, so a message is never delayed behind a later one in its channel.
#[must_use]
pub fn author_display_name(username: &str, member: Option<Option<&str>>) -> String {
    display_name(username, member.flatten())
}
