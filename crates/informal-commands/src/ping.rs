//! `/ping`: round-trip latency through the interaction API.

use crate::framework::{Context, Error};
use informal_registry::notice;

/// Check that the bot is responding.
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let handle = ctx.say(notice::PINGING).await?;
    let sent = handle.message().await?;
    let latency = (*sent.timestamp - *ctx.created_at())
        .num_milliseconds()
        .max(0);

    handle
        .edit(ctx, poise::CreateReply::default().content(notice::pong(latency)))
        .await?;
    Ok(())
}
