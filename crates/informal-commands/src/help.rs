//! `/help`: how registration works plus every slash and text command.

use crate::framework::{Context, Error};
use informal_registry::{notice, RegistrationEngine};

const SLASH_COMMANDS: &str = "• `/registration start|stop|status` Manage tracking in this channel (Manage Messages)\n\
                              • `/ping` Check that the bot is responding\n\
                              • `/help` Show this message";

/// Help text built from the engine's configuration and text commands.
#[must_use]
pub fn help_text(engine: &RegistrationEngine) -> String {
    let commands = format!("{SLASH_COMMANDS}\n{}", engine.commands().describe());
    notice::help(
        engine.capacity(),
        engine.schedule().open_minute(),
        engine.schedule().close_minute(),
        &commands,
    )
}

/// Show how registration works and the available commands.
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let text = help_text(&ctx.data().engine.lock());
    ctx.say(text).await?;
    Ok(())
}
