//! Poise framework setup and command registration logic.

use informal_registry::{Dispatcher, RegistrationEngine};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::error;

/// Registration engine shared by commands, events and the ticker.
///
/// The lock is held only while the engine decides; never across an `.await`.
pub type SharedEngine = Arc<Mutex<RegistrationEngine>>;

/// Application data accessible in all commands.
pub struct Data {
    /// Registration state of every channel.
    pub engine: SharedEngine,
    /// Performs the actions the engine produces.
    pub dispatcher: Dispatcher,
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("engine", &"<RegistrationEngine>")
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Reply sent when a slash command fails.
pub const COMMAND_FAILED: &str = "There was an error while executing this command.";

/// Every slash command of the bot.
#[must_use]
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        crate::registration::registration(),
        crate::ping::ping(),
        crate::help::help(),
    ]
}

/// Creates a new Poise framework.
///
/// Text commands are not parsed by Poise; channel messages go through
/// [`crate::events::event_handler`] to the registration engine instead.
pub fn create_framework() -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(poise::FrameworkOptions {
        commands: commands(),
        on_error: |error| Box::pin(on_error(error)),
        event_handler: |ctx, event, framework, data| {
            Box::pin(crate::events::event_handler(ctx, event, framework, data))
        },
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: None,
            mention_as_prefix: false,
            ..Default::default()
        },
        ..Default::default()
    })
}

/// Global error handler for the framework.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {:?}", ctx.command().name, error);
            let reply = poise::CreateReply::default()
                .content(COMMAND_FAILED)
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to report command error: {:?}", e);
            }
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(
                "Error in event handler for {:?}: {:?}",
                event.snake_case_name(),
                error
            );
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_set() {
        let names: Vec<String> = commands().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["registration", "ping", "help"]);
    }

    #[test]
    fn test_only_registration_needs_permissions() {
        for command in commands() {
            let restricted = !command.required_permissions.is_empty();
            assert_eq!(restricted, command.name == "registration", "{}", command.name);
        }
    }
}
