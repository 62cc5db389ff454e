//! `/registration`: start, stop or inspect tracking in the current channel.

use crate::convert::channel_id;
use crate::framework::{Context, Error};
use informal_common::ChannelId;
use informal_registry::RegistrationEngine;
use parking_lot::Mutex;
use tracing::info;

/// What `/registration` should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum RegistrationAction {
    /// Begin tracking with a fresh window.
    #[name = "start"]
    Start,
    /// Stop tracking and discard the roster.
    #[name = "stop"]
    Stop,
    /// Report the current window.
    #[name = "status"]
    Status,
}

/// Applies `action` to `channel` and returns the reply text.
pub fn apply(engine: &Mutex<RegistrationEngine>, channel: ChannelId, action: RegistrationAction) -> String {
    let mut engine = engine.lock();
    match action {
        RegistrationAction::Start => engine.start(channel),
        RegistrationAction::Stop => engine.stop(channel),
        RegistrationAction::Status => engine.status(channel),
    }
}

/// Manage hourly registration in this channel.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    default_member_permissions = "MANAGE_MESSAGES"
)]
pub async fn registration(
    ctx: Context<'_>,
    #[description = "start, stop or status"] action: RegistrationAction,
) -> Result<(), Error> {
    let channel = channel_id(ctx.channel_id());
    info!(%channel, user = %ctx.author().name, ?action, "/registration invoked");

    let reply = apply(&ctx.data().engine, channel, action);
    ctx.say(reply).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use informal_common::test_utils::discord_fixtures::test_channel_id;
    use informal_common::test_utils::manual_clock_at;
    use informal_common::fixed_offset;
    use informal_registry::{ChannelState, WindowSchedule};

    fn engine() -> Mutex<RegistrationEngine> {
        let schedule = WindowSchedule::new(30, 45, fixed_offset(6)).unwrap();
        Mutex::new(RegistrationEngine::new(
            schedule,
            10,
            manual_clock_at(2026, 10, 18, 9, 40),
        ))
    }

    #[test]
    fn test_start_status_stop() {
        let engine = engine();
        let channel = test_channel_id();

        assert!(apply(&engine, channel, RegistrationAction::Status).contains("inactive"));

        apply(&engine, channel, RegistrationAction::Start);
        assert_eq!(engine.lock().state(channel), ChannelState::Tracking { open: true });
        assert!(apply(&engine, channel, RegistrationAction::Status).contains("0/10"));

        apply(&engine, channel, RegistrationAction::Stop);
        assert_eq!(engine.lock().state(channel), ChannelState::Inactive);
    }

    #[test]
    fn test_choice_names() {
        use poise::ChoiceParameter;

        assert_eq!(RegistrationAction::Start.name(), "start");
        assert_eq!(RegistrationAction::list().len(), 3);
    }
}
