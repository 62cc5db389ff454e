//! Text commands recognized inside monitored channels.
//!
//! A command is a message starting with `!`; the first whitespace separated
//! token (case-insensitive) names the command and the rest are arguments.
//! Commands are resolved through a [`CommandRegistry`] so new ones can be
//! plugged in without touching the state machine.

use crate::action::{Action, IncomingMessage};
use crate::admin::status_report;
use crate::schedule::{BoundaryKind, WindowSchedule};
use crate::store::ChannelStore;
use chrono::{DateTime, FixedOffset};
use informal_common::format_readable;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Prefix marking a text command.
pub const PREFIX: char = '!';

/// Everything a command may look at while it runs.
pub struct CommandContext<'a> {
    /// The message that invoked the command.
    pub message: &'a IncomingMessage,
    /// Arguments after the command name.
    pub args: &'a [&'a str],
    /// Current channel state.
    pub store: &'a ChannelStore,
    /// Window schedule.
    pub schedule: &'a WindowSchedule,
    /// Current local time.
    pub now: DateTime<FixedOffset>,
    /// Slots per window.
    pub capacity: usize,
    /// Registry the command was resolved from.
    pub commands: &'a CommandRegistry,
}

/// A `!name` command.
pub trait PrefixCommand: Send + Sync {
    /// Lower-case name, without the prefix.
    fn name(&self) -> &'static str;

    /// One line shown by `!help`.
    fn description(&self) -> &'static str;

    /// Produces the actions answering the command.
    fn execute(&self, ctx: &CommandContext<'_>) -> Vec<Action>;
}

/// A message split into command name and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Lower-cased command name.
    pub name: String,
    /// Remaining whitespace separated tokens.
    pub args: Vec<&'a str>,
}

/// Splits `content` into a command, if it starts with the prefix.
#[must_use]
pub fn parse(content: &str) -> Option<ParsedCommand<'_>> {
    let body = content.trim().strip_prefix(PREFIX)?;
    let mut tokens = body.split_whitespace();
    let name = tokens.next()?.to_lowercase();
    Some(ParsedCommand {
        name,
        args: tokens.collect(),
    })
}

/// Name to command lookup.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Arc<dyn PrefixCommand>>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `!ping`, `!help`, `!stats` and `!status`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(PingCommand);
        registry.register(HelpCommand);
        registry.register(StatsCommand);
        registry.register(StatusCommand);
        registry
    }

    /// Adds `command`, returning the one it replaced.
    pub fn register(&mut self, command: impl PrefixCommand + 'static) -> Option<Arc<dyn PrefixCommand>> {
        self.commands
            .insert(command.name().to_lowercase(), Arc::new(command))
    }

    /// Command registered under `name` (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn PrefixCommand>> {
        self.commands.get(&name.to_lowercase()).cloned()
    }

    /// Resolves `content` to a registered command and its arguments.
    #[must_use]
    pub fn lookup<'a>(&self, content: &'a str) -> Option<(Arc<dyn PrefixCommand>, Vec<&'a str>)> {
        let parsed = parse(content)?;
        self.commands
            .get(&parsed.name)
            .map(|command| (Arc::clone(command), parsed.args))
    }

    /// One `• !name description` line per command.
    #[must_use]
    pub fn describe(&self) -> String {
        self.iter()
            .map(|command| format!("• `{PREFIX}{}` {}", command.name(), command.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Registered commands in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn PrefixCommand>> {
        self.commands.values()
    }
}

/// `!ping`: round-trip latency.
pub struct PingCommand;

impl PrefixCommand for PingCommand {
    fn name(&self) -> &'static str {
        "ping"
    }

    fn description(&self) -> &'static str {
        "Check that the bot is responding"
    }

    fn execute(&self, ctx: &CommandContext<'_>) -> Vec<Action> {
        vec![Action::Pong {
            to: ctx.message.message,
            sent_at: ctx.message.created_at,
        }]
    }
}

/// `!help`: how registration works and which commands exist.
pub struct HelpCommand;

impl PrefixCommand for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "Show how registration works"
    }

    fn execute(&self, ctx: &CommandContext<'_>) -> Vec<Action> {
        let content = crate::notice::help(
            ctx.capacity,
            ctx.schedule.open_minute(),
            ctx.schedule.close_minute(),
            &ctx.commands.describe(),
        );

        vec![Action::reply(ctx.message.message, content)]
    }
}

/// `!stats`: counters of the current window.
pub struct StatsCommand;

impl PrefixCommand for StatsCommand {
    fn name(&self) -> &'static str {
        "stats"
    }

    fn description(&self) -> &'static str {
        "Show counters for the current window"
    }

    fn execute(&self, ctx: &CommandContext<'_>) -> Vec<Action> {
        let channel = ctx.message.channel_id();
        let Some(window) = ctx.store.get(channel) else {
            return vec![Action::reply(
                ctx.message.message,
                "📊 No window is being tracked in this channel yet.",
            )];
        };

        let content = format!(
            "📊 **Window stats**\n\
             • Registered: **{}/{}**\n\
             • Registrations this window: **{}**\n\
             • Window started: {}\n\
             • Next opening: {}\n\
             • Monitored channels: {}",
            window.len(),
            ctx.capacity,
            window.message_count(),
            format_readable(&window.last_reset()),
            format_readable(&ctx.schedule.next_boundary(ctx.now, BoundaryKind::Open)),
            ctx.store.len(),
        );

        vec![Action::reply(ctx.message.message, content)]
    }
}

/// `!status`: same report as `/registration status`.
pub struct StatusCommand;

impl PrefixCommand for StatusCommand {
    fn name(&self) -> &'static str {
        "status"
    }

    fn description(&self) -> &'static str {
        "Show whether registration is open and the roster"
    }

    fn execute(&self, ctx: &CommandContext<'_>) -> Vec<Action> {
        let report = status_report(
            ctx.store,
            ctx.schedule,
            ctx.message.channel_id(),
            ctx.now,
            ctx.capacity,
        );
        vec![Action::reply(ctx.message.message, report)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let parsed = parse("  !PING now please ").unwrap();
        assert_eq!(parsed.name, "ping");
        assert_eq!(parsed.args, vec!["now", "please"]);

        assert!(parse("ping").is_none());
        assert!(parse("!").is_none());
        assert!(parse("+").is_none());
    }

    #[test]
    fn test_builtins_are_case_insensitive() {
        let registry = CommandRegistry::with_builtins();
        for text in ["!ping", "!HELP", "!Stats", "!status"] {
            assert!(registry.lookup(text).is_some(), "{text}");
        }
        assert!(registry.lookup("!unknown").is_none());
        assert!(registry.lookup("hello").is_none());
    }

    struct Echo;

    impl PrefixCommand for Echo {
        fn name(&self) -> &'static str {
            "Echo"
        }

        fn description(&self) -> &'static str {
            "Repeat the arguments"
        }

        fn execute(&self, ctx: &CommandContext<'_>) -> Vec<Action> {
            vec![Action::reply(ctx.message.message, ctx.args.join(" "))]
        }
    }

    #[test]
    fn test_pluggable_command() {
        let mut registry = CommandRegistry::with_builtins();
        assert!(registry.register(Echo).is_none());

        let (command, args) = registry.lookup("!echo a b").unwrap();
        assert_eq!(command.name(), "Echo");
        assert_eq!(args, vec!["a", "b"]);
        assert_eq!(registry.iter().count(), 5);
    }
}
