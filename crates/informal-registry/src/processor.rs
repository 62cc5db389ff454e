//! The registration state machine.
//!
//! [`RegistrationEngine`] owns the channel store, the schedule and the
//! command registry. Each event is evaluated synchronously and turned into
//! a list of [`Action`]s; nothing here performs I/O.

use crate::action::{Action, IncomingMessage};
use crate::commands::{CommandContext, CommandRegistry};
use crate::notice;
use crate::roster;
use crate::schedule::{BoundaryKind, ScheduleError, WindowSchedule};
use crate::store::ChannelStore;
use crate::window::{RegisterRejection, RegistrationWindow};
use chrono::{DateTime, FixedOffset};
use informal_common::{ChannelId, Clock};
use informal_config::RegistrationConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// Registration token.
pub const REGISTER_TOKEN: &str = "+";

/// Cancellation token.
pub const CANCEL_TOKEN: &str = "-";

/// How a message was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Bot author or unmonitored channel.
    Ignored,
    /// Rejected because the window is closed.
    Closed,
    /// Handled by the named text command.
    Command(String),
    /// The author gave up their slot.
    Cancelled,
    /// `-` from someone without a slot.
    NotRegistered,
    /// The author already holds a slot.
    Duplicate,
    /// Every slot is taken.
    Full,
    /// Anything other than `+`.
    Malformed,
    /// The author took the given 1-based slot.
    Registered(usize),
    /// The author took the last slot.
    Completed,
}

/// Result of processing one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    /// Classification of the message.
    pub outcome: MessageOutcome,
    /// Whether the window was reset before the message was evaluated.
    pub reset: bool,
    /// What the bot must do, in order.
    pub actions: Vec<Action>,
}

impl Processed {
    const fn ignored() -> Self {
        Self {
            outcome: MessageOutcome::Ignored,
            reset: false,
            actions: Vec::new(),
        }
    }
}

/// Channel state, schedule and command registry behind one owner.
pub struct RegistrationEngine {
    pub(crate) store: ChannelStore,
    pub(crate) schedule: WindowSchedule,
    pub(crate) commands: CommandRegistry,
    pub(crate) capacity: usize,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RegistrationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationEngine")
            .field("store", &self.store)
            .field("schedule", &self.schedule)
            .field("commands", &self.commands)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl RegistrationEngine {
    /// Creates an engine with an empty store and the built-in commands.
    #[must_use]
    pub fn new(schedule: WindowSchedule, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: ChannelStore::new(),
            schedule,
            commands: CommandRegistry::with_builtins(),
            capacity,
            clock,
        }
    }

    /// Creates an engine from the registration configuration.
    pub fn from_config(
        config: &RegistrationConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ScheduleError> {
        Ok(Self::new(
            WindowSchedule::from_config(config)?,
            config.capacity,
            clock,
        ))
    }

    /// Replaces the channel store.
    #[must_use]
    pub fn with_store(mut self, store: ChannelStore) -> Self {
        self.store = store;
        self
    }

    /// Replaces the command registry.
    #[must_use]
    pub fn with_commands(mut self, commands: CommandRegistry) -> Self {
        self.commands = commands;
        self
    }

    /// Channel state.
    #[must_use]
    pub const fn store(&self) -> &ChannelStore {
        &self.store
    }

    /// Window schedule.
    #[must_use]
    pub const fn schedule(&self) -> &WindowSchedule {
        &self.schedule
    }

    /// Text commands recognized in monitored channels.
    #[must_use]
    pub const fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Slots per window.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current local time.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.schedule.local(self.clock.now_utc())
    }

    /// Starts monitoring `channel` lazily; its window is created on first use.
    pub fn watch(&mut self, channel: ChannelId) -> bool {
        self.store.mark_active(channel)
    }

    fn opened_notice(&self, window: &RegistrationWindow, now: DateTime<FixedOffset>) -> String {
        notice::window_opened(
            &roster::render(Some(window), self.capacity),
            self.capacity,
            &self.schedule.next_boundary(now, BoundaryKind::Close),
        )
    }

    /// Resets the window of `channel` when a new opening boundary has been
    /// reached, returning the announcement to post.
    fn reset_if_due(&mut self, channel: ChannelId, now: DateTime<FixedOffset>) -> Option<Action> {
        let boundary = self.schedule.current_boundary(now);
        let window = self.store.get_or_init(channel, boundary)?;
        if !self.schedule.should_reset(window.last_reset(), now) {
            return None;
        }

        window.reset(boundary);
        info!(%channel, boundary = %boundary, "Registration window reset");

        let window = self.store.get(channel)?;
        Some(Action::announce(channel, self.opened_notice(window, now)))
    }

    /// Evaluates one message posted in a channel.
    pub fn handle_message(&mut self, message: &IncomingMessage) -> Processed {
        let channel = message.channel_id();
        if message.author_is_bot || !self.store.is_active(channel) {
            return Processed::ignored();
        }

        let now = self.now();
        let mut actions = Vec::new();
        let reset = match self.reset_if_due(channel, now) {
            Some(action) => {
                actions.push(action);
                true
            }
            None => false,
        };

        let outcome = self.evaluate(message, now, &mut actions);
        debug!(%channel, author = %message.author, ?outcome, "Message processed");

        Processed {
            outcome,
            reset,
            actions,
        }
    }

    fn evaluate(
        &mut self,
        message: &IncomingMessage,
        now: DateTime<FixedOffset>,
        actions: &mut Vec<Action>,
    ) -> MessageOutcome {
        let channel = message.channel_id();
        let author = message.author;
        let content = message.content.trim();
        let capacity = self.capacity;
        let boundary = self.schedule.current_boundary(now);

        let Self {
            store,
            schedule,
            commands,
            ..
        } = self;

        let Some(last_reset) = store.get_or_init(channel, boundary).map(|w| w.last_reset()) else {
            return MessageOutcome::Ignored;
        };
        let command = commands.lookup(content);
        let next_open = schedule.next_boundary(now, BoundaryKind::Open);

        if !schedule.is_open(last_reset, now) && command.is_none() {
            actions.push(Action::delete(message.message));
            actions.push(Action::notice(channel, notice::closed(author, &next_open)));
            return MessageOutcome::Closed;
        }

        if let Some((command, args)) = command {
            let ctx = CommandContext {
                message,
                args: &args,
                store,
                schedule,
                now,
                capacity,
                commands,
            };
            actions.extend(command.execute(&ctx));
            return MessageOutcome::Command(command.name().to_string());
        }

        let Some(window) = store.get_mut(channel) else {
            return MessageOutcome::Ignored;
        };

        if content == CANCEL_TOKEN {
            if window.cancel(author) {
                let roster = roster::render(Some(&*window), capacity);
                actions.push(Action::notice(
                    channel,
                    notice::cancelled(author, window.len(), capacity, &roster),
                ));
                return MessageOutcome::Cancelled;
            }
            actions.push(Action::notice(channel, notice::not_registered(author)));
            return MessageOutcome::NotRegistered;
        }

        if window.contains(author) {
            actions.push(Action::delete(message.message));
            actions.push(Action::notice(
                channel,
                notice::already_registered(author, &next_open, &roster::render(Some(&*window), capacity)),
            ));
            return MessageOutcome::Duplicate;
        }

        if window.len() >= capacity {
            actions.push(Action::delete(message.message));
            actions.push(Action::notice(
                channel,
                notice::full(author, capacity, &next_open, &roster::render(Some(&*window), capacity)),
            ));
            return MessageOutcome::Full;
        }

        if content != REGISTER_TOKEN {
            actions.push(Action::delete(message.message));
            actions.push(Action::notice(channel, notice::malformed(author)));
            return MessageOutcome::Malformed;
        }

        match window.register(author, message.author_name.clone(), capacity) {
            Ok(slot) if slot == capacity => {
                info!(%channel, "Roster complete");
                actions.push(Action::announce(
                    channel,
                    notice::roster_complete(capacity, &next_open, &roster::render(Some(&*window), capacity)),
                ));
                MessageOutcome::Completed
            }
            Ok(slot) => {
                actions.push(Action::notice(
                    channel,
                    notice::registered(author, slot, capacity, &roster::render(Some(&*window), capacity)),
                ));
                MessageOutcome::Registered(slot)
            }
            Err(RegisterRejection::AlreadyRegistered) => MessageOutcome::Duplicate,
            Err(RegisterRejection::Full) => MessageOutcome::Full,
        }
    }

    /// Per-minute re-evaluation of every monitored channel. Posts the opening
    /// roster when a window resets and, at the closing minute, one closing
    /// notice per window.
    pub fn tick(&mut self) -> Vec<Action> {
        let now = self.now();
        let channels: Vec<ChannelId> = self.store.active_channels().collect();
        let mut actions = Vec::new();

        for channel in channels {
            if let Some(action) = self.reset_if_due(channel, now) {
                actions.push(action);
                continue;
            }

            let capacity = self.capacity;
            let schedule = self.schedule;
            let Some(window) = self.store.get_mut(channel) else {
                continue;
            };

            if schedule.is_closing_mark(window.last_reset(), now) && !window.closing_announced() {
                window.mark_closing_announced();
                info!(%channel, registered = window.len(), "Registration window closed");
                actions.push(Action::announce(
                    channel,
                    notice::window_closed(
                        &roster::render(Some(&*window), capacity),
                        window.len(),
                        capacity,
                        &schedule.next_boundary(now, BoundaryKind::Open),
                    ),
                ));
            }
        }

        actions
    }
}
