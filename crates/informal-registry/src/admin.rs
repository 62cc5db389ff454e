//! Start / stop / status for a channel.

use crate::notice;
use crate::processor::RegistrationEngine;
use crate::roster;
use crate::schedule::{BoundaryKind, WindowSchedule};
use crate::store::ChannelStore;
use crate::window::RegistrationWindow;
use chrono::{DateTime, FixedOffset};
use informal_common::{format_readable, ChannelId};
use tracing::info;

/// Tracking state of a channel as reported by `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Not monitored.
    Inactive,
    /// Monitored, window not created yet.
    Initializing,
    /// Monitored with a live window.
    Tracking {
        /// Whether registration is currently open.
        open: bool,
    },
}

/// Window of `channel` as the next message will see it: `None` when the
/// channel has no window or its reset is due but has not run yet.
fn live_window<'a>(
    store: &'a ChannelStore,
    schedule: &WindowSchedule,
    channel: ChannelId,
    now: DateTime<FixedOffset>,
) -> Option<&'a RegistrationWindow> {
    store
        .get(channel)
        .filter(|window| !schedule.should_reset(window.last_reset(), now))
}

/// Classifies `channel` at `now`.
///
/// A pending reset is reported as if it had already run, so the state matches
/// what a `+` sent at `now` would find.
#[must_use]
pub fn channel_state(
    store: &ChannelStore,
    schedule: &WindowSchedule,
    channel: ChannelId,
    now: DateTime<FixedOffset>,
) -> ChannelState {
    match store.get(channel) {
        Some(window) => {
            let last_reset = if schedule.should_reset(window.last_reset(), now) {
                schedule.current_boundary(now)
            } else {
                window.last_reset()
            };
            ChannelState::Tracking {
                open: schedule.is_open(last_reset, now),
            }
        }
        None if store.is_active(channel) => ChannelState::Initializing,
        None => ChannelState::Inactive,
    }
}

/// Human readable status of `channel`.
#[must_use]
pub fn status_report(
    store: &ChannelStore,
    schedule: &WindowSchedule,
    channel: ChannelId,
    now: DateTime<FixedOffset>,
    capacity: usize,
) -> String {
    match channel_state(store, schedule, channel, now) {
        ChannelState::Inactive => {
            "⚪ Registration tracking is **inactive** in this channel. Use `/registration start`."
                .to_string()
        }
        ChannelState::Initializing => {
            "🟡 Registration tracking is **initializing**; the window is created with the next message or tick."
                .to_string()
        }
        ChannelState::Tracking { open } => {
            let window = live_window(store, schedule, channel, now);
            let count = window.map_or(0, |w| w.len());
            let messages = window.map_or(0, |w| w.message_count());
            let (state, next) = if open {
                ("🟢 **Open**", schedule.next_boundary(now, BoundaryKind::Close))
            } else {
                ("🔴 **Closed**", schedule.next_boundary(now, BoundaryKind::Open))
            };
            let next_label = if open { "Closes" } else { "Opens" };

            format!(
                "{}\n\n{state}\n\
                 • Registered: **{count}/{capacity}**\n\
                 • Registrations this window: **{messages}**\n\
                 • {next_label}: {}\n\
                 • Now: {}\n\n{}",
                notice::HEADER,
                format_readable(&next),
                format_readable(&now),
                roster::render(window, capacity),
            )
        }
    }
}

impl RegistrationEngine {
    /// Activates `channel` with a fresh window and returns the capability
    /// summary to reply with.
    pub fn start(&mut self, channel: ChannelId) -> String {
        let now = self.now();
        let boundary = self.schedule.current_boundary(now);
        let was_active = self.store.activate(channel, boundary);
        info!(%channel, was_active, "Registration started");

        let open = self.schedule.is_open(boundary, now);
        let next = if open {
            self.schedule.next_boundary(now, BoundaryKind::Close)
        } else {
            self.schedule.next_boundary(now, BoundaryKind::Open)
        };

        notice::activated(
            was_active,
            self.capacity,
            self.schedule.open_minute(),
            self.schedule.close_minute(),
            open,
            &next,
        )
    }

    /// Deactivates `channel` and returns the confirmation to reply with.
    pub fn stop(&mut self, channel: ChannelId) -> String {
        let was_active = self.store.deactivate(channel);
        info!(%channel, was_active, "Registration stopped");
        notice::deactivated(was_active)
    }

    /// Current state of `channel`.
    #[must_use]
    pub fn state(&self, channel: ChannelId) -> ChannelState {
        channel_state(&self.store, &self.schedule, channel, self.now())
    }

    /// Status report for `channel`.
    #[must_use]
    pub fn status(&self, channel: ChannelId) -> String {
        status_report(&self.store, &self.schedule, channel, self.now(), self.capacity)
    }
}
