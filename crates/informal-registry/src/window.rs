//! The per-channel registration window.

use chrono::{DateTime, FixedOffset};
use informal_common::UserId;
use std::collections::HashMap;

/// Why a registration was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterRejection {
    /// The user already holds a slot.
    AlreadyRegistered,
    /// Every slot is taken.
    Full,
}

/// Roster and timestamps for one channel's current window.
///
/// Slots are assigned in registration order. The user list and the display
/// name map always hold exactly the same users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationWindow {
    registered: Vec<UserId>,
    display_names: HashMap<UserId, String>,
    message_count: u32,
    last_reset: DateTime<FixedOffset>,
    closing_announced: bool,
}

impl RegistrationWindow {
    /// Creates an empty window that started at `last_reset`.
    #[must_use]
    pub fn new(last_reset: DateTime<FixedOffset>) -> Self {
        Self {
            registered: Vec::new(),
            display_names: HashMap::new(),
            message_count: 0,
            last_reset,
            closing_announced: false,
        }
    }

    /// Registered users in slot order.
    #[must_use]
    pub fn registered(&self) -> &[UserId] {
        &self.registered
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Whether nobody is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Whether `user` holds a slot.
    #[must_use]
    pub fn contains(&self, user: UserId) -> bool {
        self.display_names.contains_key(&user)
    }

    /// Display name recorded for `user`.
    #[must_use]
    pub fn display_name(&self, user: UserId) -> Option<&str> {
        self.display_names.get(&user).map(String::as_str)
    }

    /// Display names in slot order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.registered
            .iter()
            .filter_map(|user| self.display_names.get(user).map(String::as_str))
    }

    /// Valid registrations processed in this window, net of cancellations.
    #[must_use]
    pub const fn message_count(&self) -> u32 {
        self.message_count
    }

    /// Start of the current window.
    #[must_use]
    pub const fn last_reset(&self) -> DateTime<FixedOffset> {
        self.last_reset
    }

    /// Adds `user` to the next free slot, returning the 1-based slot number.
    pub fn register(
        &mut self,
        user: UserId,
        display_name: impl Into<String>,
        capacity: usize,
    ) -> Result<usize, RegisterRejection> {
        if self.contains(user) {
            return Err(RegisterRejection::AlreadyRegistered);
        }
        if self.registered.len() >= capacity {
            return Err(RegisterRejection::Full);
        }

        self.registered.push(user);
        self.display_names.insert(user, display_name.into());
        self.message_count += 1;
        Ok(self.registered.len())
    }

    /// Removes `user`, returning whether they were registered.
    pub fn cancel(&mut self, user: UserId) -> bool {
        if self.display_names.remove(&user).is_none() {
            return false;
        }

        self.registered.retain(|registered| *registered != user);
        self.message_count = self.message_count.saturating_sub(1);
        true
    }

    /// Clears the roster and starts a new window at `boundary`.
    pub fn reset(&mut self, boundary: DateTime<FixedOffset>) {
        self.registered.clear();
        self.display_names.clear();
        self.message_count = 0;
        self.last_reset = boundary;
        self.closing_announced = false;
    }

    /// Whether the closing transition was already announced for this window.
    #[must_use]
    pub const fn closing_announced(&self) -> bool {
        self.closing_announced
    }

    /// Records that the closing transition has been announced.
    pub fn mark_closing_announced(&mut self) {
        self.closing_announced = true;
    }

    /// Checks that the roster and the name map agree.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.registered.len() == self.display_names.len()
            && self
                .registered
                .iter()
                .all(|user| self.display_names.contains_key(user))
    }
}
