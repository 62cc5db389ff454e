//! Active channels and their windows.

use crate::window::RegistrationWindow;
use chrono::{DateTime, FixedOffset};
use informal_common::ChannelId;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Tracks which channels are monitored and the window of each.
///
/// A window only exists for an active channel. An active channel may be
/// temporarily without a window; one is created on first use.
#[derive(Debug, Default, Clone)]
pub struct ChannelStore {
    active: BTreeSet<ChannelId>,
    windows: HashMap<ChannelId, RegistrationWindow>,
}

impl ChannelStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store over existing state. Windows of channels that are not
    /// in `active` are dropped.
    #[must_use]
    pub fn from_parts(
        active: impl IntoIterator<Item = ChannelId>,
        mut windows: HashMap<ChannelId, RegistrationWindow>,
    ) -> Self {
        let active: BTreeSet<ChannelId> = active.into_iter().collect();
        windows.retain(|channel, _| active.contains(channel));
        Self { active, windows }
    }

    /// Activates `channel` with a fresh window starting at `boundary`.
    /// Re-initializes the window if the channel was already active; returns
    /// whether it was.
    pub fn activate(&mut self, channel: ChannelId, boundary: DateTime<FixedOffset>) -> bool {
        let was_active = !self.active.insert(channel);
        self.windows
            .insert(channel, RegistrationWindow::new(boundary));
        debug!(%channel, was_active, "Channel activated");
        was_active
    }

    /// Marks `channel` active without creating its window yet.
    pub fn mark_active(&mut self, channel: ChannelId) -> bool {
        self.active.insert(channel)
    }

    /// Stops monitoring `channel` and drops its window. Returns whether it
    /// was active.
    pub fn deactivate(&mut self, channel: ChannelId) -> bool {
        self.windows.remove(&channel);
        let was_active = self.active.remove(&channel);
        debug!(%channel, was_active, "Channel deactivated");
        was_active
    }

    /// Whether `channel` is monitored.
    #[must_use]
    pub fn is_active(&self, channel: ChannelId) -> bool {
        self.active.contains(&channel)
    }

    /// Monitored channels in ascending ID order.
    pub fn active_channels(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.active.iter().copied()
    }

    /// Number of monitored channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no channel is monitored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// The window of `channel`, if one exists.
    #[must_use]
    pub fn get(&self, channel: ChannelId) -> Option<&RegistrationWindow> {
        self.windows.get(&channel)
    }

    /// Mutable access to the window of `channel`, if one exists.
    pub fn get_mut(&mut self, channel: ChannelId) -> Option<&mut RegistrationWindow> {
        self.windows.get_mut(&channel)
    }

    /// The window of an active channel, created at `boundary` when missing.
    /// `None` when the channel is not active.
    pub fn get_or_init(
        &mut self,
        channel: ChannelId,
        boundary: DateTime<FixedOffset>,
    ) -> Option<&mut RegistrationWindow> {
        if !self.active.contains(&channel) {
            return None;
        }

        Some(self.windows.entry(channel).or_insert_with(|| {
            debug!(%channel, "Creating missing window for active channel");
            RegistrationWindow::new(boundary)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use informal_common::UserId;

    fn boundary(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(6 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, hour, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_activate_and_deactivate() {
        let mut store = ChannelStore::new();
        let channel = ChannelId(1);

        assert!(!store.activate(channel, boundary(10)));
        assert!(store.is_active(channel));
        assert_eq!(store.get(channel).unwrap().last_reset(), boundary(10));

        assert!(store.deactivate(channel));
        assert!(!store.is_active(channel));
        assert!(store.get(channel).is_none());
        assert!(!store.deactivate(channel));
    }

    #[test]
    fn test_reactivation_reinitializes() {
        let mut store = ChannelStore::new();
        let channel = ChannelId(1);
        store.activate(channel, boundary(10));
        store
            .get_mut(channel)
            .unwrap()
            .register(UserId(7), "seven", 10)
            .unwrap();

        assert!(store.activate(channel, boundary(11)));

        let window = store.get(channel).unwrap();
        assert!(window.is_empty());
        assert_eq!(window.last_reset(), boundary(11));
    }

    #[test]
    fn test_get_or_init_only_for_active_channels() {
        let mut store = ChannelStore::new();
        assert!(store.get_or_init(ChannelId(1), boundary(10)).is_none());

        store.mark_active(ChannelId(1));
        assert!(store.get(ChannelId(1)).is_none());
        assert!(store.get_or_init(ChannelId(1), boundary(10)).is_some());
        assert!(store.get(ChannelId(1)).is_some());
    }

    #[test]
    fn test_from_parts_drops_orphan_windows() {
        let mut windows = HashMap::new();
        windows.insert(ChannelId(1), RegistrationWindow::new(boundary(10)));
        windows.insert(ChannelId(2), RegistrationWindow::new(boundary(10)));

        let store = ChannelStore::from_parts([ChannelId(1)], windows);

        assert!(store.get(ChannelId(1)).is_some());
        assert!(store.get(ChannelId(2)).is_none());
        assert_eq!(store.active_channels().collect::<Vec<_>>(), vec![ChannelId(1)]);
    }

    #[test]
    fn test_instances_are_isolated() {
        let mut first = ChannelStore::new();
        let second = ChannelStore::new();
        first.activate(ChannelId(1), boundary(10));
        assert!(second.is_empty());
        assert_eq!(first.len(), 1);
    }
}
