//! Roster rendering.

use crate::window::RegistrationWindow;
use informal_common::{escape_markdown, truncate_string};

/// Longest display name shown in a slot.
pub const MAX_NAME_CHARS: usize = 32;

/// Text shown for an empty slot.
pub const EMPTY_SLOT: &str = "*open slot*";

/// Renders slots `1..=capacity`, filled slots first in registration order.
#[must_use]
pub fn render(window: Option<&RegistrationWindow>, capacity: usize) -> String {
    let mut names = window.into_iter().flat_map(|w| w.names());

    (1..=capacity)
        .map(|slot| match names.next() {
            Some(name) => format!(
                "`{slot:>2}.` {}",
                escape_markdown(&truncate_string(name, MAX_NAME_CHARS))
            ),
            None => format!("`{slot:>2}.` {EMPTY_SLOT}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
