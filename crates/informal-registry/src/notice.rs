//! Texts posted by the bot.

use chrono::{DateTime, FixedOffset};
use informal_common::{format_clock, format_readable, UserId};

/// Heading used on roster messages.
pub const HEADER: &str = "# 🎯 Informal Registration";

/// Footer used on help and capability summaries.
pub const FOOTER: &str = "---\n**Made by Zircon**";

/// A new window started; every slot is empty.
#[must_use]
pub fn window_opened(roster: &str, capacity: usize, closes_at: &DateTime<FixedOffset>) -> String {
    format!(
        "{HEADER}\n\n🔄 **Registration is open!** Type `+` to register, `-` to cancel.\n\
         Up to **{capacity}** people, until **{}**.\n\n{roster}",
        format_clock(closes_at)
    )
}

/// Posted once when the window closes.
#[must_use]
pub fn window_closed(roster: &str, count: usize, capacity: usize, next_open: &DateTime<FixedOffset>) -> String {
    format!(
        "{HEADER}\n\n🔒 **Registration is closed** with **{count}/{capacity}** registered.\n\
         Next window opens at **{}**.\n\n{roster}",
        format_readable(next_open)
    )
}

/// Input arrived while the window is closed.
#[must_use]
pub fn closed(user: UserId, next_open: &DateTime<FixedOffset>) -> String {
    format!(
        "⛔ {} registration is closed right now. Next window opens at **{}**.",
        user.mention(),
        format_readable(next_open)
    )
}

/// A cancellation went through.
#[must_use]
pub fn cancelled(user: UserId, count: usize, capacity: usize, roster: &str) -> String {
    format!(
        "↩️ {} your registration was cancelled. **{count}/{capacity}** registered.\n\n{roster}",
        user.mention()
    )
}

/// A cancellation from someone without a slot.
#[must_use]
pub fn not_registered(user: UserId) -> String {
    format!(
        "❓ {} you are not registered in this window, nothing to cancel.",
        user.mention()
    )
}

/// Someone with a slot tried again.
#[must_use]
pub fn already_registered(user: UserId, next_reset: &DateTime<FixedOffset>, roster: &str) -> String {
    format!(
        "⚠️ {} you are already registered. Next reset at **{}**.\n\n{roster}",
        user.mention(),
        format_readable(next_reset)
    )
}

/// Every slot is taken.
#[must_use]
pub fn full(user: UserId, capacity: usize, next_reset: &DateTime<FixedOffset>, roster: &str) -> String {
    format!(
        "🚫 {} all **{capacity}** slots are taken. Next reset at **{}**.\n\n{roster}",
        user.mention(),
        format_readable(next_reset)
    )
}

/// Anything other than `+`.
#[must_use]
pub fn malformed(user: UserId) -> String {
    format!("✏️ {} please enter `+` to register.", user.mention())
}

/// A registration went through and slots remain.
#[must_use]
pub fn registered(user: UserId, count: usize, capacity: usize, roster: &str) -> String {
    format!(
        "✅ {} you are registered! **{count}/{capacity}**\n\n{roster}",
        user.mention()
    )
}

/// The last slot was just taken.
#[must_use]
pub fn roster_complete(capacity: usize, next_reset: &DateTime<FixedOffset>, roster: &str) -> String {
    format!(
        "{HEADER}\n\n🎉 **Roster complete!** All **{capacity}** slots are filled.\n\
         Next window opens at **{}**.\n\n{roster}",
        format_readable(next_reset)
    )
}

/// Round-trip latency report for `!ping`.
#[must_use]
pub fn pong(latency_ms: i64) -> String {
    format!(
        "{HEADER}\n\n🏓 **Pong!**\n\n⏱️ **Round-trip latency:** {latency_ms}ms\n\
         ✅ **Bot is responding and active!**\n\n{FOOTER}"
    )
}

/// How registration works, followed by the given command list.
#[must_use]
pub fn help(capacity: usize, open_minute: u32, close_minute: u32, commands: &str) -> String {
    format!(
        "{HEADER}\n\n\
         **How it works**\n\
         • Type `+` to take a slot, `-` to give it back\n\
         • Up to **{capacity}** people per window\n\
         • The window is open every hour from minute **{open_minute:02}** to **{close_minute:02}**\n\n\
         **Commands**\n{commands}\n\n{FOOTER}"
    )
}

/// Placeholder posted before the latency is known.
pub const PINGING: &str = "🏓 Pinging...";

/// One-time message posted after connecting.
#[must_use]
pub fn startup(now: &DateTime<FixedOffset>) -> String {
    format!(
        "🤖 Bot is online ({}). This message removes itself shortly.",
        format_readable(now)
    )
}

/// Reply to `/registration start`.
#[must_use]
pub fn activated(
    was_active: bool,
    capacity: usize,
    open_minute: u32,
    close_minute: u32,
    open_now: bool,
    next: &DateTime<FixedOffset>,
) -> String {
    let lead = if was_active {
        "🔁 Registration tracking restarted for this channel, the roster was cleared."
    } else {
        "✅ Registration tracking started for this channel."
    };
    let state = if open_now {
        format!("🟢 Registration is **open** until **{}**.", format_clock(next))
    } else {
        format!("🔴 Registration is **closed**, next window opens at **{}**.", format_readable(next))
    };

    format!(
        "{lead}\n\n\
         • Type `+` to register, `-` to cancel\n\
         • Up to **{capacity}** people per window\n\
         • Window open every hour from minute **{open_minute:02}** to **{close_minute:02}**\n\
         • Other messages are removed and answered with a hint\n\
         • Commands: `!ping`, `!help`, `!stats`, `!status`\n\n\
         {state}"
    )
}

/// Reply to `/registration stop`.
#[must_use]
pub fn deactivated(was_active: bool) -> String {
    if was_active {
        "🛑 Registration tracking stopped for this channel. The roster was discarded.".to_string()
    } else {
        "ℹ️ Registration tracking was not active in this channel.".to_string()
    }
}
