//! Wall-clock access and the fixed display offset.
//!
//! Every time-dependent decision in the bot goes through a [`Clock`] so the
//! window logic can be driven by a [`ManualClock`] in tests. Local time is a
//! constant offset from UTC (no daylight-saving rules).

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use parking_lot::Mutex;

/// Offset, in hours east of UTC, used when no other offset is configured.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 6;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Builds the fixed offset for `hours` east of UTC, falling back to UTC for
/// out-of-range values.
#[must_use]
pub fn fixed_offset(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// Shifts a UTC instant into the fixed offset.
#[must_use]
pub fn shifted(instant: DateTime<Utc>, offset: FixedOffset) -> DateTime<FixedOffset> {
    instant.with_timezone(&offset)
}

/// Current instant read from `clock`, shifted into `offset`.
#[must_use]
pub fn now_shifted(clock: &dyn Clock, offset: FixedOffset) -> DateTime<FixedOffset> {
    shifted(clock.now_utc(), offset)
}

/// Short label for an offset, e.g. `GMT+6`, `GMT+5:30`, `GMT`.
#[must_use]
pub fn offset_label(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return "GMT".to_string();
    }

    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    let (hours, rest) = (minutes / 60, minutes % 60);
    if rest == 0 {
        format!("GMT{sign}{hours}")
    } else {
        format!("GMT{sign}{hours}:{rest:02}")
    }
}

/// Human readable rendering, e.g. `Sun, 18 Oct 2026 14:30 (GMT+6)`.
#[must_use]
pub fn format_readable(instant: &DateTime<FixedOffset>) -> String {
    format!(
        "{} ({})",
        instant.format("%a, %d %b %Y %H:%M"),
        offset_label(*instant.offset())
    )
}

/// Time of day only, e.g. `14:30`.
#[must_use]
pub fn format_clock(instant: &DateTime<FixedOffset>) -> String {
    instant.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_shifted_applies_constant_offset() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 1, 20, 15, 0).unwrap();
        let local = shifted(utc, fixed_offset(DEFAULT_UTC_OFFSET_HOURS));
        assert_eq!(local.hour(), 2);
        assert_eq!(local.minute(), 15);
        assert_eq!(local.with_timezone(&Utc), utc);
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        assert_eq!(fixed_offset(48).local_minus_utc(), 0);
    }

    #[test]
    fn test_offset_label() {
        assert_eq!(offset_label(fixed_offset(6)), "GMT+6");
        assert_eq!(offset_label(fixed_offset(-3)), "GMT-3");
        assert_eq!(offset_label(fixed_offset(0)), "GMT");
        let india = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(offset_label(india), "GMT+5:30");
    }

    #[test]
    fn test_format_readable() {
        let utc = Utc.with_ymd_and_hms(2026, 10, 18, 8, 30, 0).unwrap();
        let local = shifted(utc, fixed_offset(6));
        assert_eq!(format_readable(&local), "Sun, 18 Oct 2026 14:30 (GMT+6)");
        assert_eq!(format_clock(&local), "14:30");
    }

    #[test]
    fn test_manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        clock.advance(Duration::minutes(90));
        assert_eq!(clock.now_utc(), start + Duration::minutes(90));

        clock.set(start);
        assert_eq!(clock.now_utc(), start);
    }
}
