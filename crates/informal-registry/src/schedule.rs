//! Hourly window math.
//!
//! Each hour (in the fixed local offset) has one registration window that
//! opens at `open_minute` and closes at `close_minute`. A channel's window
//! period runs from one opening boundary to the next; the roster is cleared
//! only when a new opening boundary is reached, never at closing.

use chrono::{DateTime, Duration, FixedOffset, Timelike, Utc};
use informal_config::RegistrationConfig;
use thiserror::Error;

/// Invalid window configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The marks do not describe a window inside one hour.
    #[error("invalid window marks: open minute {open} must be before close minute {close} (max 60)")]
    InvalidMarks {
        /// Configured open minute.
        open: u32,
        /// Configured close minute.
        close: u32,
    },
}

/// Which boundary of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    /// Registration opens.
    Open,
    /// Registration closes.
    Close,
}

/// Open/close marks plus the offset they are evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSchedule {
    open_minute: u32,
    close_minute: u32,
    offset: FixedOffset,
}

impl WindowSchedule {
    /// Creates a schedule; requires `open_minute < close_minute <= 60`.
    pub const fn new(
        open_minute: u32,
        close_minute: u32,
        offset: FixedOffset,
    ) -> Result<Self, ScheduleError> {
        if open_minute >= close_minute || close_minute > 60 {
            return Err(ScheduleError::InvalidMarks {
                open: open_minute,
                close: close_minute,
            });
        }

        Ok(Self {
            open_minute,
            close_minute,
            offset,
        })
    }

    /// Builds the schedule described by the registration configuration.
    pub fn from_config(config: &RegistrationConfig) -> Result<Self, ScheduleError> {
        Self::new(config.open_minute, config.close_minute, config.offset())
    }

    /// Minute of the hour the window opens.
    #[must_use]
    pub const fn open_minute(&self) -> u32 {
        self.open_minute
    }

    /// Minute of the hour the window closes.
    #[must_use]
    pub const fn close_minute(&self) -> u32 {
        self.close_minute
    }

    /// Offset all math is done in.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Converts a UTC instant into the schedule's offset.
    #[must_use]
    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    fn hour_start(&self, instant: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        let local = instant.with_timezone(&self.offset);
        local
            - Duration::minutes(i64::from(local.minute()))
            - Duration::seconds(i64::from(local.second()))
            - Duration::nanoseconds(i64::from(local.nanosecond()))
    }

    fn mark(&self, kind: BoundaryKind) -> i64 {
        match kind {
            BoundaryKind::Open => i64::from(self.open_minute),
            BoundaryKind::Close => i64::from(self.close_minute),
        }
    }

    /// Most recent opening boundary at or before `now`.
    #[must_use]
    pub fn current_boundary(&self, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        let candidate = self.hour_start(now) + Duration::minutes(self.mark(BoundaryKind::Open));
        if candidate > now {
            candidate - Duration::hours(1)
        } else {
            candidate
        }
    }

    /// Whether a newer opening boundary than `last_reset` has been reached.
    #[must_use]
    pub fn should_reset(
        &self,
        last_reset: DateTime<FixedOffset>,
        now: DateTime<FixedOffset>,
    ) -> bool {
        self.current_boundary(now) > last_reset
    }

    /// Whether registration is open: same local hour as `last_reset` and the
    /// minute of the hour inside `[open_minute, close_minute)`.
    #[must_use]
    pub fn is_open(&self, last_reset: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> bool {
        if self.hour_start(now) != self.hour_start(last_reset) {
            return false;
        }

        let minute = now.with_timezone(&self.offset).minute();
        (self.open_minute..self.close_minute).contains(&minute)
    }

    /// Whether `now` falls in the minute the window of `last_reset` closes.
    /// Never true for full-hour windows, whose close coincides with the next
    /// opening.
    #[must_use]
    pub fn is_closing_mark(
        &self,
        last_reset: DateTime<FixedOffset>,
        now: DateTime<FixedOffset>,
    ) -> bool {
        self.close_minute < 60
            && self.hour_start(now) == self.hour_start(last_reset)
            && now.with_timezone(&self.offset).minute() == self.close_minute
    }

    /// Next `kind` boundary strictly after `now`.
    #[must_use]
    pub fn next_boundary(&self, now: DateTime<FixedOffset>, kind: BoundaryKind) -> DateTime<FixedOffset> {
        let candidate = self.hour_start(now) + Duration::minutes(self.mark(kind));
        if candidate > now {
            candidate
        } else {
            candidate + Duration::hours(1)
        }
    }
}
