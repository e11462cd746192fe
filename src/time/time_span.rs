use core::fmt;

use crate::time::{TimeStamp, WorkingDuration};
use crate::{max, min};

/// A half-open `[start, end)` range of minutes within one day.
///
/// Stored as raw minute-of-day values so that a booking reaching past
/// midnight (23:30 plus an hour) stays representable. Such a span simply
/// fails every containment and fit check; it is never wrapped around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpan {
    start: u16,
    end: u16,
}

impl TimeSpan {
    #[must_use]
    pub const fn new(start: TimeStamp, end: TimeStamp) -> Self {
        Self {
            start: start.minute_of_day(),
            end: end.minute_of_day(),
        }
    }

    /// The span a booking occupies: `[start, start + duration)`.
    #[must_use]
    pub const fn from_start(start: TimeStamp, duration: WorkingDuration) -> Self {
        Self {
            start: start.minute_of_day(),
            end: start.minute_of_day().saturating_add(duration.minutes()),
        }
    }

    #[must_use]
    pub(crate) const fn from_minutes(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Minute of day this span starts at (inclusive).
    #[must_use]
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// Minute of day this span ends at (exclusive).
    #[must_use]
    pub const fn end(&self) -> u16 {
        self.end
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// `true` iff the two spans share at least one minute.
    ///
    /// Touching endpoints do not count, so back-to-back bookings are legal.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// `true` iff `other` lies entirely inside this span.
    ///
    /// `other` may end exactly where this span ends, but not later.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// The minutes covered by both spans. Empty if they do not meet.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            start: max!(self.start, other.start),
            end: min!(self.end, other.end),
        }
    }
}

fn fmt_minute_of_day(minutes: u16, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:02}:{:02}", minutes / 60, minutes % 60)
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_minute_of_day(self.start, f)?;
        f.write_str(" - ")?;
        fmt_minute_of_day(self.end, f)
    }
}
