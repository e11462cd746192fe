use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A positive span of wall-clock minutes, like the 45 minutes of a haircut.
///
/// Displayed as `"HH:MM"`. (De)serialized as a plain minute count, which is
/// how appointment and service rows store their duration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "u16")]
#[serde(into = "u16")]
pub struct WorkingDuration {
    minutes: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("duration must be a positive number of minutes")]
pub struct InvalidDuration;

impl WorkingDuration {
    pub const fn new(minutes: u16) -> Result<Self, InvalidDuration> {
        if minutes == 0 {
            return Err(InvalidDuration);
        }

        Ok(Self { minutes })
    }

    #[doc(hidden)]
    #[must_use]
    pub const fn new_unchecked(minutes: u16) -> Self {
        Self { minutes }
    }

    #[must_use]
    pub const fn minutes(&self) -> u16 {
        self.minutes
    }
}

impl TryFrom<u16> for WorkingDuration {
    type Error = InvalidDuration;

    fn try_from(minutes: u16) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}

impl From<WorkingDuration> for u16 {
    fn from(duration: WorkingDuration) -> Self {
        duration.minutes()
    }
}

impl fmt::Display for WorkingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

/// A compile-time checked [`WorkingDuration`] literal: `working_duration!(01:30)`.
#[macro_export]
macro_rules! working_duration {
    ( $hours:literal : $minutes:literal ) => {{
        static_assertions::const_assert!($minutes < 60);
        static_assertions::const_assert!($hours > 0 || $minutes > 0);

        $crate::time::WorkingDuration::new_unchecked($hours * 60 + $minutes)
    }};
}
