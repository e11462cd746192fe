use std::str::FromStr;

use derive_more::Display;
use serde::{de, ser, Deserialize, Serialize};
use thiserror::Error;

use crate::utils::{self, StrExt};

/// A wall-clock time with minute precision, like `"09:30"`.
///
/// Appointment rows and schedule rows store times in this form; all interval
/// arithmetic happens on [`TimeStamp::minute_of_day`] values.
#[derive(Debug, Copy, Clone, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{hour:02}:{minute:02}")]
pub struct TimeStamp {
    hour: u8,
    minute: u8,
}

pub const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidTime {
    #[error("time is not valid: {hour:02}:{minute:02}")]
    OutOfRange { hour: u8, minute: u8 },
    #[error("minute of day must be less than {MINUTES_PER_DAY}, got {0}")]
    MinuteOfDay(u16),
}

impl TimeStamp {
    pub const fn new(hour: u8, minute: u8) -> Result<Self, InvalidTime> {
        if hour > 23 || minute > 59 {
            return Err(InvalidTime::OutOfRange { hour, minute });
        }

        Ok(Self { hour, minute })
    }

    #[doc(hidden)]
    #[must_use]
    pub const fn new_unchecked(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    // the maximum TimeStamp is 23:59, which would be 23 * 60 + 59 = 1439
    #[must_use]
    pub const fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Inverse of [`TimeStamp::minute_of_day`], defined for `0 ≤ minutes < 1440`.
    pub const fn from_minute_of_day(minutes: u16) -> Result<Self, InvalidTime> {
        if minutes >= MINUTES_PER_DAY {
            return Err(InvalidTime::MinuteOfDay(minutes));
        }

        Ok(Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        })
    }

    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }
}

impl FromStr for TimeStamp {
    type Err = anyhow::Error;

    /// Parses exactly the zero-padded `"HH:MM"` shape.
    ///
    /// Anything else (missing padding, extra whitespace, signs) is a data
    /// integrity problem on the caller's side, so it fails instead of being
    /// coerced.
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = match string.split_exact::<2>(":") {
            [Some(hour), Some(minute)]
                if utils::is_padded_number(hour, 2) && utils::is_padded_number(minute, 2) =>
            {
                (hour, minute)
            }
            _ => anyhow::bail!("expected a wall-clock time like \"09:30\", got \"{string}\""),
        };

        Ok(Self::new(hour.parse()?, minute.parse()?)?)
    }
}

impl<'de> Deserialize<'de> for TimeStamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for TimeStamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// A compile-time checked [`TimeStamp`] literal: `time_stamp!(09:30)`.
#[macro_export]
macro_rules! time_stamp {
    ( $hour:literal : $minute:literal ) => {{
        static_assertions::const_assert!($hour < 24);
        static_assertions::const_assert!($minute < 60);

        $crate::time::TimeStamp::new_unchecked($hour, $minute)
    }};
}
