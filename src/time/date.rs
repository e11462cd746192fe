use core::fmt;
use core::str::FromStr;

use serde::{ser, Deserialize};
use thiserror::Error;

use crate::time::WeekDay;
use crate::utils::{self, StrExt};

/// A compile-time checked [`Date`] literal: `date!(2026:08:22)`.
#[macro_export]
macro_rules! date {
    ($year:literal : $month:literal : $day:literal) => {{
        static_assertions::const_assert!($year >= 1);
        static_assertions::const_assert!($month >= 1 && $month <= 12);
        static_assertions::const_assert!($day >= 1);
        static_assertions::const_assert!($day <= $crate::time::Date::days_in_month($year, $month));

        $crate::time::Date::new_unchecked($year, $month, $day)
    }};
}

/// A calendar date without a time component, like `"2026-08-22"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Date {
    year: u16,
    month: u8,
    day: u8,
}

impl Date {
    pub const fn new(year: u16, month: u8, day: u8) -> Result<Self, InvalidDate> {
        if year == 0
            || month == 0
            || month > 12
            || day == 0
            || day > Self::days_in_month(year, month)
        {
            return Err(InvalidDate::OutOfRange { year, month, day });
        }

        Ok(Self { year, month, day })
    }

    #[doc(hidden)]
    #[must_use]
    pub const fn new_unchecked(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    #[must_use]
    pub const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Number of days in the given month, `0` if the month number is invalid.
    #[must_use]
    pub const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// The day of the week under the tenant calendar (Saturday = 0).
    ///
    /// Zeller's congruence, with January and February counted as months 13
    /// and 14 of the previous year. Zeller's day index starts the week on
    /// Saturday, which is exactly the tenant numbering, so no shift is
    /// applied afterwards.
    pub const fn week_day(&self) -> WeekDay {
        let (year, month) = if self.month <= 2 {
            (self.year as u32 - 1, self.month as u32 + 12)
        } else {
            (self.year as u32, self.month as u32)
        };

        let day = self.day as u32;
        let year_of_century = year % 100;
        let century = year / 100;

        let index = (day
            + (13 * (month + 1)) / 5
            + year_of_century
            + year_of_century / 4
            + century / 4
            + 5 * century)
            % 7;

        WeekDay::days()[index as usize]
    }

    /// The next calendar day, rolling over month and year ends.
    #[must_use]
    pub const fn next_day(&self) -> Self {
        if self.day < Self::days_in_month(self.year, self.month) {
            Self {
                year: self.year,
                month: self.month,
                day: self.day + 1,
            }
        } else if self.month < 12 {
            Self {
                year: self.year,
                month: self.month + 1,
                day: 1,
            }
        } else {
            Self {
                year: self.year + 1,
                month: 1,
                day: 1,
            }
        }
    }

    /// Iterates from `self` through `last`, both ends included.
    pub fn iter_through(self, last: Self) -> DateIter {
        DateIter {
            next: (self <= last).then_some(self),
            last,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DateIter {
    next: Option<Date>,
    last: Date,
}

impl Iterator for DateIter {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = (current < self.last).then(|| current.next_day());
        Some(current)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDate {
    #[error("\"{input}\" is not a valid date. Expected format: \"YYYY-MM-DD\"")]
    ParseDateError { input: String },
    #[error("{year:04}-{month:02}-{day:02} is not a real calendar date")]
    OutOfRange { year: u16, month: u8, day: u8 },
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for Date {
    type Err = InvalidDate;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let parse_error = || InvalidDate::ParseDateError {
            input: string.to_string(),
        };

        match string.split_exact::<3>("-") {
            [Some(year), Some(month), Some(day)]
                if utils::is_padded_number(year, 4)
                    && utils::is_padded_number(month, 2)
                    && utils::is_padded_number(day, 2) =>
            {
                Self::new(
                    year.parse().map_err(|_| parse_error())?,
                    month.parse().map_err(|_| parse_error())?,
                    day.parse().map_err(|_| parse_error())?,
                )
            }
            _ => Err(parse_error()),
        }
    }
}

impl TryFrom<String> for Date {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl ser::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}
