use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A day of the week under the tenant calendar, which starts on Saturday.
///
/// Weekly schedule rows store this as their `day_of_week` number, so the
/// discriminants are part of the persisted data contract: Saturday is `0`,
/// Friday is `6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deserialize, Serialize)]
#[serde(try_from = "usize")]
#[serde(into = "usize")]
pub enum WeekDay {
    Saturday = 0,
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
}

impl WeekDay {
    pub const fn days() -> [Self; 7] {
        [
            Self::Saturday,
            Self::Sunday,
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
        ]
    }

    pub const fn as_usize(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("week day number must be 0 (Saturday) through 6 (Friday), got {0}")]
pub struct InvalidWeekDayNumber(pub usize);

impl TryFrom<usize> for WeekDay {
    type Error = InvalidWeekDayNumber;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::days()
            .into_iter()
            .find(|day| day.as_usize() == value)
            .ok_or(InvalidWeekDayNumber(value))
    }
}

impl From<WeekDay> for usize {
    fn from(day: WeekDay) -> Self {
        day.as_usize()
    }
}
