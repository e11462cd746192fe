use core::fmt;

use serde::Serialize;

use crate::booking::{ResourceId, ResourceKind, ScheduleStore, StoreError, TenantId, WeeklySchedule};
use crate::time::{Date, TimeSpan, TimeStamp, WorkingDuration};

/// Outcome of holding a candidate against one resource's weekly schedule.
///
/// This is advisory: whether a verdict other than `Within` blocks the
/// booking or only warns is the calling flow's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "kebab-case")]
pub enum ScheduleVerdict {
    /// Nothing in the weekly schedule speaks against the candidate. Also
    /// the verdict when no row exists, since default business hours are
    /// enforced by the bookable window, not here.
    Within,
    /// An explicit row marks the resource as not working that day. The
    /// stored hours are carried along for the caller's message.
    OffDuty { start: TimeStamp, end: TimeStamp },
    /// The candidate does not lie fully inside the scheduled hours.
    Outside { start: TimeStamp, end: TimeStamp },
}

impl ScheduleVerdict {
    #[must_use]
    pub const fn is_within(&self) -> bool {
        matches!(self, Self::Within)
    }
}

impl fmt::Display for ScheduleVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Within => write!(f, "within the weekly schedule"),
            Self::OffDuty { .. } => write!(f, "not on duty that day"),
            Self::Outside { start, end } => {
                write!(f, "outside the scheduled hours {start} - {end}")
            }
        }
    }
}

/// The pure containment step: a candidate passes when the row is absent,
/// and otherwise has to lie fully inside the row's hours.
///
/// A stored row whose hours are inverted or zero-length has an empty span,
/// so nothing fits it and every candidate comes back `Outside`.
#[must_use]
pub fn verdict_for(schedule: Option<&WeeklySchedule>, candidate: TimeSpan) -> ScheduleVerdict {
    let Some(schedule) = schedule else {
        return ScheduleVerdict::Within;
    };

    if !schedule.is_available() {
        return ScheduleVerdict::OffDuty {
            start: schedule.start(),
            end: schedule.end(),
        };
    }

    if schedule.time_span().contains(&candidate) {
        ScheduleVerdict::Within
    } else {
        ScheduleVerdict::Outside {
            start: schedule.start(),
            end: schedule.end(),
        }
    }
}

/// Fetches the schedule row for a date and applies [`verdict_for`].
pub struct HoursValidator<'a, S> {
    store: &'a S,
}

impl<'a, S: ScheduleStore> HoursValidator<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn check(
        &self,
        tenant: TenantId,
        kind: ResourceKind,
        resource: ResourceId,
        date: Date,
        time: TimeStamp,
        duration: WorkingDuration,
    ) -> Result<ScheduleVerdict, StoreError> {
        let schedule = self
            .store
            .weekly_schedule(tenant, kind, resource, date.week_day())?;

        Ok(verdict_for(
            schedule.as_ref(),
            TimeSpan::from_start(time, duration),
        ))
    }
}
