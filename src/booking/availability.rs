use log::trace;

use crate::booking::{
    ResourceId, ResourceKind, ResourceRef, ScheduleStore, StoreError, TenantId, WeeklySchedule,
};
use crate::config::TenantSettings;
use crate::time::{Date, TimeSpan};

/// Narrows the tenant's business hours by the schedule rows of the named
/// resources.
///
/// Returns `None` when the day is closed: some row marks its resource as
/// not available, or the narrowed window collapses to nothing. A resource
/// without a row imposes no constraint of its own.
#[must_use]
pub fn effective_window(
    business_hours: TimeSpan,
    employee: Option<&WeeklySchedule>,
    doctor: Option<&WeeklySchedule>,
) -> Option<TimeSpan> {
    let mut window = business_hours;

    for schedule in [employee, doctor].into_iter().flatten() {
        if !schedule.is_available() {
            return None;
        }

        window = window.intersect(&schedule.time_span());
    }

    (!window.is_empty()).then_some(window)
}

/// Fetches the weekly schedule rows relevant to a date and computes the
/// bookable window from them.
pub struct WindowResolver<'a, S> {
    store: &'a S,
    business_hours: TimeSpan,
}

impl<'a, S: ScheduleStore> WindowResolver<'a, S> {
    #[must_use]
    pub fn new(store: &'a S, settings: &TenantSettings) -> Self {
        Self {
            store,
            business_hours: settings.business_hours(),
        }
    }

    /// The window in which the named resources can be booked on `date`, or
    /// `None` when the day is closed for one of them.
    pub fn resolve(
        &self,
        tenant: TenantId,
        employee: Option<&ResourceRef>,
        doctor: Option<ResourceId>,
        date: Date,
    ) -> Result<Option<TimeSpan>, StoreError> {
        let day = date.week_day();

        // a label-only employee reference can have no schedule rows
        let employee_schedule = match employee.and_then(ResourceRef::id) {
            Some(id) => {
                self.store
                    .weekly_schedule(tenant, ResourceKind::Employee, id, day)?
            }
            None => None,
        };

        let doctor_schedule = match doctor {
            Some(id) => {
                self.store
                    .weekly_schedule(tenant, ResourceKind::Doctor, id, day)?
            }
            None => None,
        };

        let window = effective_window(
            self.business_hours,
            employee_schedule.as_ref(),
            doctor_schedule.as_ref(),
        );

        match window {
            Some(window) => trace!("bookable window on {date} ({day}): {window}"),
            None => trace!("closed on {date} ({day})"),
        }

        Ok(window)
    }
}
