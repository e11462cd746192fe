use log::trace;

use crate::booking::{
    Appointment, ResourceId, ResourceRef, ScheduleStore, StoreError, TenantId, WindowResolver,
};
use crate::config::TenantSettings;
use crate::time::{Date, TimeSpan, TimeStamp, WorkingDuration};

/// Earliest start in `window` where `duration` fits without touching any
/// busy interval.
///
/// `busy` must be sorted by start. The intervals may overlap each other,
/// the cursor only ever moves forward. Intervals outside the window are
/// harmless: ones before it never push the cursor back and ones after it
/// fail the final bounds check.
#[must_use]
pub fn first_fit(
    window: TimeSpan,
    busy: &[TimeSpan],
    duration: WorkingDuration,
) -> Option<TimeStamp> {
    debug_assert!(busy.windows(2).all(|pair| pair[0].start() <= pair[1].start()));

    let needed = u32::from(duration.minutes());
    let mut cursor = u32::from(window.start());

    for interval in busy {
        if cursor + needed <= u32::from(interval.start()) {
            // the gap before this interval is big enough
            break;
        }

        cursor = cursor.max(u32::from(interval.end()));
    }

    if cursor + needed <= u32::from(window.end()) {
        let start = TimeStamp::from_minute_of_day(cursor as u16)
            .expect("a start inside the window is a valid wall clock time");
        Some(start)
    } else {
        None
    }
}

/// Every start on the booking grid where `duration` fits: candidates are
/// generated every `step` minutes from the window start and kept when
/// their whole interval is free.
///
/// Unlike [`first_fit`] this does not require `busy` to be sorted, each
/// candidate is tested against all intervals.
#[must_use]
pub fn open_starts(
    window: TimeSpan,
    busy: &[TimeSpan],
    duration: WorkingDuration,
    step: WorkingDuration,
) -> Vec<TimeStamp> {
    let needed = u32::from(duration.minutes());
    let mut cursor = u32::from(window.start());
    let mut starts = Vec::new();

    while cursor + needed <= u32::from(window.end()) {
        let candidate = TimeSpan::from_minutes(cursor as u16, (cursor + needed) as u16);

        if !busy.iter().any(|interval| interval.overlaps(&candidate)) {
            let start = TimeStamp::from_minute_of_day(cursor as u16)
                .expect("a start inside the window is a valid wall clock time");
            starts.push(start);
        }

        cursor += u32::from(step.minutes());
    }

    starts
}

/// Who a slot search is for and how much time it needs.
///
/// Naming both an employee and a doctor searches for a slot where the two
/// are free at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    pub tenant: TenantId,
    pub duration: WorkingDuration,
    pub employee: Option<ResourceRef>,
    pub doctor: Option<ResourceId>,
}

impl SlotQuery {
    #[must_use]
    pub const fn new(tenant: TenantId, duration: WorkingDuration) -> Self {
        Self {
            tenant,
            duration,
            employee: None,
            doctor: None,
        }
    }

    #[must_use]
    pub fn with_employee(mut self, employee: ResourceRef) -> Self {
        self.employee = Some(employee);
        self
    }

    #[must_use]
    pub const fn with_doctor(mut self, doctor: ResourceId) -> Self {
        self.doctor = Some(doctor);
        self
    }
}

/// Answers "when can this be booked" for the public flow.
pub struct SlotFinder<'a, S> {
    store: &'a S,
    resolver: WindowResolver<'a, S>,
}

impl<'a, S: ScheduleStore> SlotFinder<'a, S> {
    #[must_use]
    pub fn new(store: &'a S, settings: &TenantSettings) -> Self {
        Self {
            store,
            resolver: WindowResolver::new(store, settings),
        }
    }

    /// The earliest free start on `date`, or `None` when the day is closed
    /// or already full.
    pub fn next_slot(
        &self,
        query: &SlotQuery,
        date: Date,
    ) -> Result<Option<TimeStamp>, StoreError> {
        let Some(window) = self
            .resolver
            .resolve(query.tenant, query.employee.as_ref(), query.doctor, date)?
        else {
            return Ok(None);
        };

        let busy = self.busy_intervals(query, date)?;
        Ok(first_fit(window, &busy, query.duration))
    }

    /// All bookable starts on `date`, stepped every `step` minutes from
    /// the window start.
    pub fn open_starts(
        &self,
        query: &SlotQuery,
        date: Date,
        step: WorkingDuration,
    ) -> Result<Vec<TimeStamp>, StoreError> {
        let Some(window) = self
            .resolver
            .resolve(query.tenant, query.employee.as_ref(), query.doctor, date)?
        else {
            return Ok(Vec::new());
        };

        let busy = self.busy_intervals(query, date)?;
        Ok(open_starts(window, &busy, query.duration, step))
    }

    /// The dates in `from..=until` that offer at least one slot, for
    /// painting a month view.
    pub fn bookable_dates(
        &self,
        query: &SlotQuery,
        from: Date,
        until: Date,
    ) -> Result<Vec<Date>, StoreError> {
        let mut dates = Vec::new();

        for date in from.iter_through(until) {
            if self.next_slot(query, date)?.is_some() {
                dates.push(date);
            }
        }

        Ok(dates)
    }

    /// The busy intervals of every resource the query names, sorted by
    /// start. An appointment occupying both resources contributes its
    /// interval twice, which the scans tolerate.
    fn busy_intervals(&self, query: &SlotQuery, date: Date) -> Result<Vec<TimeSpan>, StoreError> {
        let mut rows: Vec<Appointment> = Vec::new();

        if let Some(employee) = &query.employee {
            rows.extend(self.store.employee_appointments(query.tenant, employee, date)?);
        }

        if let Some(doctor) = query.doctor {
            rows.extend(self.store.doctor_appointments(query.tenant, doctor, date)?);
        }

        let mut busy: Vec<TimeSpan> = rows
            .iter()
            .filter(|appointment| appointment.status().occupies_time())
            .map(Appointment::time_span)
            .collect();
        busy.sort_by_key(TimeSpan::start);

        trace!("{} busy interval(s) on {date}", busy.len());
        Ok(busy)
    }
}
