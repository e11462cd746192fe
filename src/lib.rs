//! Scheduling core of a multi-tenant appointment book for salons and
//! clinics.
//!
//! The crate answers two questions for the booking flows: does a candidate
//! appointment collide with anything already stored, and when does a
//! service of a given duration still fit. Storage stays behind the
//! [`booking::ScheduleStore`] trait; the interval logic itself is pure and
//! works on minutes of a day.

mod utils;

pub mod booking;
pub mod config;
pub mod time;

use log::debug;
use serde::Serialize;

use crate::booking::{
    BookingRequest, ClientConflict, ConflictChecker, HoursValidator, ResourceConflict,
    ResourceKind, ScheduleStore, ScheduleVerdict, StoreError,
};

/// Everything the admin flow wants to know before persisting a candidate.
///
/// The conflict fields block a booking; the hours verdicts are advisory
/// and a flow may let an admin override them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingCheck {
    pub resource_conflict: Option<ResourceConflict>,
    pub client_conflict: Option<ClientConflict>,
    /// Missing when no employee is named. An employee named only by a
    /// legacy label checks as within, since no schedule row can exist for
    /// it.
    pub employee_hours: Option<ScheduleVerdict>,
    pub doctor_hours: Option<ScheduleVerdict>,
}

impl BookingCheck {
    /// Whether nothing stands in the way of persisting the candidate.
    #[must_use]
    pub fn is_bookable(&self) -> bool {
        self.resource_conflict.is_none()
            && self.client_conflict.is_none()
            && self.employee_hours.map_or(true, |verdict| verdict.is_within())
            && self.doctor_hours.map_or(true, |verdict| verdict.is_within())
    }
}

/// Runs every pre-persist check for a candidate booking: the overlap scan
/// per named resource, the client double-booking scan when a client is
/// named, and the weekly-hours verdict for each resource named by id.
///
/// A failed read aborts the whole check so no verdict is ever built from
/// partial data. Passing the check reserves nothing; the persist has to
/// re-check under the semantics of [`booking::InMemoryStore::try_book`].
pub fn check_booking<S: ScheduleStore>(
    store: &S,
    request: &BookingRequest,
) -> Result<BookingCheck, StoreError> {
    debug!(
        "checking a candidate on {} at {} for tenant {}",
        request.date(),
        request.time(),
        request.tenant()
    );

    let checker = ConflictChecker::new(store);
    let validator = HoursValidator::new(store);

    let resource_conflict = if request.names_resource() {
        checker.resource_conflict(request)?
    } else {
        None
    };

    let client_conflict = match request.client_id() {
        Some(_) => checker.client_conflict(request)?,
        None => None,
    };

    let employee_hours = match request.employee_ref() {
        None => None,
        Some(employee) => Some(match employee.id() {
            Some(id) => validator.check(
                request.tenant(),
                ResourceKind::Employee,
                id,
                request.date(),
                request.time(),
                request.duration(),
            )?,
            None => ScheduleVerdict::Within,
        }),
    };

    let doctor_hours = request
        .doctor_id()
        .map(|id| {
            validator.check(
                request.tenant(),
                ResourceKind::Doctor,
                id,
                request.date(),
                request.time(),
                request.duration(),
            )
        })
        .transpose()?;

    Ok(BookingCheck {
        resource_conflict,
        client_conflict,
        employee_hours,
        doctor_hours,
    })
}
