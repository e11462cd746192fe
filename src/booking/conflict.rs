use core::fmt;

use log::debug;
use serde::Serialize;

use crate::booking::{
    Appointment, AppointmentId, BookingRequest, ResourceKind, ScheduleStore, StoreError,
};
use crate::time::{TimeSpan, TimeStamp, WorkingDuration};

/// First stored appointment that still occupies time and overlaps `span`.
///
/// The excluded id is skipped so an appointment being rescheduled never
/// collides with itself.
pub(crate) fn first_overlap<'a, I>(
    rows: I,
    span: TimeSpan,
    exclude: Option<AppointmentId>,
) -> Option<&'a Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    rows.into_iter()
        .filter(|appointment| appointment.status().occupies_time())
        .filter(|appointment| Some(appointment.id()) != exclude)
        .find(|appointment| appointment.time_span().overlaps(&span))
}

/// The busy appointment a resource check collided with, with enough detail
/// for the admin calendar to say who is blocking the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceConflict {
    kind: ResourceKind,
    time: TimeStamp,
    duration: WorkingDuration,
    client_name: Option<String>,
    service_name: Option<String>,
}

impl ResourceConflict {
    fn new(kind: ResourceKind, appointment: &Appointment) -> Self {
        Self {
            kind,
            time: appointment.time(),
            duration: appointment.duration(),
            client_name: appointment.client_name().map(str::to_string),
            service_name: appointment.service_name().map(str::to_string),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[must_use]
    pub const fn time(&self) -> TimeStamp {
        self.time
    }

    #[must_use]
    pub const fn duration(&self) -> WorkingDuration {
        self.duration
    }

    #[must_use]
    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    #[must_use]
    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    #[must_use]
    pub fn time_span(&self) -> TimeSpan {
        TimeSpan::from_start(self.time, self.duration)
    }
}

impl fmt::Display for ResourceConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is already booked {}", self.kind, self.time_span())?;

        match (&self.client_name, &self.service_name) {
            (Some(client), Some(service)) => write!(f, " ({client}, {service})"),
            (Some(client), None) => write!(f, " ({client})"),
            (None, Some(service)) => write!(f, " ({service})"),
            (None, None) => Ok(()),
        }
    }
}

/// The earlier appointment a client check collided with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConflict {
    time: TimeStamp,
    duration: WorkingDuration,
    service_name: Option<String>,
}

impl ClientConflict {
    fn new(appointment: &Appointment) -> Self {
        Self {
            time: appointment.time(),
            duration: appointment.duration(),
            service_name: appointment.service_name().map(str::to_string),
        }
    }

    #[must_use]
    pub const fn time(&self) -> TimeStamp {
        self.time
    }

    #[must_use]
    pub const fn duration(&self) -> WorkingDuration {
        self.duration
    }

    #[must_use]
    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    #[must_use]
    pub fn time_span(&self) -> TimeSpan {
        TimeSpan::from_start(self.time, self.duration)
    }
}

impl fmt::Display for ClientConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client already has an appointment {}", self.time_span())?;

        if let Some(service) = &self.service_name {
            write!(f, " ({service})")?;
        }

        Ok(())
    }
}

/// Runs the overlap checks a candidate booking has to pass.
pub struct ConflictChecker<'a, S> {
    store: &'a S,
}

impl<'a, S: ScheduleStore> ConflictChecker<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Checks the candidate against the day's appointments of every
    /// resource it names. The employee is checked first, and the first hit
    /// wins.
    ///
    /// # Panics
    ///
    /// Panics when the request names neither an employee nor a doctor.
    pub fn resource_conflict(
        &self,
        request: &BookingRequest,
    ) -> Result<Option<ResourceConflict>, StoreError> {
        assert!(
            request.names_resource(),
            "a resource conflict check needs an employee or doctor"
        );

        let span = request.time_span();
        let exclude = request.exclude_appointment_id();

        if let Some(employee) = request.employee_ref() {
            let rows = self
                .store
                .employee_appointments(request.tenant(), &employee, request.date())?;

            if let Some(hit) = first_overlap(&rows, span, exclude) {
                debug!("{employee} is blocked by appointment #{}", hit.id());
                return Ok(Some(ResourceConflict::new(ResourceKind::Employee, hit)));
            }
        }

        if let Some(doctor) = request.doctor_id() {
            let rows = self
                .store
                .doctor_appointments(request.tenant(), doctor, request.date())?;

            if let Some(hit) = first_overlap(&rows, span, exclude) {
                debug!("doctor #{doctor} is blocked by appointment #{}", hit.id());
                return Ok(Some(ResourceConflict::new(ResourceKind::Doctor, hit)));
            }
        }

        Ok(None)
    }

    /// Checks whether the client already has an overlapping appointment
    /// that day, with any resource of the tenant.
    ///
    /// # Panics
    ///
    /// Panics when the request names no client.
    pub fn client_conflict(
        &self,
        request: &BookingRequest,
    ) -> Result<Option<ClientConflict>, StoreError> {
        let client = request
            .client_id()
            .expect("a client conflict check needs a client");

        let rows = self
            .store
            .client_appointments(request.tenant(), client, request.date())?;

        let hit = first_overlap(&rows, request.time_span(), request.exclude_appointment_id());
        if let Some(hit) = hit {
            debug!("client #{client} is blocked by appointment #{}", hit.id());
        }

        Ok(hit.map(ClientConflict::new))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::booking::{AppointmentStatus, ClientId, InMemoryStore, ResourceId, TenantId};
    use crate::{date, time_stamp, working_duration};

    fn store_with_haircut() -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .insert_appointment(
                Appointment::new(
                    AppointmentId::new(1),
                    TenantId::new(1),
                    date!(2026:03:17),
                    time_stamp!(09:00),
                    working_duration!(01:30),
                    AppointmentStatus::Confirmed,
                )
                .with_employee(ResourceId::new(5))
                .with_client(ClientId::new(9))
                .with_client_name("Anna Schmidt")
                .with_service("Haircut"),
            )
            .unwrap();
        store
    }

    fn request_at(hour: u8, minute: u8, duration: WorkingDuration) -> BookingRequest {
        BookingRequest::new(
            TenantId::new(1),
            date!(2026:03:17),
            TimeStamp::new(hour, minute).expect("time in bounds"),
            duration,
        )
    }

    #[test]
    fn test_overlap_reports_details() {
        let store = store_with_haircut();
        let checker = ConflictChecker::new(&store);

        let request = request_at(10, 0, working_duration!(01:00)).with_employee(ResourceId::new(5));
        let conflict = checker
            .resource_conflict(&request)
            .unwrap()
            .expect("expected a conflict");

        assert_eq!(conflict.kind(), ResourceKind::Employee);
        assert_eq!(conflict.time(), time_stamp!(09:00));
        assert_eq!(conflict.client_name(), Some("Anna Schmidt"));
        assert_eq!(
            conflict.to_string(),
            "employee is already booked 09:00 - 10:30 (Anna Schmidt, Haircut)"
        );
    }

    #[test]
    fn test_touching_appointments_do_not_conflict() {
        let store = store_with_haircut();
        let checker = ConflictChecker::new(&store);

        let after = request_at(10, 30, working_duration!(00:30)).with_employee(ResourceId::new(5));
        assert_eq!(checker.resource_conflict(&after).unwrap(), None);

        let before = request_at(8, 0, working_duration!(01:00)).with_employee(ResourceId::new(5));
        assert_eq!(checker.resource_conflict(&before).unwrap(), None);
    }

    #[test]
    fn test_cancelled_and_no_show_rows_do_not_block() {
        for status in [AppointmentStatus::Cancelled, AppointmentStatus::NoShow] {
            let store = InMemoryStore::new();
            store
                .insert_appointment(
                    Appointment::new(
                        AppointmentId::new(1),
                        TenantId::new(1),
                        date!(2026:03:17),
                        time_stamp!(09:00),
                        working_duration!(01:00),
                        status,
                    )
                    .with_employee(ResourceId::new(5)),
                )
                .unwrap();

            let checker = ConflictChecker::new(&store);
            let request =
                request_at(9, 0, working_duration!(01:00)).with_employee(ResourceId::new(5));

            assert_eq!(checker.resource_conflict(&request).unwrap(), None);
        }
    }

    #[test]
    fn test_excluded_appointment_is_skipped() {
        let store = store_with_haircut();
        let checker = ConflictChecker::new(&store);

        let edit = request_at(9, 30, working_duration!(01:00))
            .with_employee(ResourceId::new(5))
            .excluding(AppointmentId::new(1));

        assert_eq!(checker.resource_conflict(&edit).unwrap(), None);
    }

    #[test]
    fn test_employee_hit_wins_over_doctor() {
        let store = store_with_haircut();
        store
            .insert_appointment(
                Appointment::new(
                    AppointmentId::new(2),
                    TenantId::new(1),
                    date!(2026:03:17),
                    time_stamp!(09:00),
                    working_duration!(01:00),
                    AppointmentStatus::Confirmed,
                )
                .with_doctor(ResourceId::new(2)),
            )
            .unwrap();

        let checker = ConflictChecker::new(&store);
        let request = request_at(9, 0, working_duration!(00:30))
            .with_employee(ResourceId::new(5))
            .with_doctor(ResourceId::new(2));

        let conflict = checker
            .resource_conflict(&request)
            .unwrap()
            .expect("expected a conflict");
        assert_eq!(conflict.kind(), ResourceKind::Employee);
    }

    #[test]
    fn test_doctor_conflict_when_employee_is_free() {
        let store = InMemoryStore::new();
        store
            .insert_appointment(
                Appointment::new(
                    AppointmentId::new(1),
                    TenantId::new(1),
                    date!(2026:03:17),
                    time_stamp!(11:00),
                    working_duration!(00:45),
                    AppointmentStatus::Confirmed,
                )
                .with_doctor(ResourceId::new(2))
                .with_service("Consultation"),
            )
            .unwrap();

        let checker = ConflictChecker::new(&store);
        let request = request_at(11, 15, working_duration!(00:30))
            .with_employee(ResourceId::new(5))
            .with_doctor(ResourceId::new(2));

        let conflict = checker
            .resource_conflict(&request)
            .unwrap()
            .expect("expected a conflict");
        assert_eq!(conflict.kind(), ResourceKind::Doctor);
        assert_eq!(
            conflict.to_string(),
            "doctor is already booked 11:00 - 11:45 (Consultation)"
        );
    }

    #[test]
    fn test_legacy_label_rows_conflict_with_id_requests() {
        let store = InMemoryStore::new();
        store.register_employee(ResourceId::new(5), "Dana Weber").unwrap();
        store
            .insert_appointment(
                Appointment::new(
                    AppointmentId::new(1),
                    TenantId::new(1),
                    date!(2026:03:17),
                    time_stamp!(09:00),
                    working_duration!(01:00),
                    AppointmentStatus::Confirmed,
                )
                .with_employee_label("Dana Weber"),
            )
            .unwrap();

        let checker = ConflictChecker::new(&store);
        let request = request_at(9, 30, working_duration!(00:30)).with_employee(ResourceId::new(5));

        assert!(checker.resource_conflict(&request).unwrap().is_some());
    }

    #[test]
    fn test_client_double_booking_across_resources() {
        let store = store_with_haircut();
        let checker = ConflictChecker::new(&store);

        // same client, different resource, overlapping time
        let request = request_at(9, 30, working_duration!(00:30))
            .with_doctor(ResourceId::new(2))
            .with_client(ClientId::new(9));

        let conflict = checker
            .client_conflict(&request)
            .unwrap()
            .expect("expected a client conflict");
        assert_eq!(
            conflict.to_string(),
            "client already has an appointment 09:00 - 10:30 (Haircut)"
        );

        // a different client is unaffected
        let other = request_at(9, 30, working_duration!(00:30))
            .with_doctor(ResourceId::new(2))
            .with_client(ClientId::new(10));
        assert_eq!(checker.client_conflict(&other).unwrap(), None);
    }

    #[test]
    #[should_panic(expected = "needs an employee or doctor")]
    fn test_resource_check_without_resource_panics() {
        let store = InMemoryStore::new();
        let checker = ConflictChecker::new(&store);

        let request = request_at(9, 0, working_duration!(00:30));
        let _ = checker.resource_conflict(&request);
    }
}
