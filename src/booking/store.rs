use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Context;
use log::{debug, info, trace};
use serde::Deserialize;
use thiserror::Error;

use crate::booking::conflict::first_overlap;
use crate::booking::{
    Appointment, AppointmentId, AppointmentStatus, BookingRequest, ClientId, ResourceId,
    ResourceKind, ResourceRef, TenantId, WeeklySchedule,
};
use crate::max;
use crate::time::{Date, WeekDay};

/// Read access to the rows the scheduling checks consume.
///
/// Every method is tenant-scoped: an implementation must never return rows
/// belonging to another tenant. Rows are returned in every status; the
/// checks decide which statuses still occupy time, so that rule lives in
/// one place instead of in each backend's queries.
///
/// A real backend must pair "check, then insert" with either a serializable
/// transaction or an exclusion constraint on overlapping intervals, so two
/// concurrent requests cannot both pass their check and both persist.
/// [`InMemoryStore::try_book`] shows the intended semantics.
pub trait ScheduleStore: Send + Sync {
    /// Appointments involving the given employee on `date`.
    ///
    /// A [`ResourceRef::ById`] query must also return legacy rows that
    /// carry no employee id but whose stored label names the same employee.
    fn employee_appointments(
        &self,
        tenant: TenantId,
        employee: &ResourceRef,
        date: Date,
    ) -> Result<Vec<Appointment>, StoreError>;

    /// Appointments involving the given doctor on `date`.
    fn doctor_appointments(
        &self,
        tenant: TenantId,
        doctor: ResourceId,
        date: Date,
    ) -> Result<Vec<Appointment>, StoreError>;

    /// Appointments booked by the given client on `date`, with any
    /// resource.
    fn client_appointments(
        &self,
        tenant: TenantId,
        client: ClientId,
        date: Date,
    ) -> Result<Vec<Appointment>, StoreError>;

    /// The recurring availability row for one resource and week day, if the
    /// staff settings define one.
    fn weekly_schedule(
        &self,
        tenant: TenantId,
        kind: ResourceKind,
        resource: ResourceId,
        day: WeekDay,
    ) -> Result<Option<WeeklySchedule>, StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store cannot be reached at all.
    #[error("schedule store is unavailable: {0}")]
    Unavailable(String),
    /// A single query failed.
    #[error("schedule query failed")]
    Query(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum BookError {
    /// Somebody claimed an overlapping interval between the caller's check
    /// and this insert.
    #[error("the requested time has just been taken by appointment #{with}")]
    Taken { with: AppointmentId },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reference implementation of [`ScheduleStore`], used by the tests and as
/// the executable description of what a backend has to provide.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    appointments: Vec<Appointment>,
    employee_schedules: Vec<WeeklySchedule>,
    doctor_schedules: Vec<WeeklySchedule>,
    /// Canonical display label per employee id, so id queries can pick up
    /// legacy rows that only stored the label.
    employee_labels: HashMap<ResourceId, String>,
    highest_id: u64,
}

impl Inner {
    fn involves_employee(&self, appointment: &Appointment, employee: &ResourceRef) -> bool {
        match employee {
            ResourceRef::ById(id) => {
                let directory = self.employee_labels.get(id).map(String::as_str);

                appointment.employee_id() == Some(*id)
                    || (appointment.employee_id().is_none()
                        && directory.is_some()
                        && appointment.employee_label() == directory)
            }
            ResourceRef::ByLabel(label) => {
                appointment.employee_label() == Some(label.as_str())
                    || appointment
                        .employee_id()
                        .is_some_and(|id| self.employee_labels.get(&id) == Some(label))
            }
        }
    }

    fn put_appointment(&mut self, appointment: Appointment) {
        self.highest_id = max!(self.highest_id, appointment.id().as_u64());

        if let Some(existing) = self
            .appointments
            .iter_mut()
            .find(|row| row.id() == appointment.id())
        {
            *existing = appointment;
        } else {
            self.appointments.push(appointment);
        }
    }

    fn next_appointment_id(&mut self) -> AppointmentId {
        self.highest_id += 1;
        AppointmentId::new(self.highest_id)
    }

    fn schedules(&self, kind: ResourceKind) -> &Vec<WeeklySchedule> {
        match kind {
            ResourceKind::Employee => &self.employee_schedules,
            ResourceKind::Doctor => &self.doctor_schedules,
        }
    }

    fn schedules_mut(&mut self, kind: ResourceKind) -> &mut Vec<WeeklySchedule> {
        match kind {
            ResourceKind::Employee => &mut self.employee_schedules,
            ResourceKind::Doctor => &mut self.doctor_schedules,
        }
    }
}

/// Seed document accepted by [`InMemoryStore::from_json_str`].
#[derive(Debug, Deserialize)]
struct Seed {
    #[serde(default)]
    employees: Vec<SeedEmployee>,
    #[serde(default)]
    appointments: Vec<Appointment>,
    #[serde(default)]
    employee_schedules: Vec<WeeklySchedule>,
    #[serde(default)]
    doctor_schedules: Vec<WeeklySchedule>,
}

#[derive(Debug, Deserialize)]
struct SeedEmployee {
    id: ResourceId,
    label: String,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a JSON seed document.
    ///
    /// ```json
    /// {
    ///     "employees": [{ "id": 5, "label": "Dana Weber" }],
    ///     "appointments": [],
    ///     "employee_schedules": [],
    ///     "doctor_schedules": []
    /// }
    /// ```
    pub fn from_json_str(input: &str) -> anyhow::Result<Self> {
        let seed: Seed = serde_json::from_str(input).context("failed to parse store seed")?;

        let store = Self::new();

        for employee in seed.employees {
            store.register_employee(employee.id, employee.label)?;
        }

        for schedule in seed.employee_schedules {
            store.upsert_schedule(ResourceKind::Employee, schedule)?;
        }

        for schedule in seed.doctor_schedules {
            store.upsert_schedule(ResourceKind::Doctor, schedule)?;
        }

        for appointment in seed.appointments {
            store.insert_appointment(appointment)?;
        }

        Ok(store)
    }

    /// Records the canonical display label of an employee. Needed for id
    /// queries to also find legacy label-only rows.
    pub fn register_employee(
        &self,
        id: ResourceId,
        label: impl Into<String>,
    ) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.employee_labels.insert(id, label.into());
        Ok(())
    }

    /// Inserts an appointment row, replacing any stored row with the same
    /// id.
    pub fn insert_appointment(&self, appointment: Appointment) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.put_appointment(appointment);
        Ok(())
    }

    /// Stores a weekly schedule row, replacing the existing row for the
    /// same resource and week day so the one-row-per-day rule holds.
    pub fn upsert_schedule(
        &self,
        kind: ResourceKind,
        schedule: WeeklySchedule,
    ) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        let rows = inner.schedules_mut(kind);

        if let Some(existing) = rows.iter_mut().find(|row| {
            row.tenant() == schedule.tenant()
                && row.resource() == schedule.resource()
                && row.day() == schedule.day()
        }) {
            *existing = schedule;
        } else {
            rows.push(schedule);
        }

        Ok(())
    }

    /// Books the request as a confirmed appointment, unless its interval
    /// has been taken in the meantime.
    ///
    /// The overlap scans run again under the write lock that also performs
    /// the insert, which closes the gap between a caller's earlier check
    /// and this persist. Working-hours validation is a pre-check and is not
    /// repeated here.
    pub fn try_book(
        &self,
        request: &BookingRequest,
        client_name: Option<&str>,
        service_name: Option<&str>,
    ) -> Result<Appointment, BookError> {
        let mut inner = self.write()?;
        let span = request.time_span();
        let exclude = request.exclude_appointment_id();

        let taken = {
            let on_date = |appointment: &&Appointment| {
                appointment.tenant() == request.tenant() && appointment.date() == request.date()
            };

            let mut hit = None;

            if let Some(employee) = request.employee_ref() {
                hit = first_overlap(
                    inner
                        .appointments
                        .iter()
                        .filter(on_date)
                        .filter(|appointment| inner.involves_employee(appointment, &employee)),
                    span,
                    exclude,
                );
            }

            if hit.is_none() {
                if let Some(doctor) = request.doctor_id() {
                    hit = first_overlap(
                        inner
                            .appointments
                            .iter()
                            .filter(on_date)
                            .filter(|appointment| appointment.doctor_id() == Some(doctor)),
                        span,
                        exclude,
                    );
                }
            }

            if hit.is_none() {
                if let Some(client) = request.client_id() {
                    hit = first_overlap(
                        inner
                            .appointments
                            .iter()
                            .filter(on_date)
                            .filter(|appointment| appointment.client_id() == Some(client)),
                        span,
                        exclude,
                    );
                }
            }

            hit.map(Appointment::id)
        };

        if let Some(with) = taken {
            debug!("booking denied, {span} collides with appointment #{with}");
            return Err(BookError::Taken { with });
        }

        let id = inner.next_appointment_id();
        let mut appointment = Appointment::new(
            id,
            request.tenant(),
            request.date(),
            request.time(),
            request.duration(),
            AppointmentStatus::Confirmed,
        );

        if let Some(employee) = request.employee_id() {
            appointment = appointment.with_employee(employee);
        }

        if let Some(label) = request.employee_label() {
            appointment = appointment.with_employee_label(label);
        }

        if let Some(doctor) = request.doctor_id() {
            appointment = appointment.with_doctor(doctor);
        }

        if let Some(client) = request.client_id() {
            appointment = appointment.with_client(client);
        }

        if let Some(name) = client_name {
            appointment = appointment.with_client_name(name);
        }

        if let Some(name) = service_name {
            appointment = appointment.with_service(name);
        }

        inner.appointments.push(appointment.clone());
        info!("booked appointment #{id} on {} at {}", request.date(), request.time());

        Ok(appointment)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock is poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock is poisoned".to_string()))
    }
}

impl ScheduleStore for InMemoryStore {
    fn employee_appointments(
        &self,
        tenant: TenantId,
        employee: &ResourceRef,
        date: Date,
    ) -> Result<Vec<Appointment>, StoreError> {
        let inner = self.read()?;
        let rows: Vec<Appointment> = inner
            .appointments
            .iter()
            .filter(|appointment| appointment.tenant() == tenant && appointment.date() == date)
            .filter(|appointment| inner.involves_employee(appointment, employee))
            .cloned()
            .collect();

        trace!("{} appointment(s) for {employee} on {date}", rows.len());
        Ok(rows)
    }

    fn doctor_appointments(
        &self,
        tenant: TenantId,
        doctor: ResourceId,
        date: Date,
    ) -> Result<Vec<Appointment>, StoreError> {
        let inner = self.read()?;
        let rows: Vec<Appointment> = inner
            .appointments
            .iter()
            .filter(|appointment| {
                appointment.tenant() == tenant
                    && appointment.date() == date
                    && appointment.doctor_id() == Some(doctor)
            })
            .cloned()
            .collect();

        trace!("{} appointment(s) for doctor #{doctor} on {date}", rows.len());
        Ok(rows)
    }

    fn client_appointments(
        &self,
        tenant: TenantId,
        client: ClientId,
        date: Date,
    ) -> Result<Vec<Appointment>, StoreError> {
        let inner = self.read()?;
        let rows: Vec<Appointment> = inner
            .appointments
            .iter()
            .filter(|appointment| {
                appointment.tenant() == tenant
                    && appointment.date() == date
                    && appointment.client_id() == Some(client)
            })
            .cloned()
            .collect();

        trace!("{} appointment(s) for client #{client} on {date}", rows.len());
        Ok(rows)
    }

    fn weekly_schedule(
        &self,
        tenant: TenantId,
        kind: ResourceKind,
        resource: ResourceId,
        day: WeekDay,
    ) -> Result<Option<WeeklySchedule>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .schedules(kind)
            .iter()
            .find(|row| row.tenant() == tenant && row.resource() == resource && row.day() == day)
            .cloned())
    }
}
