use serde::{Deserialize, Serialize};

use crate::booking::{AppointmentId, ClientId, ResourceId, ResourceRef, TenantId};
use crate::time::{Date, TimeSpan, TimeStamp, WorkingDuration};

/// Lifecycle state of a stored appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
    Completed,
    NoShow,
    Waiting,
    InProgress,
}

impl AppointmentStatus {
    /// Whether an appointment in this state still blocks its time span.
    ///
    /// Cancelled and no-show appointments keep their row for history, but
    /// their interval is free again.
    #[must_use]
    pub const fn occupies_time(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::NoShow)
    }
}

/// One stored appointment row.
///
/// This crate never mutates appointments, it only reads them to answer
/// conflict and availability questions. An appointment can occupy an
/// employee, a doctor, or both at once.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Appointment {
    id: AppointmentId,
    tenant: TenantId,
    date: Date,
    time: TimeStamp,
    duration: WorkingDuration,
    status: AppointmentStatus,
    #[serde(default)]
    employee_id: Option<ResourceId>,
    #[serde(default)]
    employee_label: Option<String>,
    #[serde(default)]
    doctor_id: Option<ResourceId>,
    #[serde(default)]
    client_id: Option<ClientId>,
    #[serde(default)]
    client_name: Option<String>,
    #[serde(default)]
    service_name: Option<String>,
}

impl Appointment {
    #[must_use]
    pub const fn new(
        id: AppointmentId,
        tenant: TenantId,
        date: Date,
        time: TimeStamp,
        duration: WorkingDuration,
        status: AppointmentStatus,
    ) -> Self {
        Self {
            id,
            tenant,
            date,
            time,
            duration,
            status,
            employee_id: None,
            employee_label: None,
            doctor_id: None,
            client_id: None,
            client_name: None,
            service_name: None,
        }
    }

    #[must_use]
    pub const fn with_employee(mut self, id: ResourceId) -> Self {
        self.employee_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_employee_label(mut self, label: impl Into<String>) -> Self {
        self.employee_label = Some(label.into());
        self
    }

    #[must_use]
    pub const fn with_doctor(mut self, id: ResourceId) -> Self {
        self.doctor_id = Some(id);
        self
    }

    #[must_use]
    pub const fn with_client(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_service(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> AppointmentId {
        self.id
    }

    #[must_use]
    pub const fn tenant(&self) -> TenantId {
        self.tenant
    }

    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
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
    pub const fn status(&self) -> AppointmentStatus {
        self.status
    }

    #[must_use]
    pub const fn employee_id(&self) -> Option<ResourceId> {
        self.employee_id
    }

    #[must_use]
    pub fn employee_label(&self) -> Option<&str> {
        self.employee_label.as_deref()
    }

    #[must_use]
    pub const fn doctor_id(&self) -> Option<ResourceId> {
        self.doctor_id
    }

    #[must_use]
    pub const fn client_id(&self) -> Option<ClientId> {
        self.client_id
    }

    #[must_use]
    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    #[must_use]
    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    /// The half-open interval this appointment occupies on its date.
    #[must_use]
    pub const fn time_span(&self) -> TimeSpan {
        TimeSpan::from_start(self.time, self.duration)
    }

    /// The employee this row names, by id or by legacy label.
    #[must_use]
    pub fn employee_ref(&self) -> Option<ResourceRef> {
        ResourceRef::resolve(self.employee_id, self.employee_label.as_deref())
    }
}
