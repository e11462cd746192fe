use serde::Deserialize;

use crate::booking::{AppointmentId, ClientId, ResourceId, ResourceRef, TenantId};
use crate::time::{Date, TimeSpan, TimeStamp, WorkingDuration};

/// A candidate booking, as the admin or public flow would persist it.
///
/// Requests are transient. They exist to be checked; nothing in this crate
/// stores them. When an existing appointment is being rescheduled, its id
/// goes into the exclusion so the appointment does not collide with itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookingRequest {
    tenant: TenantId,
    date: Date,
    time: TimeStamp,
    duration: WorkingDuration,
    #[serde(default)]
    employee_id: Option<ResourceId>,
    #[serde(default)]
    employee_label: Option<String>,
    #[serde(default)]
    doctor_id: Option<ResourceId>,
    #[serde(default)]
    client_id: Option<ClientId>,
    #[serde(default)]
    exclude_appointment_id: Option<AppointmentId>,
}

impl BookingRequest {
    #[must_use]
    pub const fn new(
        tenant: TenantId,
        date: Date,
        time: TimeStamp,
        duration: WorkingDuration,
    ) -> Self {
        Self {
            tenant,
            date,
            time,
            duration,
            employee_id: None,
            employee_label: None,
            doctor_id: None,
            client_id: None,
            exclude_appointment_id: None,
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

    /// Excludes an existing appointment from all conflict scans, for edits.
    #[must_use]
    pub const fn excluding(mut self, id: AppointmentId) -> Self {
        self.exclude_appointment_id = Some(id);
        self
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
    pub const fn exclude_appointment_id(&self) -> Option<AppointmentId> {
        self.exclude_appointment_id
    }

    /// The employee this request names, by id or by label.
    #[must_use]
    pub fn employee_ref(&self) -> Option<ResourceRef> {
        ResourceRef::resolve(self.employee_id, self.employee_label.as_deref())
    }

    /// Whether at least one resource is named, which the resource conflict
    /// check requires.
    #[must_use]
    pub const fn names_resource(&self) -> bool {
        self.employee_id.is_some() || self.employee_label.is_some() || self.doctor_id.is_some()
    }

    /// The half-open interval the candidate would occupy.
    #[must_use]
    pub const fn time_span(&self) -> TimeSpan {
        TimeSpan::from_start(self.time, self.duration)
    }
}
