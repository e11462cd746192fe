use serde::Deserialize;

use crate::booking::{ResourceId, TenantId};
use crate::time::{TimeSpan, TimeStamp, WeekDay};

/// One row of a resource's recurring weekly availability.
///
/// At most one row exists per resource and week day. A missing row means
/// the resource follows the tenant's default business hours that day; a row
/// with `is_available: false` means the resource does not work that day at
/// all, whatever its stored hours say.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeeklySchedule {
    tenant: TenantId,
    resource: ResourceId,
    day: WeekDay,
    start: TimeStamp,
    end: TimeStamp,
    is_available: bool,
}

impl WeeklySchedule {
    #[must_use]
    pub const fn new(
        tenant: TenantId,
        resource: ResourceId,
        day: WeekDay,
        start: TimeStamp,
        end: TimeStamp,
        is_available: bool,
    ) -> Self {
        Self {
            tenant,
            resource,
            day,
            start,
            end,
            is_available,
        }
    }

    #[must_use]
    pub const fn tenant(&self) -> TenantId {
        self.tenant
    }

    #[must_use]
    pub const fn resource(&self) -> ResourceId {
        self.resource
    }

    #[must_use]
    pub const fn day(&self) -> WeekDay {
        self.day
    }

    #[must_use]
    pub const fn start(&self) -> TimeStamp {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> TimeStamp {
        self.end
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.is_available
    }

    /// The scheduled hours as a half-open interval. Empty when the stored
    /// row is inverted or zero-length, which the checks treat as a closed
    /// day.
    #[must_use]
    pub const fn time_span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }
}
