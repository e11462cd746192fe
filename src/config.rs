use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

use crate::time::{TimeSpan, TimeStamp};
use crate::time_stamp;

/// Tenant-level scheduling settings.
///
/// Owned by the settings screens of the hosting application; this crate only
/// reads them. A tenant that never configured opening hours gets the
/// 09:00 - 21:00 default day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TenantSettings {
    #[serde(default = "default_work_start")]
    work_start: TimeStamp,
    #[serde(default = "default_work_end")]
    work_end: TimeStamp,
}

fn default_work_start() -> TimeStamp {
    time_stamp!(09:00)
}

fn default_work_end() -> TimeStamp {
    time_stamp!(21:00)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("business hours must start before they end, got {start} - {end}")]
pub struct InvalidBusinessHours {
    start: TimeStamp,
    end: TimeStamp,
}

impl TenantSettings {
    pub fn new(work_start: TimeStamp, work_end: TimeStamp) -> Result<Self, InvalidBusinessHours> {
        let settings = Self {
            work_start,
            work_end,
        };

        settings.check()?;
        Ok(settings)
    }

    /// Loads settings from a TOML document like
    ///
    /// ```toml
    /// work_start = "08:30"
    /// work_end = "19:00"
    /// ```
    ///
    /// Missing keys fall back to the default business hours.
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(input).context("failed to parse tenant settings")?;
        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), InvalidBusinessHours> {
        if self.work_start >= self.work_end {
            return Err(InvalidBusinessHours {
                start: self.work_start,
                end: self.work_end,
            });
        }

        Ok(())
    }

    #[must_use]
    pub const fn work_start(&self) -> TimeStamp {
        self.work_start
    }

    #[must_use]
    pub const fn work_end(&self) -> TimeStamp {
        self.work_end
    }

    /// The default day-wide booking window for this tenant.
    #[must_use]
    pub const fn business_hours(&self) -> TimeSpan {
        TimeSpan::new(self.work_start, self.work_end)
    }
}

impl Default for TenantSettings {
    fn default() -> Self {
        Self {
            work_start: default_work_start(),
            work_end: default_work_end(),
        }
    }
}
