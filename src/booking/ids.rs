use derive_more::Display;
use serde::{Deserialize, Serialize};

// The hosting application keys everything by plain numeric ids. The newtypes
// only exist so an employee id cannot end up where a client id belongs.

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deserialize, Serialize,
)]
#[display("{_0}")]
pub struct TenantId(u64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deserialize, Serialize,
)]
#[display("{_0}")]
pub struct ResourceId(u64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deserialize, Serialize,
)]
#[display("{_0}")]
pub struct ClientId(u64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deserialize, Serialize,
)]
#[display("{_0}")]
pub struct AppointmentId(u64);

impl TenantId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl ResourceId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl ClientId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl AppointmentId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}
