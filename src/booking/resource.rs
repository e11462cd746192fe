use core::fmt;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::booking::ResourceId;

/// The two kinds of staff an appointment can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[display("employee")]
    Employee,
    #[display("doctor")]
    Doctor,
}

/// How a row or request names an employee.
///
/// Rows written by the current application always carry the employee id.
/// Rows imported from the previous system only stored a display label, so
/// those resolve to a label reference instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceRef {
    ById(ResourceId),
    ByLabel(String),
}

impl ResourceRef {
    /// Resolves an optional id/label pair into one reference. The id wins
    /// when both are present.
    #[must_use]
    pub fn resolve(id: Option<ResourceId>, label: Option<&str>) -> Option<Self> {
        match (id, label) {
            (Some(id), _) => Some(Self::ById(id)),
            (None, Some(label)) => Some(Self::ByLabel(label.to_string())),
            (None, None) => None,
        }
    }

    /// The resource id, when this reference carries one.
    ///
    /// Label references have no id, which is why no weekly schedule row can
    /// ever apply to them.
    #[must_use]
    pub const fn id(&self) -> Option<ResourceId> {
        match self {
            Self::ById(id) => Some(*id),
            Self::ByLabel(_) => None,
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(id) => write!(f, "employee #{id}"),
            Self::ByLabel(label) => write!(f, "employee \"{label}\""),
        }
    }
}
