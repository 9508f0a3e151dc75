//! Session and role
//!
//! Identity comes from outside the application; all that reaches us is who
//! the caller is and whether they may change data. Managers can add, edit and
//! delete expenses and change settings. Viewers can only read.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HouseshareError, HouseshareResult};

/// Role reported by the identity collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access (called "admin" by the hosted identity service)
    #[serde(alias = "admin")]
    Manager,
    /// Read-only access
    #[default]
    Viewer,
}

impl Role {
    /// Whether this role may perform mutations
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manager => write!(f, "Manager"),
            Self::Viewer => write!(f, "Viewer"),
        }
    }
}

impl FromStr for Role {
    type Err = HouseshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manager" | "admin" => Ok(Self::Manager),
            "viewer" => Ok(Self::Viewer),
            other => Err(HouseshareError::Validation(format!(
                "Unknown role '{}'. Use 'manager' or 'viewer'",
                other
            ))),
        }
    }
}

/// The caller of a service operation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// Display name or email of the signed-in user, if known
    pub user: Option<String>,
    pub role: Role,
}

impl Session {
    pub fn new(user: Option<String>, role: Role) -> Self {
        Self { user, role }
    }

    /// A manager session, mostly useful in tests and scripted imports
    pub fn manager() -> Self {
        Self::new(None, Role::Manager)
    }

    /// A read-only session
    pub fn viewer() -> Self {
        Self::new(None, Role::Viewer)
    }

    /// Fail with `PermissionDenied` unless this session may edit
    pub fn require_manager(&self, action: &str) -> HouseshareResult<()> {
        if self.role.can_edit() {
            Ok(())
        } else {
            Err(HouseshareError::permission_denied(action))
        }
    }
}
