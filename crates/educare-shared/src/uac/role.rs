use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Role tag stored on each user row.
///
/// Anything the data service returns that is not recognized lands in
/// [`Role::Other`] which is treated like any other non-admin role.
#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Student,
    #[serde(other)]
    Other,
}

impl Role {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Text shown next to the user name in navigation
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Student => "Student",
            Role::Other => "User",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What a protected page requires before any of its content may be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAccess {
    AnyUser,
    AdminOnly,
}

impl PageAccess {
    /// Returns the role a session must have, if a specific one is needed
    pub fn required_role(&self) -> Option<Role> {
        match self {
            PageAccess::AnyUser => None,
            PageAccess::AdminOnly => Some(Role::Admin),
        }
    }
}
