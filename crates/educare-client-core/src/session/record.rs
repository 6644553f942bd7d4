use educare_shared::{
    token::SessionToken,
    uac::{Identity, Role},
};
use serde::{Deserialize, Serialize};

/// Everything persisted about a logged in user.
///
/// Only constructed through [`SessionRecord::new`] or read back and then
/// checked, so a record in hand always has a token and a role that agrees with
/// its identity.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    identity: Identity,
    role: Role,
    token: SessionToken,
    #[serde(default)]
    remember: bool,
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum SessionRecordError {
    #[error("failed to read from storage")]
    Unreadable(#[source] anyhow::Error),
    #[error("stored session is not valid json")]
    Malformed(#[from] serde_json::Error),
    #[error("stored session is missing its {0}")]
    Incomplete(&'static str),
    #[error("stored role {stored:?} does not match the identity's role {identity:?}")]
    RoleMismatch { stored: Role, identity: Role },
}

impl SessionRecord {
    pub fn new(identity: Identity, token: SessionToken, remember: bool) -> Self {
        Self {
            role: identity.role,
            identity,
            token,
            remember,
        }
    }

    pub(crate) fn from_parts(
        identity: Identity,
        role: Role,
        token: SessionToken,
        remember: bool,
    ) -> Result<Self, SessionRecordError> {
        Self {
            identity,
            role,
            token,
            remember,
        }
        .checked()
    }

    /// Rejects records that were stored incomplete or were edited by hand
    pub(crate) fn checked(self) -> Result<Self, SessionRecordError> {
        if self.token.is_blank() {
            return Err(SessionRecordError::Incomplete("token"));
        }
        if self.role != self.identity.role {
            return Err(SessionRecordError::RoleMismatch {
                stored: self.role,
                identity: self.identity.role,
            });
        }
        Ok(self)
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Recorded for the login form, does not change how long the session is
    /// kept
    pub fn remember(&self) -> bool {
        self.remember
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
