use crate::errors::{ConversionError, GatewayError, NotLoggedInError};

use super::Role;

/// Input problems caught before any request is sent
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordsDoNotMatch,
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize, actual: usize },
    #[error("Please accept the terms and conditions")]
    TermsNotAccepted,
    #[error("Please enter a valid email address")]
    InvalidEmail(#[source] ConversionError),
    #[error("Please enter a valid name")]
    InvalidName(#[source] ConversionError),
    #[error("Admin accounts cannot be created through registration")]
    AdminSelfRegistration,
}

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Access denied. {required} privileges required.")]
    AccessDenied { required: Role },
    #[error("Email already registered")]
    AlreadyRegistered,
    #[error("Database error: {0}")]
    Transport(#[from] GatewayError),
    #[error("Please wait for the previous request to finish")]
    Busy,
    #[error("Unable to store the session on this device")]
    SessionNotSaved(#[source] anyhow::Error),
}

/// Why a protected page refused to build its content
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GateError {
    #[error(transparent)]
    NotLoggedIn(#[from] NotLoggedInError),
    #[error("{required} access is required but the session belongs to a {actual}")]
    InsufficientRole { required: Role, actual: Role },
}

impl AuthError {
    /// Returns `true` if the identity could not be verified
    #[must_use]
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }

    /// Returns `true` if the identity was verified but lacks the privilege
    #[must_use]
    pub fn is_authorization_failure(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Returns `true` if the error was caught locally without a request
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
