//! This module stores the arguments the login page forms collect. Both check
//! themselves before anything is sent so that an incomplete form never costs a
//! round trip to the data service.

use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

use crate::{
    const_config::validation::MIN_PASSWORD_LENGTH,
    uac::{DisplayName, Email, Role, ValidationError},
};

#[derive(Clone)]
pub struct LoginReqArgs {
    pub email: String,
    pub password: SecretString,
    /// Role picked on the login form (e.g. "log in as admin"). A verified
    /// user without this role is refused access.
    pub requested_role: Option<Role>,
    /// Recorded with the session but has no effect on how long it is kept
    pub remember: bool,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(email: S, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
            requested_role: None,
            remember: false,
        }
    }

    pub fn email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = email.into();
        self
    }

    pub fn password(mut self, password: SecretString) -> Self {
        self.password = password;
        self
    }

    pub fn requested_role(mut self, requested_role: Option<Role>) -> Self {
        self.requested_role = requested_role;
        self
    }

    pub fn remember(mut self, remember: bool) -> Self {
        self.remember = remember;
        self
    }

    /// Returns the email to look up if the form is complete
    pub fn validate(&self) -> Result<Email, ValidationError> {
        if self.email.trim().is_empty() || self.password.expose_secret().is_empty() {
            return Err(ValidationError::MissingFields);
        }
        Email::try_from(self.email.as_str()).map_err(ValidationError::InvalidEmail)
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field("requested_role", &self.requested_role)
            .field("remember", &self.remember)
            .finish()
    }
}

#[derive(Clone)]
pub struct RegisterReqArgs {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub role: Role,
    pub terms_accepted: bool,
}

/// The parts of a registration form that passed [`RegisterReqArgs::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub email: Email,
    pub full_name: DisplayName,
    pub phone: String,
    pub role: Role,
}

impl RegisterReqArgs {
    /// Checks are done in the order the form reports them, the first failure
    /// wins
    pub fn validate(&self) -> Result<ValidRegistration, ValidationError> {
        let password = self.password.expose_secret();
        if self.full_name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.phone.trim().is_empty()
            || password.is_empty()
            || self.confirm_password.expose_secret().is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if password != self.confirm_password.expose_secret() {
            return Err(ValidationError::PasswordsDoNotMatch);
        }
        let actual = password.chars().count();
        if actual < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
                actual,
            });
        }
        if !self.terms_accepted {
            return Err(ValidationError::TermsNotAccepted);
        }
        let email =
            Email::try_from(self.email.as_str()).map_err(ValidationError::InvalidEmail)?;
        let full_name = DisplayName::try_from(self.full_name.clone())
            .map_err(ValidationError::InvalidName)?;
        if self.role.is_admin() {
            return Err(ValidationError::AdminSelfRegistration);
        }
        Ok(ValidRegistration {
            email,
            full_name,
            phone: self.phone.trim().to_string(),
            role: self.role,
        })
    }
}

impl Debug for RegisterReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterReqArgs")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field("role", &self.role)
            .field("terms_accepted", &self.terms_accepted)
            .finish()
    }
}

/// Account details an admin enters to create a user from the admin dashboard.
/// Unlike self registration any role may be given.
#[derive(Clone)]
pub struct NewUserReqArgs {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: SecretString,
    pub role: Role,
}

impl NewUserReqArgs {
    pub fn validate(&self) -> Result<ValidRegistration, ValidationError> {
        let password = self.password.expose_secret();
        if self.full_name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.phone.trim().is_empty()
            || password.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        let actual = password.chars().count();
        if actual < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
                actual,
            });
        }
        let email =
            Email::try_from(self.email.as_str()).map_err(ValidationError::InvalidEmail)?;
        let full_name = DisplayName::try_from(self.full_name.clone())
            .map_err(ValidationError::InvalidName)?;
        Ok(ValidRegistration {
            email,
            full_name,
            phone: self.phone.trim().to_string(),
            role: self.role,
        })
    }
}

impl Debug for NewUserReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUserReqArgs")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field("role", &self.role)
            .finish()
    }
}
