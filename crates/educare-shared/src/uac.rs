//! Shared items related to user account control

mod errors;
mod role;
mod user;

pub use errors::{AuthError, GateError, ValidationError};
pub use role::{PageAccess, Role};
pub use user::{DisplayName, Email, Identity, NewUserRecord};
