//! Creating accounts, shared by self registration and the admin dashboard

use educare_shared::{
    errors::GatewayError,
    req_args::ValidRegistration,
    uac::{AuthError, Email, Identity, NewUserRecord},
};
use educare_time::Timestamp;
use tracing::warn;

use crate::gateway::{DataGateway, Filter, Table};

/// Fails with [`AuthError::AlreadyRegistered`] if a profile row exists for
/// `email`
pub(crate) async fn ensure_no_profile<G: DataGateway>(
    gateway: &G,
    email: &Email,
) -> Result<(), AuthError> {
    let by_email = Filter::new().eq("email", email.as_ref());
    match gateway.query_row::<Identity>(Table::Users, &by_email).await {
        Ok(None) => Ok(()),
        Ok(Some(_)) => Err(AuthError::AlreadyRegistered),
        Err(GatewayError::MultipleRows { count }) => {
            warn!(count, "more than one user row for the email");
            Err(AuthError::AlreadyRegistered)
        }
        Err(e) => Err(e.into()),
    }
}

/// Inserts the profile row. It never holds the password, credentials live with
/// the service's authentication.
pub(crate) async fn insert_profile<G: DataGateway>(
    gateway: &G,
    valid: ValidRegistration,
) -> Result<Identity, AuthError> {
    let row = NewUserRecord {
        email: valid.email,
        full_name: valid.full_name,
        phone: valid.phone,
        role: valid.role,
        created_at: Timestamp::now().to_rfc3339(),
    };
    gateway
        .insert_row(Table::Users, &row)
        .await
        .map_err(already_registered_on_conflict)
}

pub(crate) fn already_registered_on_conflict(err: GatewayError) -> AuthError {
    match err {
        GatewayError::Conflict => AuthError::AlreadyRegistered,
        other => other.into(),
    }
}
