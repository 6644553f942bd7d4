//! Data behind the two dashboards. Loading always passes the page gate first,
//! nothing is fetched for a visitor who may not see the page.

mod admin;
mod search;
mod user;

pub use admin::{AdminDashboard, DashboardStats};
pub use search::{filter_activities, filter_by_category, filter_content, filter_users};
pub use user::UserDashboard;

use educare_shared::{
    errors::GatewayError,
    uac::{AuthError, GateError},
};
use std::future::Future;

use crate::{
    busy::BusyIndicator,
    session::SessionManager,
    storage::KeyValueStore,
    ui::{Notification, UserAction},
};

#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Denied(#[from] GateError),
    #[error("Failed to load dashboard data: {0}")]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Account(#[from] AuthError),
}

/// Shows the loading state of `action` while `work` runs and reports a
/// failure to the user
async fn run_with_indicator<S, T, E, F>(
    session: &SessionManager<S>,
    action: UserAction,
    work: F,
) -> Result<T, DashboardError>
where
    S: KeyValueStore,
    F: Future<Output = Result<T, E>>,
    DashboardError: From<E>,
{
    let ui = session.ui();
    let _busy = BusyIndicator::new(ui.clone(), action);
    let result = work.await.map_err(DashboardError::from);
    if let Err(err) = &result {
        ui.notify(Notification::error(err.to_string()));
    }
    result
}
