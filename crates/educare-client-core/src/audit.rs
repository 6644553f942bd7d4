use educare_shared::{
    activity::{ActivityKind, NewActivityEntry},
    id::DbId,
    log_err_as_warn,
    token::SessionToken,
};
use educare_time::Timestamp;
use serde::de::IgnoredAny;

use crate::gateway::{DataGateway, Table};

/// Appends to the audit trail. Failures are only logged, the action being
/// audited has already happened.
#[tracing::instrument(skip(gateway))]
pub(crate) async fn record_activity<G: DataGateway>(
    gateway: &G,
    user_id: &DbId,
    session_id: &SessionToken,
    action: ActivityKind,
    description: &str,
) {
    let entry = NewActivityEntry {
        user_id: user_id.clone(),
        action,
        description: description.to_string(),
        session_id: session_id.clone(),
        timestamp: Timestamp::now().to_rfc3339(),
    };
    log_err_as_warn!(
        gateway
            .insert_row::<_, IgnoredAny>(Table::ActivityLogs, &entry)
            .await
    );
}
