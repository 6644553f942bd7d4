use educare_shared::{
    activity::{ActivityCategory, ActivityEntry},
    const_config::dashboard::DASHBOARD_USER_ACTIVITY_LIMIT,
    uac::{Identity, PageAccess},
};

use super::{run_with_indicator, search, DashboardError};
use crate::{
    gateway::{DataGateway, Filter, Table},
    session::SessionManager,
    storage::KeyValueStore,
    ui::UserAction,
};

#[derive(Debug, Clone)]
pub struct UserDashboard {
    pub identity: Identity,
    /// The user's own entries, newest first
    pub activities: Vec<ActivityEntry>,
}

impl UserDashboard {
    #[tracing::instrument(skip_all)]
    pub async fn load<G, S>(session: &SessionManager<S>, gateway: &G) -> Result<Self, DashboardError>
    where
        G: DataGateway,
        S: KeyValueStore,
    {
        let record = session.gate(PageAccess::AnyUser)?;
        let identity = record.identity().clone();
        let filter = Filter::new()
            .eq("user_id", identity.id.as_ref())
            .order_desc("timestamp")
            .limit(DASHBOARD_USER_ACTIVITY_LIMIT);
        let activities = run_with_indicator(
            session,
            UserAction::LoadDashboard,
            gateway.query_rows(Table::ActivityLogs, &filter),
        )
        .await?;
        Ok(Self {
            identity,
            activities,
        })
    }

    pub fn filter_by_category(&self, category: Option<ActivityCategory>) -> Vec<&ActivityEntry> {
        search::filter_by_category(&self.activities, category)
    }
}
