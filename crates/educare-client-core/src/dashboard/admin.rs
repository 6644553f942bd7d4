use educare_shared::{
    activity::{ActivityEntry, ActivityKind},
    const_config::dashboard::{DASHBOARD_ADMIN_ACTIVITY_LIMIT, DASHBOARD_NEW_USER_WINDOW},
    content::{ContentItem, ContentKind},
    errors::GatewayError,
    req_args::NewUserReqArgs,
    uac::{AuthError, Identity, PageAccess},
};
use educare_time::Timestamp;
use tracing::info;

use super::{run_with_indicator, search, DashboardError};
use crate::{
    accounts,
    audit::record_activity,
    gateway::{DataGateway, Filter, Table},
    session::SessionManager,
    storage::KeyValueStore,
    ui::{Notification, UserAction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_users: u64,
    /// Users created within the last seven days
    pub new_registrations: u64,
    pub total_content: u64,
}

#[derive(Debug, Clone)]
pub struct AdminDashboard {
    pub admin: Identity,
    pub stats: DashboardStats,
    /// Newest first
    pub users: Vec<Identity>,
    /// Newest first
    pub content: Vec<ContentItem>,
    /// Newest first, capped
    pub activities: Vec<ActivityEntry>,
}

impl AdminDashboard {
    #[tracing::instrument(skip_all)]
    pub async fn load<G, S>(session: &SessionManager<S>, gateway: &G) -> Result<Self, DashboardError>
    where
        G: DataGateway,
        S: KeyValueStore,
    {
        let record = session.gate(PageAccess::AdminOnly)?;
        let admin = record.identity().clone();
        run_with_indicator(session, UserAction::LoadDashboard, Self::fetch(admin, gateway)).await
    }

    /// Creates an account and puts it at the top of the user list.
    ///
    /// Credentials are created through the service's authentication, the
    /// admin's own sign in is left untouched. An email that already has
    /// credentials is refused.
    #[tracing::instrument(skip(self, session, gateway, args), fields(email = %args.email))]
    pub async fn create_user<G, S>(
        &mut self,
        session: &SessionManager<S>,
        gateway: &G,
        args: NewUserReqArgs,
    ) -> Result<Identity, DashboardError>
    where
        G: DataGateway,
        S: KeyValueStore,
    {
        let record = session.gate(PageAccess::AdminOnly)?;
        let identity = run_with_indicator(session, UserAction::CreateUser, async {
            let valid = args.validate().map_err(AuthError::from)?;
            accounts::ensure_no_profile(gateway, &valid.email).await?;
            gateway
                .register_credentials(&valid.email, &args.password)
                .await
                .map_err(accounts::already_registered_on_conflict)?;
            let description = format!("Created user: {}", valid.full_name);
            let identity = accounts::insert_profile(gateway, valid).await?;
            record_activity(
                gateway,
                &record.identity().id,
                record.token(),
                ActivityKind::UserCreation,
                &description,
            )
            .await;
            Ok::<_, AuthError>(identity)
        })
        .await?;

        info!(id = ?identity.id, role = ?identity.role, "user created");
        session
            .ui()
            .notify(Notification::success("User created successfully"));
        self.users.insert(0, identity.clone());
        self.stats.total_users += 1;
        self.stats.new_registrations += 1;
        Ok(identity)
    }

    async fn fetch<G: DataGateway>(admin: Identity, gateway: &G) -> Result<Self, GatewayError> {
        let since = Timestamp::now()
            .saturating_sub(DASHBOARD_NEW_USER_WINDOW)
            .to_rfc3339();
        let stats = DashboardStats {
            total_users: gateway.count_rows(Table::Users, &Filter::new()).await?,
            new_registrations: gateway
                .count_rows(Table::Users, &Filter::new().gte("created_at", since))
                .await?,
            total_content: gateway.count_rows(Table::Content, &Filter::new()).await?,
        };
        let users = gateway
            .query_rows(Table::Users, &Filter::new().order_desc("created_at"))
            .await?;
        let content = gateway
            .query_rows(Table::Content, &Filter::new().order_desc("created_at"))
            .await?;
        let activities = gateway
            .query_rows(
                Table::ActivityLogs,
                &Filter::new()
                    .order_desc("timestamp")
                    .limit(DASHBOARD_ADMIN_ACTIVITY_LIMIT),
            )
            .await?;
        Ok(Self {
            admin,
            stats,
            users,
            content,
            activities,
        })
    }

    pub fn filter_users(&self, term: &str) -> Vec<&Identity> {
        search::filter_users(&self.users, term)
    }

    pub fn filter_content(&self, term: &str, kind: Option<ContentKind>) -> Vec<&ContentItem> {
        search::filter_content(&self.content, term, kind)
    }

    pub fn filter_activities(&self, kind: Option<ActivityKind>) -> Vec<&ActivityEntry> {
        search::filter_activities(&self.activities, kind)
    }
}
