//! Login, registration and logout as seen from the login page and the
//! dashboards' logout control

use educare_shared::{
    activity::ActivityKind,
    errors::GatewayError,
    page::Page,
    req_args::{LoginReqArgs, RegisterReqArgs, ValidRegistration},
    token::SessionToken,
    uac::{AuthError, Email, Identity, Role},
};
use secrecy::SecretString;
use std::{cell::Cell, time::Duration};
use tracing::{info, warn};

use crate::{
    accounts,
    audit::record_activity,
    busy::{InFlightGuard, InFlightSlot},
    gateway::{DataGateway, Filter, Table},
    session::{SessionManager, SessionRecord},
    storage::KeyValueStore,
    ui::{Notification, UserAction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated,
}

pub struct AuthFlow<G, S> {
    gateway: G,
    session: SessionManager<S>,
    state: Cell<AuthState>,
    in_flight: InFlightSlot,
}

impl<G: DataGateway, S: KeyValueStore> AuthFlow<G, S> {
    pub fn new(gateway: G, session: SessionManager<S>) -> Self {
        let result = Self {
            gateway,
            session,
            state: Cell::new(AuthState::Anonymous),
            in_flight: InFlightSlot::default(),
        };
        result.settle_state();
        result
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    /// `false` while a previous submission is still waiting on the service
    pub fn is_allowed_to_submit(&self) -> bool {
        self.in_flight.current().is_none()
    }

    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Sends a visitor who is already logged in straight to their dashboard.
    /// Returns the page they were sent to.
    #[tracing::instrument(skip(self))]
    pub fn resume_existing_session(&self) -> Option<Page> {
        self.session.refresh();
        self.settle_state();
        let record = self.session.current_record()?;
        let page = Page::dashboard_for(record.role());
        info!(?page, "already logged in");
        self.session.ui().redirect(page, Duration::ZERO);
        Some(page)
    }

    #[tracing::instrument(skip(self, args), fields(email = %args.email))]
    pub async fn login(&self, args: LoginReqArgs) -> Result<Identity, AuthError> {
        let email = args.validate().map_err(|e| self.report(e.into()))?;
        let _guard = self.begin(UserAction::Login)?;
        self.state.set(AuthState::Authenticating);

        let result = self.attempt_login(email, &args).await;
        self.settle_state();
        let identity = result.map_err(|e| self.report(e))?;

        let ui = self.session.ui();
        ui.notify(Notification::success("Login successful! Redirecting..."));
        ui.redirect(
            Page::dashboard_for(identity.role),
            self.session.settings().login_redirect_delay(),
        );
        Ok(identity)
    }

    #[tracing::instrument(skip(self, args), fields(email = %args.email))]
    pub async fn register(&self, args: RegisterReqArgs) -> Result<Identity, AuthError> {
        let valid = args.validate().map_err(|e| self.report(e.into()))?;
        let _guard = self.begin(UserAction::Register)?;

        let identity = self
            .attempt_registration(valid, &args.password)
            .await
            .map_err(|e| self.report(e))?;

        let ui = self.session.ui();
        ui.notify(Notification::success("Registration successful! Please login."));
        ui.redirect(
            Page::Login,
            self.session.settings().registration_return_delay(),
        );
        Ok(identity)
    }

    /// Logs out whoever is logged in. Also safe to call when nobody is.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        let _guard = self.begin(UserAction::Logout)?;
        if let Some(record) = self.session.current_record() {
            record_activity(
                &self.gateway,
                &record.identity().id,
                record.token(),
                ActivityKind::Logout,
                "User logged out",
            )
            .await;
        }
        self.gateway.sign_out();
        self.session.logout();
        self.state.set(AuthState::Anonymous);
        Ok(())
    }

    async fn attempt_login(&self, email: Email, args: &LoginReqArgs) -> Result<Identity, AuthError> {
        if !self
            .gateway
            .verify_credentials(&email, &args.password)
            .await?
        {
            return Err(AuthError::InvalidCredentials);
        }
        let signed_in = PendingSignIn::new(&self.gateway);

        let identity = match self
            .gateway
            .query_row::<Identity>(Table::Users, &Filter::new().eq("email", email.as_ref()))
            .await
        {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                warn!("credentials accepted but there is no user row");
                return Err(AuthError::InvalidCredentials);
            }
            Err(GatewayError::MultipleRows { count }) => {
                warn!(count, "more than one user row for the email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        if args.requested_role == Some(Role::Admin) && !identity.is_admin() {
            return Err(AuthError::AccessDenied {
                required: Role::Admin,
            });
        }

        let record = SessionRecord::new(identity.clone(), SessionToken::new_rand(), args.remember);
        let token = record.token().clone();
        self.session
            .establish(record)
            .map_err(AuthError::SessionNotSaved)?;
        signed_in.keep();
        record_activity(
            &self.gateway,
            &identity.id,
            &token,
            ActivityKind::Login,
            "User logged in successfully",
        )
        .await;
        Ok(identity)
    }

    async fn attempt_registration(
        &self,
        valid: ValidRegistration,
        password: &SecretString,
    ) -> Result<Identity, AuthError> {
        accounts::ensure_no_profile(&self.gateway, &valid.email).await?;

        // Registration never authenticates, so any sign in is dropped at the end
        let _signed_in = match self
            .gateway
            .register_credentials(&valid.email, password)
            .await
        {
            Ok(()) => None,
            Err(GatewayError::Conflict) => {
                Some(self.reclaim_credentials(&valid.email, password).await?)
            }
            Err(e) => return Err(e.into()),
        };

        let identity = accounts::insert_profile(&self.gateway, valid).await?;
        record_activity(
            &self.gateway,
            &identity.id,
            &SessionToken::new_rand(),
            ActivityKind::Registration,
            "New user registered",
        )
        .await;
        Ok(identity)
    }

    /// Credentials without a profile row are left behind by a registration
    /// that failed after creating them. Whoever knows the password may finish
    /// it.
    async fn reclaim_credentials(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<PendingSignIn<'_, G>, AuthError> {
        if self.gateway.verify_credentials(email, password).await? {
            info!("resuming an unfinished registration");
            Ok(PendingSignIn::new(&self.gateway))
        } else {
            Err(AuthError::AlreadyRegistered)
        }
    }

    fn begin(&self, action: UserAction) -> Result<InFlightGuard, AuthError> {
        self.in_flight
            .begin(action, self.session.ui())
            .ok_or(AuthError::Busy)
    }

    /// Shows `err` to the user and hands it back for the caller
    fn report(&self, err: AuthError) -> AuthError {
        warn!(?err);
        self.session.ui().notify(Notification::error(err.to_string()));
        err
    }

    fn settle_state(&self) {
        self.state.set(if self.session.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        });
    }
}

/// Credentials the gateway holds after a successful verification. They are
/// signed out again on drop unless [`Self::keep`] was called.
struct PendingSignIn<'a, G: DataGateway> {
    gateway: Option<&'a G>,
}

impl<'a, G: DataGateway> PendingSignIn<'a, G> {
    fn new(gateway: &'a G) -> Self {
        Self {
            gateway: Some(gateway),
        }
    }

    fn keep(mut self) {
        self.gateway = None;
    }
}

impl<G: DataGateway> Drop for PendingSignIn<'_, G> {
    fn drop(&mut self) {
        if let Some(gateway) = self.gateway {
            gateway.sign_out();
        }
    }
}
