use educare_shared::{
    errors::NotLoggedInError,
    page::Page,
    uac::{GateError, Identity, PageAccess},
};
use std::{cell::RefCell, rc::Rc, time::Duration};
use tracing::{info, warn};

use super::{SessionRecord, SessionStore};
use crate::{
    settings::SessionSettings,
    storage::KeyValueStore,
    ui::{NavState, NavigationSurface, Notification, UiHost},
};

/// Per-page view of the stored session.
///
/// Cheap to clone, clones share state. Everything the manager knows comes
/// from the store, it only caches the last record it read.
pub struct SessionManager<S> {
    shared: Rc<Shared<S>>,
}

struct Shared<S> {
    store: SessionStore<S>,
    ui: Rc<dyn UiHost>,
    settings: SessionSettings,
    record: RefCell<Option<Rc<SessionRecord>>>,
    surfaces: RefCell<Vec<Box<dyn NavigationSurface>>>,
}

impl<S> Clone for SessionManager<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(store: SessionStore<S>, ui: Rc<dyn UiHost>) -> Self {
        Self::with_settings(store, ui, SessionSettings::default())
    }

    pub fn with_settings(store: SessionStore<S>, ui: Rc<dyn UiHost>, settings: SessionSettings) -> Self {
        Self {
            shared: Rc::new(Shared {
                store,
                ui,
                settings,
                record: RefCell::new(None),
                surfaces: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Reads the stored session and brings every surface in line with it.
    /// Called on page load.
    #[tracing::instrument(skip(self))]
    pub fn initialize(&self) {
        let record = self.shared.store.read().map(Rc::new);
        info!(logged_in = record.is_some(), "session loaded");
        *self.shared.record.borrow_mut() = record;
        self.reconcile();
    }

    /// Same as [`Self::initialize`], for when another tab may have changed the
    /// store
    pub fn refresh(&self) {
        self.initialize();
    }

    pub fn is_authenticated(&self) -> bool {
        self.shared.record.borrow().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.shared
            .record
            .borrow()
            .as_ref()
            .is_some_and(|r| r.is_admin())
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.shared
            .record
            .borrow()
            .as_ref()
            .map(|r| r.identity().clone())
    }

    pub fn current_record(&self) -> Option<Rc<SessionRecord>> {
        self.shared.record.borrow().clone()
    }

    pub fn nav_state(&self) -> NavState {
        match self.shared.record.borrow().as_ref() {
            Some(record) => NavState::LoggedIn {
                display_name: record.identity().display_name().to_string(),
                role: record.role(),
            },
            None => NavState::LoggedOut,
        }
    }

    /// Registers a rendering of the login state and shows the current state
    /// on it immediately
    pub fn add_surface<N: NavigationSurface + 'static>(&self, mut surface: N) {
        surface.show(&self.nav_state());
        self.shared.surfaces.borrow_mut().push(Box::new(surface));
    }

    /// Persists `record` as the session and updates every surface
    #[tracing::instrument(skip_all, fields(role = ?record.role()))]
    pub fn establish(&self, record: SessionRecord) -> anyhow::Result<()> {
        self.shared.store.write(&record)?;
        *self.shared.record.borrow_mut() = Some(Rc::new(record));
        self.reconcile();
        Ok(())
    }

    /// Must be checked by a protected page before it builds any content. On
    /// refusal the visitor is sent to the login page straight away.
    #[tracing::instrument(skip(self))]
    pub fn gate(&self, access: PageAccess) -> Result<Rc<SessionRecord>, GateError> {
        self.refresh();
        let outcome = match self.current_record() {
            None => Err(GateError::NotLoggedIn(NotLoggedInError)),
            Some(record) => match access.required_role() {
                Some(required) if record.role() != required => Err(GateError::InsufficientRole {
                    required,
                    actual: record.role(),
                }),
                _ => Ok(record),
            },
        };
        if let Err(err) = &outcome {
            warn!(?err, "access refused, sending visitor to login");
            self.shared.ui.redirect(Page::Login, Duration::ZERO);
        }
        outcome
    }

    /// Clears the session everywhere it is stored. Safe to call when nobody
    /// is logged in, the visitor still ends up on the login page.
    #[tracing::instrument(skip(self))]
    pub fn logout(&self) {
        self.shared.store.clear();
        *self.shared.record.borrow_mut() = None;
        self.reconcile();
        self.shared
            .ui
            .notify(Notification::success("Logged out successfully!"));
        self.shared
            .ui
            .redirect(Page::Login, self.shared.settings.logout_redirect_delay());
    }

    pub fn ui(&self) -> Rc<dyn UiHost> {
        Rc::clone(&self.shared.ui)
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.shared.settings
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.shared.store
    }

    fn reconcile(&self) {
        let state = self.nav_state();
        for surface in self.shared.surfaces.borrow_mut().iter_mut() {
            surface.show(&state);
        }
    }
}
