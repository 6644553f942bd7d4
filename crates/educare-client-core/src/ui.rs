//! What the flows need from the page that hosts them

use educare_shared::{page::Page, uac::Role};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

/// A transient message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new<S: Into<String>>(kind: NotificationKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success<S: Into<String>>(message: S) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn info<S: Into<String>>(message: S) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn warning<S: Into<String>>(message: S) -> Self {
        Self::new(NotificationKind::Warning, message)
    }
}

/// Controls that start a request and show a loading state while it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    Login,
    Register,
    Logout,
    LoadDashboard,
    CreateUser,
}

/// What every navigation surface of a page should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    LoggedOut,
    LoggedIn { display_name: String, role: Role },
}

impl NavState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }
}

pub trait UiHost {
    fn notify(&self, notification: Notification);

    /// Navigate to `page` once `after` has elapsed, [`Duration::ZERO`] means
    /// right away
    fn redirect(&self, page: Page, after: Duration);

    /// Disable (or re-enable) the control for `action` and show its loading
    /// indicator
    fn set_busy(&self, action: UserAction, busy: bool);
}

/// One rendering of the login state (desktop header, mobile menu, ...).
///
/// Implementations must not call back into the session manager from
/// [`NavigationSurface::show`].
pub trait NavigationSurface {
    fn show(&mut self, state: &NavState);
}
