use crate::uac::Role;

/// Pages of the site a flow can send the visitor to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    AdminDashboard,
    UserDashboard,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::Login => "login.html",
            Page::AdminDashboard => "admin-dashboard.html",
            Page::UserDashboard => "user-dashboard.html",
        }
    }

    /// Where a freshly authenticated user of this role lands
    pub fn dashboard_for(role: Role) -> Self {
        if role.is_admin() {
            Page::AdminDashboard
        } else {
            Page::UserDashboard
        }
    }
}
