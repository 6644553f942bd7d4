//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub const PANIC_ON_RARE_ERR: bool = true;

pub mod session {
    /// The only key the session record is ever written under
    pub const SESSION_KEY: &str = "educare_session";

    /// Layouts written by earlier versions of the site. Read for migration,
    /// removed on clear, never written.
    pub mod legacy {
        pub const LEGACY_USER_KEY: &str = "educare_user";
        pub const LEGACY_TOKEN_KEY: &str = "educare_session_id";
        pub const LEGACY_ALT_USER_KEY: &str = "currentUser";
        pub const LEGACY_ALT_ROLE_KEY: &str = "currentRole";
        pub const LEGACY_ALT_TOKEN_KEY: &str = "currentSessionId";
        pub const LEGACY_REMEMBER_KEY: &str = "rememberMe";

        pub const LEGACY_KEYS: [&str; 6] = [
            LEGACY_USER_KEY,
            LEGACY_TOKEN_KEY,
            LEGACY_ALT_USER_KEY,
            LEGACY_ALT_ROLE_KEY,
            LEGACY_ALT_TOKEN_KEY,
            LEGACY_REMEMBER_KEY,
        ];
    }
}

pub mod client {
    use educare_time::Seconds;
    use std::time::Duration;

    /// Time the success message is visible before moving to the dashboard
    pub const CLIENT_LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(1500);
    /// Time the confirmation is visible before returning to the login page
    pub const CLIENT_LOGOUT_REDIRECT_DELAY: Duration = Duration::from_millis(1000);
    pub const CLIENT_REGISTRATION_RETURN_DELAY: Duration = Duration::from_millis(1500);
    pub const CLIENT_REQUEST_TIMEOUT: Seconds = Seconds::new(10);
}

pub mod validation {
    pub const MIN_PASSWORD_LENGTH: usize = 6;
}

pub mod dashboard {
    use educare_time::Seconds;

    pub const DASHBOARD_ADMIN_ACTIVITY_LIMIT: usize = 100;
    pub const DASHBOARD_USER_ACTIVITY_LIMIT: usize = 15;
    /// Window used for the "new registrations" statistic
    pub const DASHBOARD_NEW_USER_WINDOW: Seconds = Seconds::from_days(7);
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;
    pub const PATH_REST_PREFIX: &str = "/rest/v1/";
    pub const PATH_AUTH_LOGOUT: PathSpec = PathSpec::post("/auth/v1/logout");
    pub const PATH_AUTH_SIGNUP: PathSpec = PathSpec::post("/auth/v1/signup");
    pub const PATH_AUTH_TOKEN: PathSpec = PathSpec::post("/auth/v1/token?grant_type=password");
}
