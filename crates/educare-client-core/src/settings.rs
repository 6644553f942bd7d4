use educare_shared::const_config::client::{
    CLIENT_LOGIN_REDIRECT_DELAY, CLIENT_LOGOUT_REDIRECT_DELAY, CLIENT_REGISTRATION_RETURN_DELAY,
    CLIENT_REQUEST_TIMEOUT,
};
use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ClientSettings {
    pub gateway: GatewaySettings,
    #[serde(default)]
    pub session: SessionSettings,
}

/// Where the data service lives and how to identify to it
#[derive(serde::Deserialize, Clone, Debug)]
pub struct GatewaySettings {
    pub base_url: String,
    /// Public key of the project. Identifies the site, does not authenticate
    /// a user.
    pub anon_key: SecretString,
    /// Only applied on native targets
    #[serde(
        default = "default_request_timeout_secs",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub request_timeout_secs: u64,
}

/// How long confirmations stay on screen before a flow navigates away
#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SessionSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub login_redirect_delay_ms: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub logout_redirect_delay_ms: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub registration_return_delay_ms: u64,
}

fn default_request_timeout_secs() -> u64 {
    CLIENT_REQUEST_TIMEOUT.into()
}

fn as_millis(duration: Duration) -> u64 {
    duration.as_millis().try_into().unwrap_or(u64::MAX)
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            login_redirect_delay_ms: as_millis(CLIENT_LOGIN_REDIRECT_DELAY),
            logout_redirect_delay_ms: as_millis(CLIENT_LOGOUT_REDIRECT_DELAY),
            registration_return_delay_ms: as_millis(CLIENT_REGISTRATION_RETURN_DELAY),
        }
    }
}

impl SessionSettings {
    pub fn login_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.login_redirect_delay_ms)
    }

    pub fn logout_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.logout_redirect_delay_ms)
    }

    pub fn registration_return_delay(&self) -> Duration {
        Duration::from_millis(self.registration_return_delay_ms)
    }
}

/// Loads the settings for native hosts. Browser builds receive theirs from
/// the page that embeds them.
#[cfg(not(target_arch = "wasm32"))]
pub fn get_configuration() -> Result<ClientSettings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("failed to determine the current directory: {e}"))
    })?;

    // Note do not try to move configuration folder to root because it will make
    // it tricky for tests as they start at the crate root not the workspace root
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.toml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_GATEWAY__ANON_KEY=... would set `ClientSettings.gateway.anon_key`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<ClientSettings>()
}

/// The possible runtime environment for our application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
