use educare_time::Timestamp;

use crate::random_string_def_len;

const TOKEN_PREFIX: &str = "SESS_";

/// Marks that a session exists in this browser profile.
///
/// Carries no cryptographic guarantee, the data service never sees it except
/// as the `session_id` column of activity entries.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new_rand() -> Self {
        Self(format!(
            "{TOKEN_PREFIX}{}_{}",
            Timestamp::now(),
            random_string_def_len()
        ))
    }

    /// A token read back from storage is only usable if it is not blank
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
