use thiserror::Error;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Maximum length exceeded. {max} allowed but found {actual}")]
    MaxExceeded { max: usize, actual: usize },
    #[error("Not a valid {expected}")]
    Malformed { expected: &'static str },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("The user has not logged in")]
pub struct NotLoggedInError;

/// Failures reported by (or while talking to) the remote data service
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("failed to reach the data service: {0}")]
    Unreachable(String),
    #[error("request to the data service timed out")]
    TimedOut,
    #[error("data service responded with {status}: {message}")]
    Server { status: u16, message: String },
    #[error("unexpected response from the data service: {0}")]
    Malformed(String),
    #[error("expected at most one matching row but found {count}")]
    MultipleRows { count: usize },
    #[error("a row with the same key already exists")]
    Conflict,
}

impl GatewayError {
    /// Returns `true` for infrastructure failures as opposed to answers about
    /// the data itself ([`MultipleRows`] and [`Conflict`])
    ///
    /// [`MultipleRows`]: GatewayError::MultipleRows
    /// [`Conflict`]: GatewayError::Conflict
    #[must_use]
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::MultipleRows { .. } | Self::Conflict)
    }
}
