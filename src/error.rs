//! Error types shared across the store clients and orchestrated actions.
//!
//! Store calls return [`StoreError`]; user-triggered actions return
//! [`ActionError`] so callers can tell a missing credential apart from a
//! failed generation call.

use thiserror::Error;

/// Errors from the secret store and record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No resource matched the request. Expected, recoverable.
    #[error("resource not found")]
    NotFound,

    /// Transport, authentication, or server-side failure.
    #[error("remote error: {0}")]
    Remote(String),

    /// The store answered with a body we could not decode.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Returns `true` for the expected "nothing matched" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Remote(e.to_string())
        }
    }
}

/// Errors from user-triggered actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The user has no usable credential stored.
    #[error("credential missing")]
    CredentialMissing,

    /// The generation endpoint rejected the call or returned garbage.
    #[error("generation failed: {0}")]
    Generation(String),

    /// A required local field was absent before the action.
    #[error("missing input: {0}")]
    InputMissing(&'static str),

    /// The store has no such resource.
    #[error("not found")]
    NotFound,

    /// A store call failed.
    #[error("remote error: {0}")]
    Remote(String),
}

impl From<StoreError> for ActionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => Self::NotFound,
            other => Self::Remote(other.to_string()),
        }
    }
}
